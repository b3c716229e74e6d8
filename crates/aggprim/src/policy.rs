//! Execution policies handed to parallel-algorithm invocations.
//!
//! The policy is resolved from the build configuration:
//! - sequential builds always run algorithms on the host
//! - accelerator builds bind algorithms to the caller's stream, optionally
//!   with a pooled allocator substituted underneath (the `pooled-alloc`
//!   feature)
//!
//! We never interpret the policy ourselves. It is an opaque value that gets
//! passed through to whichever layer actually runs the algorithm.

use aggprim_nostd_internal::{ActiveMode, ExecMode};

/// A raw handle to an accelerator stream (e.g. a `cudaStream_t`).
///
/// We never dereference it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StreamHandle(usize);

impl StreamHandle {
    /// the runtime's default (legacy) stream
    pub const DEFAULT: StreamHandle = StreamHandle(0);

    pub fn from_raw(raw: usize) -> Self {
        StreamHandle(raw)
    }

    pub fn as_raw(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionPolicy {
    /// run on the accelerator, ordered on the given stream
    Stream(StreamHandle),
    /// like [`ExecutionPolicy::Stream`], with temporary allocations served
    /// from a memory pool
    PooledStream(StreamHandle),
    /// run sequentially on the host
    Host,
}

impl ExecutionPolicy {
    pub fn stream(&self) -> Option<StreamHandle> {
        match self {
            ExecutionPolicy::Stream(stream) | ExecutionPolicy::PooledStream(stream) => {
                Some(*stream)
            }
            ExecutionPolicy::Host => None,
        }
    }

    pub fn is_on_device(&self) -> bool {
        self.stream().is_some()
    }

    pub fn uses_pooled_allocator(&self) -> bool {
        matches!(self, ExecutionPolicy::PooledStream(_))
    }
}

/// Select the execution policy for mode `M`.
///
/// `pooled` only has an effect in accelerator mode.
pub fn execution_policy_for<M: ExecMode>(stream: StreamHandle, pooled: bool) -> ExecutionPolicy {
    let policy = match (M::IS_ACCELERATOR, pooled) {
        (false, _) => ExecutionPolicy::Host,
        (true, true) => ExecutionPolicy::PooledStream(stream),
        (true, false) => ExecutionPolicy::Stream(stream),
    };
    tracing::debug!(?policy, "selected execution policy");
    policy
}

/// Select the execution policy for the mode this crate was built for.
pub fn execution_policy(stream: StreamHandle) -> ExecutionPolicy {
    execution_policy_for::<ActiveMode>(stream, cfg!(feature = "pooled-alloc"))
}
