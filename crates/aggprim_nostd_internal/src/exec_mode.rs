//! Build-time selection between the accelerator and sequential code paths.
//!
//! Every primitive in this crate is written once. Where the two execution
//! modes need different behavior (currently, only the atomicity of
//! [`AtomicAccumulator`]), the difference is expressed through an [`ExecMode`]
//! type parameter rather than by branching at runtime. The mode that the
//! crate is built for is exposed as [`ActiveMode`] and is selected by the
//! `accelerator` cargo feature.
//!
//! A routine that is generic over [`ExecMode`] is "dual": it can be
//! instantiated for either mode, and the two instantiations must produce the
//! same observable results. Only performance and atomicity guarantees differ.

use crate::atomic::{AtomicAccumulator, AtomicStrategy, HardwareAtomic, PlainReadModifyWrite};

/// Describes one of the execution modes.
pub trait ExecMode {
    /// `true` when code runs on a massively parallel accelerator, where many
    /// threads may touch the same memory at once.
    const IS_ACCELERATOR: bool;

    /// the strategy used by this mode's [`AtomicAccumulator`]
    type Atomic: AtomicStrategy + Copy + Default + Send + Sync;

    fn accumulator() -> AtomicAccumulator<Self::Atomic> {
        AtomicAccumulator::new(Self::Atomic::default())
    }
}

/// Code runs on the accelerator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Accelerator;

impl ExecMode for Accelerator {
    const IS_ACCELERATOR: bool = true;
    type Atomic = HardwareAtomic;
}

/// Code runs on a single host thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sequential;

impl ExecMode for Sequential {
    const IS_ACCELERATOR: bool = false;
    type Atomic = PlainReadModifyWrite;
}

/// The mode that this build targets.
#[cfg(feature = "accelerator")]
pub type ActiveMode = Accelerator;

/// The mode that this build targets.
#[cfg(not(feature = "accelerator"))]
pub type ActiveMode = Sequential;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomic::AtomicValue;

    fn sum_with<M: ExecMode>(values: &[i64]) -> i64 {
        let accum = M::accumulator();
        let cell = i64::new_cell(0);
        for v in values {
            accum.fetch_and_add(&cell, *v);
        }
        i64::load(&cell)
    }

    #[test]
    fn modes_agree() {
        let values = [5, -7, i64::MAX, 9];
        assert_eq!(sum_with::<Accelerator>(&values), sum_with::<Sequential>(&values));
    }

    #[test]
    fn mode_strategies() {
        let _: &HardwareAtomic = Accelerator::accumulator().strategy();
        let _: &PlainReadModifyWrite = Sequential::accumulator().strategy();

        // a copy of the strategy builds an accumulator that behaves the same
        let accum = AtomicAccumulator::new(*Sequential::accumulator().strategy());
        let cell = u32::new_cell(40);
        assert_eq!(accum.fetch_and_add(&cell, 2_u32), 40);
        assert_eq!(u32::load(&cell), 42);
    }

    #[test]
    fn active_mode() {
        assert_eq!(ActiveMode::IS_ACCELERATOR, cfg!(feature = "accelerator"));
    }
}
