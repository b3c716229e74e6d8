//! Arithmetic for sizing kernel launches.
//!
//! An occupancy model (on a real device, the runtime's occupancy API) tells
//! us the block size that maximizes utilization for a kernel and the grid
//! size at which adding more blocks stops helping. We launch enough blocks
//! to cover the input, but never more than that recommended grid size.
//! Kernels are expected to use grid-stride loops, so a clamped grid still
//! visits every element.

use crate::error::InternalError;

/// Number of threads per warp.
pub const WARP_SIZE: u32 = 32;
/// Number of elements a custom kernel's thread handles per step.
pub const STEP_SIZE: u32 = 64;
/// Default block size for custom kernels.
pub const BLOCK_SIZE: u32 = 512;

/// What an occupancy model recommends for a kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupancy {
    /// the smallest grid size that reaches full occupancy
    pub min_grid_size: u32,
    /// the block size that maximizes occupancy
    pub block_size: u32,
}

/// Describes the occupancy behavior of kernels of type `K`.
pub trait OccupancyModel<K: ?Sized> {
    type Error;

    fn max_potential_block_size(&self, kernel: &K) -> Result<Occupancy, Self::Error>;
}

/// An occupancy model that gives the same answer for every kernel.
///
/// This is what sequential mode uses (a host loop has no occupancy to speak
/// of). It's also handy in tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedOccupancy(pub Occupancy);

impl Default for FixedOccupancy {
    fn default() -> Self {
        FixedOccupancy(Occupancy {
            min_grid_size: 1,
            block_size: BLOCK_SIZE,
        })
    }
}

impl<K: ?Sized> OccupancyModel<K> for FixedOccupancy {
    type Error = core::convert::Infallible;

    fn max_potential_block_size(&self, _kernel: &K) -> Result<Occupancy, Self::Error> {
        Ok(self.0)
    }
}

/// The dimensions of a 1D kernel launch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchDims {
    pub grid_size: u32,
    pub block_size: u32,
}

impl LaunchDims {
    /// Computes the launch dimensions for `size` elements.
    ///
    /// The grid holds the fewest blocks that cover `size` elements, clamped
    /// to `occupancy.min_grid_size`. When `size` is 0, so is the grid size
    /// (the caller should skip the launch).
    pub fn cover(size: usize, occupancy: Occupancy) -> Result<LaunchDims, InternalError> {
        let Occupancy {
            min_grid_size,
            block_size,
        } = occupancy;
        if block_size == 0 {
            return Err(InternalError::ZeroBlockSize);
        }
        let needed_grid_size = size.div_ceil(block_size as usize);
        let grid_size = needed_grid_size.min(min_grid_size as usize) as u32;
        Ok(LaunchDims {
            grid_size,
            block_size,
        })
    }

    /// total number of threads in the launch
    pub fn n_threads(&self) -> usize {
        self.grid_size as usize * self.block_size as usize
    }
}
