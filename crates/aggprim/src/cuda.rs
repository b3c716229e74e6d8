//! Occupancy queries backed by the CUDA runtime.

use aggprim_nostd_internal::{Occupancy, OccupancyModel};
use cust::error::CudaError;
use cust::function::Function;

/// Asks the CUDA occupancy API about a loaded kernel.
///
/// Kernels launched by this crate use no dynamic shared memory and don't
/// limit the block size.
#[derive(Clone, Copy, Debug, Default)]
pub struct CudaOccupancy;

impl<'a> OccupancyModel<Function<'a>> for CudaOccupancy {
    type Error = CudaError;

    fn max_potential_block_size(&self, kernel: &Function<'a>) -> Result<Occupancy, CudaError> {
        let (min_grid_size, block_size) = kernel.suggested_launch_configuration(0, 0.into())?;
        Ok(Occupancy {
            min_grid_size,
            block_size,
        })
    }
}
