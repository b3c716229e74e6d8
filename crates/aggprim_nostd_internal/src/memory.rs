//! Fixed-width memory access.
//!
//! Accelerator memory accesses must be aligned to the width of the access (1,
//! 2, 4, 8 or 16 bytes). Column buffers carry values at arbitrary byte
//! offsets, so the routines in this file never perform a wide load on a
//! caller-provided address.

use crate::data_type::DataType;
use crate::error::InternalError;

/// Returns the number of bytes occupied by a single value of `dtype`.
pub fn width_of(dtype: DataType) -> Result<u8, InternalError> {
    match dtype {
        DataType::Bool | DataType::Int8 | DataType::Uint8 => Ok(1),
        DataType::Int16 | DataType::Uint16 => Ok(2),
        DataType::Int32 | DataType::Uint32 | DataType::Float32 => Ok(4),
        DataType::GeoPoint | DataType::Int64 | DataType::Uint64 => Ok(8),
        DataType::Uuid => Ok(16),
        DataType::GeoShape | DataType::SmallEnum | DataType::BigEnum => {
            Err(InternalError::UnsupportedType(dtype))
        }
    }
}

/// [`width_of`] for a raw data type code.
pub fn width_of_code(code: u32) -> Result<u8, InternalError> {
    width_of(DataType::from_code(code)?)
}

/// Compares the first `n` bytes of `lhs` and `rhs`, one byte at a time.
///
/// Returns `true` when `n` is 0. A slice holding fewer than `n` bytes never
/// compares equal.
#[inline]
pub fn bytes_equal(lhs: &[u8], rhs: &[u8], n: usize) -> bool {
    if lhs.len() < n || rhs.len() < n {
        return false;
    }
    // NOTE: don't replace this with a slice comparison. It may get lowered to
    //       a memcmp that issues wide loads
    for i in 0..n {
        if lhs[i] != rhs[i] {
            return false;
        }
    }
    true
}

/// The width of a dimension value.
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DimWidth {
    W1 = 1,
    W2 = 2,
    W4 = 4,
    W8 = 8,
    W16 = 16,
}

impl DimWidth {
    pub fn from_bytes(n_bytes: u16) -> Result<DimWidth, InternalError> {
        match n_bytes {
            1 => Ok(DimWidth::W1),
            2 => Ok(DimWidth::W2),
            4 => Ok(DimWidth::W4),
            8 => Ok(DimWidth::W8),
            16 => Ok(DimWidth::W16),
            _ => Err(InternalError::DimWidth(n_bytes)),
        }
    }

    pub fn for_type(dtype: DataType) -> Result<DimWidth, InternalError> {
        Self::from_bytes(width_of(dtype)? as u16)
    }

    pub fn n_bytes(self) -> usize {
        self as usize
    }
}

#[inline(always)]
fn copy_fixed<const N: usize>(dst: &mut [u8], src: &[u8]) {
    let mut value = [0_u8; N];
    value.copy_from_slice(&src[..N]);
    dst[..N].copy_from_slice(&value);
}

/// Copies a single dimension value of `width` bytes from `src` into `dst`.
///
/// Exactly one width case runs: a 4-byte copy transfers exactly 4 bytes and
/// is never followed by the narrower cases.
pub fn copy_dim_value(dst: &mut [u8], src: &[u8], width: DimWidth) -> Result<(), InternalError> {
    let needed = width.n_bytes();
    let actual = dst.len().min(src.len());
    if actual < needed {
        return Err(InternalError::BufferTooShort { needed, actual });
    }

    match width {
        DimWidth::W16 => copy_fixed::<16>(dst, src),
        DimWidth::W8 => copy_fixed::<8>(dst, src),
        DimWidth::W4 => copy_fixed::<4>(dst, src),
        DimWidth::W2 => copy_fixed::<2>(dst, src),
        DimWidth::W1 => dst[0] = src[0],
    }
    Ok(())
}
