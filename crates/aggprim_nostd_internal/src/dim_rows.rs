// Helpers that apply the fixed-width primitives to a whole block of
// dimension values. A block is a 2D view of bytes where axis 0 indexes rows
// and axis 1 indexes the bytes of each row's dimension value.
//
// Rows aren't required to be contiguous in memory, so each value gets staged
// in a 16-byte scratch buffer (the widest dimension value) first.

use crate::error::InternalError;
use crate::hash::murmur3_sum;
use crate::memory::{DimWidth, copy_dim_value};
use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2};

fn check_len(needed: usize, actual: usize) -> Result<(), InternalError> {
    if actual < needed {
        Err(InternalError::BufferTooShort { needed, actual })
    } else {
        Ok(())
    }
}

#[inline(always)]
fn stage_row(row: ArrayView1<u8>, n_bytes: usize) -> [u8; 16] {
    let mut scratch = [0_u8; 16];
    for (dst, src) in scratch.iter_mut().zip(row.iter()).take(n_bytes) {
        *dst = *src;
    }
    scratch
}

/// Copies the dimension value of every row in `src` into the matching row of
/// `dst`. Bytes of `dst` past `width` are left untouched.
pub fn copy_dim_rows(
    dst: &mut ArrayViewMut2<u8>,
    src: &ArrayView2<u8>,
    width: DimWidth,
) -> Result<(), InternalError> {
    let n_bytes = width.n_bytes();
    check_len(n_bytes, src.ncols())?;
    check_len(n_bytes, dst.ncols())?;
    check_len(src.nrows(), dst.nrows())?;

    for (mut dst_row, src_row) in dst.rows_mut().into_iter().zip(src.rows()) {
        let staged = stage_row(src_row, n_bytes);
        let mut out = [0_u8; 16];
        copy_dim_value(&mut out, &staged, width)?;
        for (d, s) in dst_row.iter_mut().zip(out.iter()).take(n_bytes) {
            *d = *s;
        }
    }
    Ok(())
}

/// Computes the 64-bit group hash of every row's dimension value.
pub fn hash_dim_rows(
    out: &mut ArrayViewMut1<u64>,
    rows: &ArrayView2<u8>,
    width: DimWidth,
    seed: u32,
) -> Result<(), InternalError> {
    let n_bytes = width.n_bytes();
    check_len(n_bytes, rows.ncols())?;
    check_len(rows.nrows(), out.len())?;

    for (digest, row) in out.iter_mut().zip(rows.rows()) {
        let staged = stage_row(row, n_bytes);
        *digest = murmur3_sum::<64>(&staged[..n_bytes], seed);
    }
    Ok(())
}
