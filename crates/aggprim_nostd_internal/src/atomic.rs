//! Add-and-fetch-previous on caller-owned memory.
//!
//! The calculation logic is shared by both execution modes. The only thing
//! that differs is the [`AtomicStrategy`] that an [`AtomicAccumulator`] gets
//! constructed with:
//! - [`HardwareAtomic`] issues a true atomic add. It is linearizable with
//!   respect to every other thread touching the same cell.
//! - [`PlainReadModifyWrite`] does a plain load, add and store. There is no
//!   atomicity guarantee: this is only correct as long as no two callers
//!   touch the same cell at the same time, which holds in sequential mode.
//!   The accumulator does **not** enforce that, callers must.
//!
//! The memory itself is owned by the caller and is expressed through the
//! [`AtomicValue::Cell`] type (e.g. [`AtomicU32`] for `u32`).

use crate::identity::AggregateValue;
use core::sync::atomic::{AtomicI32, AtomicI64, AtomicU32, AtomicU64, Ordering};

/// An `f32` that can be shared between threads. There is no native atomic
/// float add, so [`HardwareAtomic`] uses a compare-exchange loop on the bits.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub const fn new(value: f32) -> Self {
        AtomicF32(AtomicU32::new(value.to_bits()))
    }

    pub fn load(&self, order: Ordering) -> f32 {
        f32::from_bits(self.0.load(order))
    }

    pub fn store(&self, value: f32, order: Ordering) {
        self.0.store(value.to_bits(), order)
    }

    pub fn into_inner(self) -> f32 {
        f32::from_bits(self.0.into_inner())
    }

    fn fetch_add(&self, delta: f32, order: Ordering) -> f32 {
        let result = self.0.fetch_update(order, Ordering::Relaxed, |bits| {
            Some((f32::from_bits(bits) + delta).to_bits())
        });
        // the closure never returns None, so both arms hold the previous bits
        match result {
            Ok(prev) | Err(prev) => f32::from_bits(prev),
        }
    }
}

/// Values that an [`AtomicAccumulator`] can add to memory.
pub trait AtomicValue: AggregateValue {
    /// the caller-owned memory location holding a single value
    type Cell: Sync;

    fn new_cell(value: Self) -> Self::Cell;
    fn load(cell: &Self::Cell) -> Self;
    fn store(cell: &Self::Cell, value: Self);
    /// add `delta` with a single atomic instruction and return the previous
    /// value
    fn atomic_fetch_add(cell: &Self::Cell, delta: Self) -> Self;
}

macro_rules! impl_atomic_value {
    ($($t:ty => $cell:ty),* $(,)?) => {
        $(
            impl AtomicValue for $t {
                type Cell = $cell;

                #[inline(always)]
                fn new_cell(value: Self) -> Self::Cell {
                    <$cell>::new(value)
                }

                #[inline(always)]
                fn load(cell: &Self::Cell) -> Self {
                    cell.load(Ordering::Relaxed)
                }

                #[inline(always)]
                fn store(cell: &Self::Cell, value: Self) {
                    cell.store(value, Ordering::Relaxed)
                }

                #[inline(always)]
                fn atomic_fetch_add(cell: &Self::Cell, delta: Self) -> Self {
                    // integer fetch_add wraps on overflow, like agg_add
                    cell.fetch_add(delta, Ordering::Relaxed)
                }
            }
        )*
    };
}

impl_atomic_value!(
    u32 => AtomicU32,
    i32 => AtomicI32,
    u64 => AtomicU64,
    i64 => AtomicI64,
    f32 => AtomicF32,
);

/// How an [`AtomicAccumulator`] performs the read-add-write.
pub trait AtomicStrategy {
    fn fetch_add<T: AtomicValue>(&self, cell: &T::Cell, delta: T) -> T;
}

/// A true atomic add. Used in accelerator mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct HardwareAtomic;

impl AtomicStrategy for HardwareAtomic {
    #[inline(always)]
    fn fetch_add<T: AtomicValue>(&self, cell: &T::Cell, delta: T) -> T {
        T::atomic_fetch_add(cell, delta)
    }
}

/// A plain load-add-store without any atomicity. Used in sequential mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainReadModifyWrite;

impl AtomicStrategy for PlainReadModifyWrite {
    #[inline(always)]
    fn fetch_add<T: AtomicValue>(&self, cell: &T::Cell, delta: T) -> T {
        let prev = T::load(cell);
        T::store(cell, prev.agg_add(delta));
        prev
    }
}

/// Adds values to caller-owned memory and reports what was there before.
#[derive(Clone, Copy, Debug, Default)]
pub struct AtomicAccumulator<S: AtomicStrategy> {
    strategy: S,
}

impl<S: AtomicStrategy> AtomicAccumulator<S> {
    pub const fn new(strategy: S) -> Self {
        AtomicAccumulator { strategy }
    }

    /// Add `delta` to the value held by `cell` and return the value that was
    /// held immediately before the addition.
    #[inline(always)]
    pub fn fetch_and_add<T: AtomicValue>(&self, cell: &T::Cell, delta: T) -> T {
        self.strategy.fetch_add(cell, delta)
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}
