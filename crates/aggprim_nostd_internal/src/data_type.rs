//! The element types that a column may hold.
//!
//! The column layer identifies element types with the numeric codes of
//! [`DataType`]. Kernel code mostly works with the corresponding Rust types,
//! which are tied back to a [`DataType`] through the [`FixedWidth`] trait.

use crate::error::InternalError;

#[cfg(feature = "cuda")]
pub use cust_core::DeviceCopy;

/// Stand-in for `cust_core::DeviceCopy` when we aren't building against cuda.
///
/// Types implementing this can be copied bitwise to the accelerator.
#[cfg(not(feature = "cuda"))]
pub trait DeviceCopy {}

/// The type of a column's elements.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool = 0,
    Int8 = 1,
    Uint8 = 2,
    Int16 = 3,
    Uint16 = 4,
    Int32 = 5,
    Uint32 = 6,
    Float32 = 7,
    Int64 = 8,
    Uint64 = 9,
    Uuid = 10,
    GeoPoint = 11,
    // the following types exist in the column layer, but they don't have a
    // fixed width (or are translated to another type before reaching us)
    GeoShape = 12,
    SmallEnum = 13,
    BigEnum = 14,
}

impl DataType {
    const ALL: [DataType; 15] = [
        DataType::Bool,
        DataType::Int8,
        DataType::Uint8,
        DataType::Int16,
        DataType::Uint16,
        DataType::Int32,
        DataType::Uint32,
        DataType::Float32,
        DataType::Int64,
        DataType::Uint64,
        DataType::Uuid,
        DataType::GeoPoint,
        DataType::GeoShape,
        DataType::SmallEnum,
        DataType::BigEnum,
    ];

    /// every known data type, in code order
    pub fn all() -> &'static [DataType] {
        &Self::ALL
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Result<DataType, InternalError> {
        Self::ALL
            .get(code as usize)
            .copied()
            .ok_or(InternalError::UnknownTypeCode(code))
    }

    pub fn is_float(self) -> bool {
        matches!(self, DataType::Float32)
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 | DataType::Float32
        )
    }

    /// whether values of this type take part in arithmetic type promotion
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            DataType::Bool
                | DataType::Int8
                | DataType::Uint8
                | DataType::Int16
                | DataType::Uint16
                | DataType::Int32
                | DataType::Uint32
                | DataType::Float32
                | DataType::Int64
                | DataType::Uint64
        )
    }
}

/// A point on the globe, stored as 2 single precision coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoPoint {
    pub lat: f32,
    pub long: f32,
}

/// The raw 16 bytes of a universally unique identifier.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Uuid(pub [u8; 16]);

/// Rust types that directly represent the elements of a fixed-width column.
pub trait FixedWidth: Copy + DeviceCopy {
    const DATA_TYPE: DataType;
    /// number of bytes occupied by a single element
    const WIDTH: usize = core::mem::size_of::<Self>();
}

macro_rules! impl_fixed_width {
    ($($t:ty => $dtype:ident),* $(,)?) => {
        $(
            impl FixedWidth for $t {
                const DATA_TYPE: DataType = DataType::$dtype;
            }
        )*
    };
}

impl_fixed_width!(
    bool => Bool,
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    f32 => Float32,
    i64 => Int64,
    u64 => Uint64,
    Uuid => Uuid,
    GeoPoint => GeoPoint,
);

// cust_core already covers the primitives
#[cfg(not(feature = "cuda"))]
macro_rules! impl_device_copy {
    ($($t:ty),*) => {
        $( impl DeviceCopy for $t {} )*
    };
}

#[cfg(not(feature = "cuda"))]
impl_device_copy!(bool, i8, u8, i16, u16, i32, u32, f32, i64, u64, GeoPoint, Uuid);

// SAFETY: both types are plain-old-data without any pointers
#[cfg(feature = "cuda")]
unsafe impl DeviceCopy for GeoPoint {}
#[cfg(feature = "cuda")]
unsafe impl DeviceCopy for Uuid {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        for dtype in DataType::all() {
            assert_eq!(DataType::from_code(dtype.code()), Ok(*dtype));
        }
        assert_eq!(
            DataType::from_code(15),
            Err(InternalError::UnknownTypeCode(15))
        );
        assert!(DataType::from_code(u32::MAX).is_err());
    }

    fn assert_width_agrees<T: FixedWidth>() {
        assert_eq!(
            crate::memory::width_of(T::DATA_TYPE).map(|w| w as usize),
            Ok(T::WIDTH),
            "{:?}",
            T::DATA_TYPE
        );
        assert_eq!(T::WIDTH, core::mem::size_of::<T>());
    }

    #[test]
    fn width_matches_width_table() {
        assert_width_agrees::<bool>();
        assert_width_agrees::<i8>();
        assert_width_agrees::<u8>();
        assert_width_agrees::<i16>();
        assert_width_agrees::<u16>();
        assert_width_agrees::<i32>();
        assert_width_agrees::<u32>();
        assert_width_agrees::<f32>();
        assert_width_agrees::<i64>();
        assert_width_agrees::<u64>();
        assert_width_agrees::<GeoPoint>();
        assert_width_agrees::<Uuid>();
    }

    #[test]
    fn signedness() {
        assert!(DataType::Int64.is_signed());
        assert!(DataType::Float32.is_signed());
        assert!(!DataType::Uint64.is_signed());
        assert!(!DataType::Bool.is_signed());
        assert!(!DataType::GeoPoint.is_numeric());
        assert!(!DataType::Uuid.is_numeric());
    }
}
