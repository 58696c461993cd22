use crate::error::NablaRustError;
use num_traits::{FromPrimitive, One, Zero};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub};

/// Numeric element type every op is generic over.
///
/// A single generic implementation of each op is instantiated at the call
/// boundary for any type satisfying this trait (`f32`, `f64`, ...), instead
/// of maintaining one copy of the op per numeric type.
pub trait Element:
    Copy
    + Clone
    + Debug
    + Default
    + Send
    + Sync
    + 'static
    + Zero
    + One
    + FromPrimitive
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + Mul<Output = Self>
    + MulAssign
    + Div<Output = Self>
    + PartialEq
    + PartialOrd
{
}

impl<T> Element for T where
    T: Copy
        + Clone
        + Debug
        + Default
        + Send
        + Sync
        + 'static
        + Zero
        + One
        + FromPrimitive
        + Add<Output = Self>
        + AddAssign
        + Sub<Output = Self>
        + Mul<Output = Self>
        + MulAssign
        + Div<Output = Self>
        + PartialEq
        + PartialOrd
{
}

/// Converts an element count to the element type.
pub(crate) fn count_as<T: Element>(count: usize) -> Result<T, NablaRustError> {
    T::from_usize(count).ok_or_else(|| {
        NablaRustError::InternalError(format!(
            "Failed to convert element count {} to the tensor element type",
            count
        ))
    })
}
