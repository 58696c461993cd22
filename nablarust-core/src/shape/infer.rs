//! Pure shape inference for reduction operations.

use crate::error::NablaRustError;
use crate::shape::validate::{reduction_mask, validate_axes};
use crate::shape::ShapeDescriptor;

/// Calculates the output shape of a reduction over `axes`.
///
/// Axes are validated, then normalized to non-negative form and marked as
/// reduced. With `keep_dims` every reduced position keeps extent 1 and the
/// rank is preserved; without it reduced positions are omitted, so reducing
/// every axis of a tensor yields a rank-0 (scalar) descriptor. The memory
/// order of the output is inherited from the input.
///
/// This function never touches tensor data and is deterministic, so callers
/// may invoke it speculatively (e.g. to discover the reshape target for a
/// gradient) at no cost beyond the descriptor allocation.
pub fn reduced_shape(
    input: &ShapeDescriptor,
    axes: &[isize],
    keep_dims: bool,
) -> Result<ShapeDescriptor, NablaRustError> {
    validate_axes(input.rank(), axes)?;
    let mask = reduction_mask(input.rank(), axes);

    let mut dims = Vec::with_capacity(input.rank());
    for (dim, &extent) in input.dims().iter().enumerate() {
        if mask[dim] {
            if keep_dims {
                dims.push(1);
            }
        } else {
            dims.push(extent);
        }
    }
    Ok(ShapeDescriptor::new(input.order(), dims))
}
