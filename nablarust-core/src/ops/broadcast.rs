//! Broadcast expansion of reduced-shape gradients.

use crate::error::NablaRustError;
use crate::types::Element;

/// Replicates `source` across `out`, expanding extent-1 axes to the target
/// extents and copying matching axes unchanged.
///
/// `source_shape` must already have the target's rank; the unit axes at the
/// reduced positions come from a keep-dims shape-inference pass, so this
/// kernel never has to guess where collapsed dimensions went. Every target
/// position is written exactly once.
pub(crate) fn broadcast_into<T: Element>(
    target_shape: &[usize],
    target_strides: &[usize],
    out: &mut [T],
    source: &[T],
    source_shape: &[usize],
    source_strides: &[usize],
) -> Result<(), NablaRustError> {
    let rank = target_shape.len();
    if source_shape.len() != rank {
        return Err(NablaRustError::BroadcastError {
            shape1: source_shape.to_vec(),
            shape2: target_shape.to_vec(),
        });
    }
    for dim in 0..rank {
        if source_shape[dim] != target_shape[dim] && source_shape[dim] != 1 {
            return Err(NablaRustError::BroadcastError {
                shape1: source_shape.to_vec(),
                shape2: target_shape.to_vec(),
            });
        }
    }

    let target_numel: usize = target_shape.iter().product();
    let mut indices = vec![0usize; rank];
    for i in 0..target_numel {
        let mut src_offset = 0;
        let mut dst_offset = 0;
        for dim in 0..rank {
            let src_index = if source_shape[dim] == 1 {
                0
            } else {
                indices[dim]
            };
            src_offset += src_index * source_strides[dim];
            dst_offset += indices[dim] * target_strides[dim];
        }
        out[dst_offset] = source[src_offset];

        if i + 1 < target_numel {
            let mut dim = rank;
            while dim > 0 {
                dim -= 1;
                indices[dim] += 1;
                if indices[dim] < target_shape[dim] {
                    break;
                }
                indices[dim] = 0;
            }
        }
    }
    Ok(())
}
