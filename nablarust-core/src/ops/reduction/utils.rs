//! Shared iteration logic for reduction kernels.

use crate::tensor::Tensor;
use crate::types::Element;

/// Walks every element of `input` and hands the kernel closure the element's
/// value together with the flat index of the output position its group maps
/// to.
///
/// `mask[dim]` marks the reduced dimensions. Un-reduced coordinates carry
/// over to the output; reduced ones are dropped, or pinned to the kept
/// extent-1 axis when `keep_dims`. `out_strides` are the strides of the
/// pre-shaped output tensor, so each output position's group is visited
/// exactly `group size` times, independently of every other position.
pub(crate) fn for_each_output_position<T, F>(
    input: &Tensor<T>,
    mask: &[bool],
    keep_dims: bool,
    out_strides: &[usize],
    mut kernel: F,
) where
    T: Element,
    F: FnMut(usize, T),
{
    let rank = input.rank();
    let in_shape = input.shape();
    let in_strides = input.strides();
    let data = input.data();
    let numel = input.numel();
    let mut indices = vec![0usize; rank];

    for i in 0..numel {
        let mut in_offset = 0;
        for dim in 0..rank {
            in_offset += indices[dim] * in_strides[dim];
        }
        let value = data[in_offset];

        let mut out_flat = 0;
        let mut out_dim = 0;
        for dim in 0..rank {
            if !mask[dim] {
                out_flat += indices[dim] * out_strides[out_dim];
                out_dim += 1;
            } else if keep_dims {
                // kept reduced axis has extent 1, coordinate 0
                out_dim += 1;
            }
        }
        kernel(out_flat, value);

        // N-dimensional counter increment
        if i + 1 < numel {
            let mut dim = rank;
            while dim > 0 {
                dim -= 1;
                indices[dim] += 1;
                if indices[dim] < in_shape[dim] {
                    break;
                }
                indices[dim] = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visits_every_element_once() {
        let t = Tensor::new((1..=6).map(|v| v as f32).collect(), vec![2, 3]).unwrap();
        let mut sum = 0.0;
        let mut visits = 0;
        // reduce everything into a single output position
        for_each_output_position(&t, &[true, true], false, &[], |flat, value| {
            assert_eq!(flat, 0);
            sum += value;
            visits += 1;
        });
        assert_eq!(visits, 6);
        assert_eq!(sum, 21.0);
    }

    #[test]
    fn test_group_mapping_without_keep_dims() {
        let t = Tensor::new((1..=6).map(|v| v as f32).collect(), vec![2, 3]).unwrap();
        // reduce axis 1: rows collapse, output shape [2] with strides [1]
        let mut groups = vec![vec![]; 2];
        for_each_output_position(&t, &[false, true], false, &[1], |flat, value| {
            groups[flat].push(value);
        });
        assert_eq!(groups[0], vec![1.0, 2.0, 3.0]);
        assert_eq!(groups[1], vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_group_mapping_with_keep_dims() {
        let t = Tensor::new((1..=6).map(|v| v as f32).collect(), vec![2, 3]).unwrap();
        // reduce axis 0, output shape [1, 3] with strides [3, 1]
        let mut groups = vec![vec![]; 3];
        for_each_output_position(&t, &[true, false], true, &[3, 1], |flat, value| {
            groups[flat].push(value);
        });
        assert_eq!(groups[0], vec![1.0, 4.0]);
        assert_eq!(groups[1], vec![2.0, 5.0]);
        assert_eq!(groups[2], vec![3.0, 6.0]);
    }

    #[test]
    fn test_rank_zero_input() {
        let t = Tensor::scalar(5.0_f32);
        let mut visits = 0;
        for_each_output_position(&t, &[], false, &[], |flat, value| {
            assert_eq!(flat, 0);
            assert_eq!(value, 5.0);
            visits += 1;
        });
        assert_eq!(visits, 1);
    }
}
