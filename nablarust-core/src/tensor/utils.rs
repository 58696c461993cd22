use crate::order::MemoryOrder;

/// Calculates contiguous strides for a shape in the given memory order.
/// Strides represent the number of elements to skip in the flattened data
/// array to move one step along each dimension.
///
/// Example (row-major):
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
///
/// Example (column-major):
/// shape = [2, 3] -> strides = [1, 2]
pub fn calculate_strides(order: MemoryOrder, shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    match order {
        MemoryOrder::RowMajor => {
            for i in (0..rank - 1).rev() {
                strides[i] = strides[i + 1] * shape[i + 1];
            }
        }
        MemoryOrder::ColMajor => {
            for i in 1..rank {
                strides[i] = strides[i - 1] * shape[i - 1];
            }
        }
    }
    strides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_strides_row_major() {
        assert_eq!(
            calculate_strides(MemoryOrder::RowMajor, &[2, 3]),
            vec![3, 1]
        );
        assert_eq!(
            calculate_strides(MemoryOrder::RowMajor, &[4, 5, 6]),
            vec![30, 6, 1]
        );
        assert_eq!(calculate_strides(MemoryOrder::RowMajor, &[5]), vec![1]);
    }

    #[test]
    fn test_calculate_strides_col_major() {
        assert_eq!(
            calculate_strides(MemoryOrder::ColMajor, &[2, 3]),
            vec![1, 2]
        );
        assert_eq!(
            calculate_strides(MemoryOrder::ColMajor, &[4, 5, 6]),
            vec![1, 4, 20]
        );
    }

    #[test]
    fn test_calculate_strides_empty() {
        assert_eq!(
            calculate_strides(MemoryOrder::RowMajor, &[]),
            Vec::<usize>::new()
        );
    }
}
