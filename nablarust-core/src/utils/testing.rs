use crate::tensor::Tensor;
use crate::types::Element;

/// Checks if a tensor matches an expected shape and data within a tolerance.
/// Panics with a description of the first mismatch.
pub fn check_tensor_near<T: Element>(
    actual: &Tensor<T>,
    expected_shape: &[usize],
    expected_data: &[T],
    tolerance: T,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");

    let actual_data = actual.data();
    assert_eq!(
        actual_data.len(),
        expected_data.len(),
        "Data length mismatch"
    );

    for (i, (a, e)) in actual_data.iter().zip(expected_data.iter()).enumerate() {
        let diff = if *a > *e { *a - *e } else { *e - *a };
        if diff > tolerance {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}
