use crate::error::NablaRustError;
use crate::ops::reduction::utils::for_each_output_position;
use crate::ops::registry::{expect_arity, ReductionOp};
use crate::ops::ReduceArgs;
use crate::shape::infer::reduced_shape;
use crate::shape::validate::{reduction_mask, validate_axes};
use crate::shape::ShapeDescriptor;
use crate::tensor::{create, Tensor};
use crate::types::Element;

/// Multiplies the elements along the reduced axes into `output`.
///
/// Each output position receives the product of every input element whose
/// un-reduced coordinates equal that position, the reduced coordinates
/// ranging over their full extent.
///
/// `output` must already carry the shape the shape-inference pass produces
/// for the same arguments; the surrounding graph executor guarantees this
/// and the forward path does not re-check it. Axis validation runs before
/// any element is read or written.
pub fn prod_into<T: Element>(
    input: &Tensor<T>,
    axes: &[isize],
    keep_dims: bool,
    output: &mut Tensor<T>,
) -> Result<(), NablaRustError> {
    validate_axes(input.rank(), axes)?;
    let mask = reduction_mask(input.rank(), axes);

    let out_strides = output.strides().to_vec();
    let out_buf = output.data_mut();
    for value in out_buf.iter_mut() {
        *value = T::one();
    }
    for_each_output_position(input, &mask, keep_dims, &out_strides, |flat, value| {
        out_buf[flat] *= value;
    });
    Ok(())
}

/// Infers the output shape, allocates the output tensor and runs the
/// product reduction in one call.
pub fn prod_op<T: Element>(
    input: &Tensor<T>,
    axes: &[isize],
    keep_dims: bool,
) -> Result<Tensor<T>, NablaRustError> {
    let out_desc = reduced_shape(&input.shape_descriptor(), axes, keep_dims)?;
    let mut output = create::from_descriptor(&out_desc, T::one())?;
    prod_into(input, axes, keep_dims, &mut output)?;
    Ok(output)
}

/// Forward product reduction, dispatched by name through the op registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReduceProd;

impl<T: Element> ReductionOp<T> for ReduceProd {
    fn name(&self) -> &'static str {
        "reduce_prod"
    }

    fn infer_shapes(
        &self,
        input_shapes: &[ShapeDescriptor],
        args: &ReduceArgs,
    ) -> Result<Vec<ShapeDescriptor>, NablaRustError> {
        expect_arity("reduce_prod", "input shape", input_shapes.len(), 1)?;
        Ok(vec![reduced_shape(
            &input_shapes[0],
            &args.axes,
            args.keep_dims,
        )?])
    }

    fn execute(
        &self,
        inputs: &[&Tensor<T>],
        outputs: &mut [Tensor<T>],
        args: &ReduceArgs,
    ) -> Result<(), NablaRustError> {
        expect_arity("reduce_prod", "input", inputs.len(), 1)?;
        expect_arity("reduce_prod", "output", outputs.len(), 1)?;
        prod_into(inputs[0], &args.axes, args.keep_dims, &mut outputs[0])
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::check_tensor_near;
    use approx::assert_relative_eq;

    fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor<f32> {
        Tensor::new(data, shape).expect("Test tensor creation failed")
    }

    #[test]
    fn test_prod_constant_axis() {
        // a single axis of extent n with all elements c yields c^n
        let t = create_test_tensor(vec![2.0; 4], vec![4]);
        let result = prod_op(&t, &[0], false).unwrap();
        assert_eq!(result.shape(), &[] as &[usize]);
        assert_relative_eq!(result.data()[0], 16.0);
    }

    #[test]
    fn test_prod_axis_1() {
        let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let result = prod_op(&t, &[1], false).unwrap();
        check_tensor_near(&result, &[2], &[6.0, 120.0], 1e-6);
    }

    #[test]
    fn test_prod_axis_0() {
        let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let result = prod_op(&t, &[0], false).unwrap();
        check_tensor_near(&result, &[3], &[4.0, 10.0, 18.0], 1e-6);
    }

    #[test]
    fn test_prod_negative_axis() {
        let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let result = prod_op(&t, &[-1], false).unwrap();
        check_tensor_near(&result, &[2], &[6.0, 120.0], 1e-6);
    }

    #[test]
    fn test_prod_keep_dims() {
        let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let result = prod_op(&t, &[1], true).unwrap();
        check_tensor_near(&result, &[2, 1], &[6.0, 120.0], 1e-6);
    }

    #[test]
    fn test_prod_all_axes() {
        let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let result = prod_op(&t, &[], false).unwrap();
        assert!(result.is_scalar());
        assert_relative_eq!(result.data()[0], 720.0);
    }

    #[test]
    fn test_prod_multiple_axes() {
        let t = create_test_tensor((1..=8).map(|v| v as f32).collect(), vec![2, 2, 2]);
        let result = prod_op(&t, &[0, 2], false).unwrap();
        // groups: {1,2,5,6} and {3,4,7,8}
        check_tensor_near(&result, &[2], &[60.0, 672.0], 1e-6);
    }

    #[test]
    fn test_prod_scalar_input() {
        let t = Tensor::scalar(3.0_f32);
        let result = prod_op(&t, &[], false).unwrap();
        assert!(result.is_scalar());
        assert_relative_eq!(result.data()[0], 3.0);
    }

    #[test]
    fn test_prod_invalid_axis() {
        let t = create_test_tensor(vec![1.0, 2.0], vec![2]);
        let err = prod_op(&t, &[1], false).unwrap_err();
        assert_eq!(err, NablaRustError::AxisOutOfRange { axis: 1, rank: 1 });
    }

    #[test]
    fn test_prod_into_writes_preallocated_output() {
        let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
        // stale content must be overwritten
        let mut output = create::full(&[2], 9.0).unwrap();
        prod_into(&t, &[1], false, &mut output).unwrap();
        check_tensor_near(&output, &[2], &[2.0, 12.0], 1e-6);
    }
}
