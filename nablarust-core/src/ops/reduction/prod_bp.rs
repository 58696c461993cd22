use crate::error::NablaRustError;
use crate::ops::reduction::prod::prod_op;
use crate::ops::registry::{expect_arity, ReductionOp};
use crate::ops::ReduceArgs;
use crate::shape::infer::reduced_shape;
use crate::shape::ShapeDescriptor;
use crate::tensor::{create, Tensor};
use crate::types::Element;

/// Gradient of the product reduction.
///
/// `epsilon` is the upstream gradient and must match the forward output's
/// shape exactly; the result keeps that reduced shape too, unlike the
/// variance gradient, which reports in the input's shape. Each op's
/// declared convention is preserved as is.
///
/// The forward product is recomputed on `input` with the same axis
/// arguments into a scoped temporary, then combined pointwise:
/// `output = temp_prod * epsilon`. A failure of the nested forward call
/// propagates unchanged. The temporary is released on every exit path.
pub fn prod_bp_into<T: Element>(
    input: &Tensor<T>,
    epsilon: &Tensor<T>,
    axes: &[isize],
    keep_dims: bool,
    output: &mut Tensor<T>,
) -> Result<(), NablaRustError> {
    if output.shape() != epsilon.shape() {
        return Err(NablaRustError::ShapeMismatch {
            expected: epsilon.shape().to_vec(),
            actual: output.shape().to_vec(),
            operation: "reduce_prod_bp".to_string(),
        });
    }

    let temp_prod = prod_op(input, axes, keep_dims)?;
    if temp_prod.shape() != epsilon.shape() {
        return Err(NablaRustError::ShapeMismatch {
            expected: temp_prod.shape().to_vec(),
            actual: epsilon.shape().to_vec(),
            operation: "reduce_prod_bp (pairwise multiply)".to_string(),
        });
    }

    for ((out, &prod), &eps) in output
        .data_mut()
        .iter_mut()
        .zip(temp_prod.data())
        .zip(epsilon.data())
    {
        *out = prod * eps;
    }
    Ok(())
}

/// Infers the reduced output shape, allocates it and runs the product
/// backward pass in one call.
pub fn prod_bp_op<T: Element>(
    input: &Tensor<T>,
    epsilon: &Tensor<T>,
    axes: &[isize],
    keep_dims: bool,
) -> Result<Tensor<T>, NablaRustError> {
    let out_desc = reduced_shape(&input.shape_descriptor(), axes, keep_dims)?;
    let mut output = create::from_descriptor(&out_desc, T::zero())?;
    prod_bp_into(input, epsilon, axes, keep_dims, &mut output)?;
    Ok(output)
}

/// Product gradient op, dispatched by name through the op registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReduceProdBp;

impl<T: Element> ReductionOp<T> for ReduceProdBp {
    fn name(&self) -> &'static str {
        "reduce_prod_bp"
    }

    fn infer_shapes(
        &self,
        input_shapes: &[ShapeDescriptor],
        args: &ReduceArgs,
    ) -> Result<Vec<ShapeDescriptor>, NablaRustError> {
        expect_arity("reduce_prod_bp", "input shape", input_shapes.len(), 2)?;
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
        expect_arity("reduce_prod_bp", "input", inputs.len(), 2)?;
        expect_arity("reduce_prod_bp", "output", outputs.len(), 1)?;
        prod_bp_into(
            inputs[0],
            inputs[1],
            &args.axes,
            args.keep_dims,
            &mut outputs[0],
        )
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::check_tensor_near;

    fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor<f32> {
        Tensor::new(data, shape).expect("Test tensor creation failed")
    }

    #[test]
    fn test_prod_bp_values() {
        let input = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let epsilon = create_test_tensor(vec![10.0, 20.0], vec![2]);
        let result = prod_bp_op(&input, &epsilon, &[1], false).unwrap();
        // forward products [6, 120] combined with epsilon
        check_tensor_near(&result, &[2], &[60.0, 2400.0], 1e-4);
    }

    #[test]
    fn test_prod_bp_keep_dims() {
        let input = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let epsilon = create_test_tensor(vec![10.0, 20.0], vec![2, 1]);
        let result = prod_bp_op(&input, &epsilon, &[1], true).unwrap();
        check_tensor_near(&result, &[2, 1], &[60.0, 2400.0], 1e-4);
    }

    #[test]
    fn test_prod_bp_output_keeps_reduced_shape() {
        let input = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
        let epsilon = create_test_tensor(vec![1.0, 1.0], vec![2]);
        let result = prod_bp_op(&input, &epsilon, &[0], false).unwrap();
        // reduced shape, not the input's [2, 2]
        assert_eq!(result.shape(), &[2]);
    }

    #[test]
    fn test_prod_bp_epsilon_shape_mismatch() {
        let input = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let epsilon = create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]);
        let mut output = create::zeros(&[2]).unwrap();
        let err = prod_bp_into(&input, &epsilon, &[1], false, &mut output).unwrap_err();
        assert_eq!(
            err,
            NablaRustError::ShapeMismatch {
                expected: vec![3],
                actual: vec![2],
                operation: "reduce_prod_bp".to_string(),
            }
        );
    }

    #[test]
    fn test_prod_bp_nested_failure_propagates_verbatim() {
        let input = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
        let epsilon = create_test_tensor(vec![1.0, 1.0], vec![2]);
        let mut output = create::zeros(&[2]).unwrap();
        let err = prod_bp_into(&input, &epsilon, &[5], false, &mut output).unwrap_err();
        // the inner forward op's status, unwrapped
        assert_eq!(err, NablaRustError::AxisOutOfRange { axis: 5, rank: 2 });
    }

    #[test]
    fn test_prod_bp_through_registry_infers_reduced_shape() {
        use crate::ops::registry::OpRegistry;
        let registry = OpRegistry::<f32>::with_builtins();
        let op = registry.lookup("reduce_prod_bp").unwrap();

        let input = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
        let epsilon = create_test_tensor(vec![10.0, 20.0], vec![2]);
        let args = ReduceArgs::new(vec![1], false);

        let shapes = op
            .infer_shapes(
                &[input.shape_descriptor(), epsilon.shape_descriptor()],
                &args,
            )
            .unwrap();
        assert_eq!(shapes[0].dims(), &[2]);

        let mut outputs = vec![create::from_descriptor(&shapes[0], 0.0).unwrap()];
        op.execute(&[&input, &epsilon], &mut outputs, &args).unwrap();
        check_tensor_near(&outputs[0], &[2], &[60.0, 2400.0], 1e-4);
    }
}
