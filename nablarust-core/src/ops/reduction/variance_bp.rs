use crate::error::NablaRustError;
use crate::ops::broadcast::broadcast_into;
use crate::ops::registry::{expect_arity, ReductionOp};
use crate::ops::ReduceArgs;
use crate::shape::infer::reduced_shape;
use crate::shape::validate::validate_axes;
use crate::shape::ShapeDescriptor;
use crate::tensor::utils::calculate_strides;
use crate::tensor::{create, Tensor};
use crate::types::{count_as, Element};

/// Propagates an upstream variance gradient back to the input's shape.
///
/// `grad_in` has the input's pre-reduction shape regardless of `keep_dims`.
///
/// When the upstream gradient is a scalar (fully reduced forward pass),
/// every input position receives `grad / input.numel()`. Dividing by the
/// input length is the exact derivative of a *mean* reduction, not of
/// variance; the behavior is a known approximation kept intact rather than
/// silently corrected.
///
/// Otherwise the upstream gradient is reinterpreted in the keep-dims shape
/// the inferencer predicts for the same axis arguments (a shape-only
/// reinterpretation, no data copy), scaled by
/// `grad_out.numel() / input.numel()`, and broadcast across the collapsed
/// axes onto `grad_in`.
pub fn variance_bp_into<T: Element>(
    input: &Tensor<T>,
    grad_out: &Tensor<T>,
    axes: &[isize],
    keep_dims: bool,
    grad_in: &mut Tensor<T>,
) -> Result<(), NablaRustError> {
    validate_axes(input.rank(), axes)?;

    if grad_out.numel() == 1 {
        log::debug!(
            "variance backward: scalar upstream gradient spread over {} elements",
            input.numel()
        );
        let length = count_as::<T>(input.numel())?;
        let spread = grad_out.data()[0] / length;
        for value in grad_in.data_mut() {
            *value = spread;
        }
        return Ok(());
    }

    // keep-dims shape of the forward output: the reshape target for grad_out
    let keep_desc = reduced_shape(&input.shape_descriptor(), axes, true)?;
    if grad_out.numel() != keep_desc.numel() {
        return Err(NablaRustError::ShapeMismatch {
            expected: keep_desc.dims().to_vec(),
            actual: grad_out.shape().to_vec(),
            operation: "reduce_variance_bp (gradient reshape)".to_string(),
        });
    }

    let scale = count_as::<T>(grad_out.numel())? / count_as::<T>(input.numel())?;
    let scaled: Vec<T> = grad_out.data().iter().map(|&g| g * scale).collect();

    let keep_strides = calculate_strides(keep_desc.order(), keep_desc.dims());
    let target_shape = grad_in.shape().to_vec();
    let target_strides = grad_in.strides().to_vec();
    broadcast_into(
        &target_shape,
        &target_strides,
        grad_in.data_mut(),
        &scaled,
        keep_desc.dims(),
        &keep_strides,
    )
}

/// Allocates the gradient tensor in the input's shape and runs the variance
/// backward pass in one call.
pub fn variance_bp_op<T: Element>(
    input: &Tensor<T>,
    grad_out: &Tensor<T>,
    axes: &[isize],
    keep_dims: bool,
) -> Result<Tensor<T>, NablaRustError> {
    let mut grad_in = create::zeros_like(input)?;
    variance_bp_into(input, grad_out, axes, keep_dims, &mut grad_in)?;
    Ok(grad_in)
}

/// Variance gradient op. Declares its output in the *input's* shape, unlike
/// [`ReduceProdBp`](crate::ops::reduction::prod_bp::ReduceProdBp) which
/// declares the reduced shape; each op's convention is preserved as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReduceVarianceBp;

impl<T: Element> ReductionOp<T> for ReduceVarianceBp {
    fn name(&self) -> &'static str {
        "reduce_variance_bp"
    }

    fn infer_shapes(
        &self,
        input_shapes: &[ShapeDescriptor],
        args: &ReduceArgs,
    ) -> Result<Vec<ShapeDescriptor>, NablaRustError> {
        expect_arity("reduce_variance_bp", "input shape", input_shapes.len(), 2)?;
        validate_axes(input_shapes[0].rank(), &args.axes)?;
        Ok(vec![input_shapes[0].clone()])
    }

    fn execute(
        &self,
        inputs: &[&Tensor<T>],
        outputs: &mut [Tensor<T>],
        args: &ReduceArgs,
    ) -> Result<(), NablaRustError> {
        expect_arity("reduce_variance_bp", "input", inputs.len(), 2)?;
        expect_arity("reduce_variance_bp", "output", outputs.len(), 1)?;
        variance_bp_into(
            inputs[0],
            inputs[1],
            &args.axes,
            args.keep_dims,
            &mut outputs[0],
        )
    }
}
