use crate::error::NablaRustError;
use crate::ops::reduction::utils::for_each_output_position;
use crate::ops::registry::{expect_arity, ReductionOp};
use crate::ops::ReduceArgs;
use crate::shape::infer::reduced_shape;
use crate::shape::validate::{reduction_mask, validate_axes};
use crate::shape::ShapeDescriptor;
use crate::tensor::{create, Tensor};
use crate::types::{count_as, Element};

/// Computes the biased (population) variance along the reduced axes into
/// `output`: the sum of squared deviations from the group mean, divided by
/// the group's element count (not count - 1).
///
/// `output` must already carry the inferred output shape, as with
/// [`prod_into`](crate::ops::reduction::prod::prod_into). Runs two
/// accumulation passes over the input: group means first, then squared
/// deviations.
pub fn variance_into<T: Element>(
    input: &Tensor<T>,
    axes: &[isize],
    keep_dims: bool,
    output: &mut Tensor<T>,
) -> Result<(), NablaRustError> {
    validate_axes(input.rank(), axes)?;
    let mask = reduction_mask(input.rank(), axes);

    let out_numel = output.numel();
    if out_numel == 0 || input.numel() == 0 {
        return Ok(());
    }
    let count = count_as::<T>(input.numel() / out_numel)?;
    let out_strides = output.strides().to_vec();

    let mut means = vec![T::zero(); out_numel];
    for_each_output_position(input, &mask, keep_dims, &out_strides, |flat, value| {
        means[flat] += value;
    });
    for mean in means.iter_mut() {
        *mean = *mean / count;
    }

    let out_buf = output.data_mut();
    for value in out_buf.iter_mut() {
        *value = T::zero();
    }
    for_each_output_position(input, &mask, keep_dims, &out_strides, |flat, value| {
        let deviation = value - means[flat];
        out_buf[flat] += deviation * deviation;
    });
    for value in out_buf.iter_mut() {
        *value = *value / count;
    }
    Ok(())
}

/// Infers the output shape, allocates the output tensor and runs the
/// variance reduction in one call.
pub fn variance_op<T: Element>(
    input: &Tensor<T>,
    axes: &[isize],
    keep_dims: bool,
) -> Result<Tensor<T>, NablaRustError> {
    let out_desc = reduced_shape(&input.shape_descriptor(), axes, keep_dims)?;
    let mut output = create::from_descriptor(&out_desc, T::zero())?;
    variance_into(input, axes, keep_dims, &mut output)?;
    Ok(output)
}

/// Forward biased-variance reduction, dispatched by name through the op
/// registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReduceVariance;

impl<T: Element> ReductionOp<T> for ReduceVariance {
    fn name(&self) -> &'static str {
        "reduce_variance"
    }

    fn infer_shapes(
        &self,
        input_shapes: &[ShapeDescriptor],
        args: &ReduceArgs,
    ) -> Result<Vec<ShapeDescriptor>, NablaRustError> {
        expect_arity("reduce_variance", "input shape", input_shapes.len(), 1)?;
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
        expect_arity("reduce_variance", "input", inputs.len(), 1)?;
        expect_arity("reduce_variance", "output", outputs.len(), 1)?;
        variance_into(inputs[0], &args.axes, args.keep_dims, &mut outputs[0])
    }
}
