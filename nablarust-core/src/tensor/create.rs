// src/tensor/create.rs

use crate::error::NablaRustError;
use crate::shape::ShapeDescriptor;
use crate::tensor::Tensor;
use crate::types::{count_as, Element};
use num_traits::{Float, ToPrimitive};
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use rand_distr::StandardNormal;

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros<T: Element>(shape: &[usize]) -> Result<Tensor<T>, NablaRustError> {
    full(shape, T::zero())
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones<T: Element>(shape: &[usize]) -> Result<Tensor<T>, NablaRustError> {
    full(shape, T::one())
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full<T: Element>(shape: &[usize], value: T) -> Result<Tensor<T>, NablaRustError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new tensor filled with zeros, with the same shape and memory
/// order as the input tensor.
pub fn zeros_like<T: Element>(tensor: &Tensor<T>) -> Result<Tensor<T>, NablaRustError> {
    Tensor::with_order(
        tensor.order(),
        vec![T::zero(); tensor.numel()],
        tensor.shape().to_vec(),
    )
}

/// Creates a new tensor filled with ones, with the same shape and memory
/// order as the input tensor.
pub fn ones_like<T: Element>(tensor: &Tensor<T>) -> Result<Tensor<T>, NablaRustError> {
    Tensor::with_order(
        tensor.order(),
        vec![T::one(); tensor.numel()],
        tensor.shape().to_vec(),
    )
}

/// Allocates a tensor for the shape a shape-inference pass produced,
/// filled with `value`. This is how an executor turns an inferred output
/// descriptor into the pre-shaped output slot an op writes into.
pub fn from_descriptor<T: Element>(
    desc: &ShapeDescriptor,
    value: T,
) -> Result<Tensor<T>, NablaRustError> {
    Tensor::with_order(desc.order(), vec![value; desc.numel()], desc.dims().to_vec())
}

/// Creates a 1-D tensor of evenly stepped values in `[start, end)`.
pub fn arange<T>(start: T, end: T, step: T) -> Result<Tensor<T>, NablaRustError>
where
    T: Element + Float,
{
    if (end > start && step <= T::zero()) || (end < start && step >= T::zero()) || step == T::zero()
    {
        return Err(NablaRustError::UnsupportedOperation(format!(
            "Invalid step {:?} for arange({:?}, {:?})",
            step, start, end
        )));
    }
    let numel = ((end - start) / step).ceil().to_usize().ok_or_else(|| {
        NablaRustError::InternalError("arange element count does not fit in usize".to_string())
    })?;
    let mut data = Vec::with_capacity(numel);
    for i in 0..numel {
        data.push(start + count_as::<T>(i)? * step);
    }
    Tensor::new(data, vec![numel])
}

/// Creates a 1-D tensor of `steps` values evenly spaced from `start` to `end`
/// inclusive.
pub fn linspace<T>(start: T, end: T, steps: usize) -> Result<Tensor<T>, NablaRustError>
where
    T: Element + Float,
{
    if steps < 2 {
        return Err(NablaRustError::UnsupportedOperation(
            "Linspace requires at least 2 steps".to_string(),
        ));
    }
    let step_size = (end - start) / count_as::<T>(steps - 1)?;
    let mut data = Vec::with_capacity(steps);
    for i in 0..steps {
        data.push(start + count_as::<T>(i)? * step_size);
    }
    Tensor::new(data, vec![steps])
}

/// Creates a tensor of uniform samples from `[0, 1)`.
pub fn rand<T>(shape: &[usize]) -> Result<Tensor<T>, NablaRustError>
where
    T: Element,
    Standard: Distribution<T>,
{
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data: Vec<T> = (0..numel).map(|_| rng.gen()).collect();
    Tensor::new(data, shape.to_vec())
}

/// Creates a tensor of standard-normal samples.
pub fn randn<T>(shape: &[usize]) -> Result<Tensor<T>, NablaRustError>
where
    T: Element,
    StandardNormal: Distribution<T>,
{
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data: Vec<T> = (0..numel).map(|_| StandardNormal.sample(&mut rng)).collect();
    Tensor::new(data, shape.to_vec())
}
