pub mod create;
pub mod utils;

use crate::error::NablaRustError;
use crate::order::MemoryOrder;
use crate::shape::ShapeDescriptor;
use crate::types::Element;
use utils::calculate_strides;

// Re-export creation functions to make them accessible as `tensor::zeros` etc.
pub use create::{full, ones, ones_like, zeros, zeros_like};

/// A multi-dimensional array with an owned data buffer.
///
/// Invariants:
/// - `data.len()` equals the product of the extents in `shape`; a rank-0
///   tensor is a scalar holding exactly one element.
/// - `strides` are the contiguous strides of `shape` in `order`.
///
/// Ops borrow their inputs immutably and their output exclusively, so a
/// single op invocation can never race with itself or with another op on
/// the same tensors.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    data: Vec<T>,
    shape: Vec<usize>,
    strides: Vec<usize>,
    order: MemoryOrder,
}

impl<T: Element> Tensor<T> {
    /// Creates a new row-major tensor from a flat data vector and a shape.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> Result<Self, NablaRustError> {
        Self::with_order(MemoryOrder::RowMajor, data, shape)
    }

    /// Creates a new tensor with an explicit memory order.
    pub fn with_order(
        order: MemoryOrder,
        data: Vec<T>,
        shape: Vec<usize>,
    ) -> Result<Self, NablaRustError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(NablaRustError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        let strides = calculate_strides(order, &shape);
        Ok(Tensor {
            data,
            shape,
            strides,
            order,
        })
    }

    /// Creates a rank-0 tensor holding a single value.
    pub fn scalar(value: T) -> Self {
        Tensor {
            data: vec![value],
            shape: vec![],
            strides: vec![],
            order: MemoryOrder::default(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total element count.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn order(&self) -> MemoryOrder {
        self.order
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// The shape-only projection of this tensor. Allocates no data and the
    /// returned descriptor is independent of this tensor's lifetime.
    pub fn shape_descriptor(&self) -> ShapeDescriptor {
        ShapeDescriptor::new(self.order, self.shape.clone())
    }

    /// Value at the given coordinates, or `None` if the coordinates do not
    /// address an element.
    pub fn get(&self, coords: &[usize]) -> Option<T> {
        if coords.len() != self.rank() {
            return None;
        }
        let mut offset = 0;
        for (dim, (&coord, &extent)) in coords.iter().zip(self.shape.iter()).enumerate() {
            if coord >= extent {
                return None;
            }
            offset += coord * self.strides[dim];
        }
        Some(self.data[offset])
    }
}
