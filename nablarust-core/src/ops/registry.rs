//! Explicit name-to-operator registry.
//!
//! Maps an op name to an object exposing the two phases every reduction op
//! implements. The embedding executor builds the registry once at startup
//! (e.g. via [`OpRegistry::with_builtins`]) and queries it by name
//! thereafter; nothing here is discovered or expanded at compile time.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::NablaRustError;
use crate::ops::reduction::{ReduceProd, ReduceProdBp, ReduceVariance, ReduceVarianceBp};
use crate::ops::ReduceArgs;
use crate::shape::ShapeDescriptor;
use crate::tensor::Tensor;
use crate::types::Element;

/// A reduction operator usable inside a computation graph.
///
/// Implementations must keep the two phases consistent: for valid arguments
/// `infer_shapes` predicts exactly the shapes `execute` fills, and both
/// phases reject invalid axis arguments with the same diagnostics.
pub trait ReductionOp<T: Element>: Debug + Send + Sync {
    /// Name the op registers under.
    fn name(&self) -> &'static str;

    /// Pure shape inference over the inputs' shape descriptors. Touches no
    /// tensor data; returns one descriptor per declared output.
    fn infer_shapes(
        &self,
        input_shapes: &[ShapeDescriptor],
        args: &ReduceArgs,
    ) -> Result<Vec<ShapeDescriptor>, NablaRustError>;

    /// Data-bearing execution into outputs pre-shaped by a prior
    /// `infer_shapes` call. Mutates only the output buffers.
    fn execute(
        &self,
        inputs: &[&Tensor<T>],
        outputs: &mut [Tensor<T>],
        args: &ReduceArgs,
    ) -> Result<(), NablaRustError>;
}

pub(crate) fn expect_arity(
    operation: &str,
    kind: &str,
    actual: usize,
    expected: usize,
) -> Result<(), NablaRustError> {
    if actual != expected {
        return Err(NablaRustError::InvalidArguments {
            operation: operation.to_string(),
            message: format!("expected {} {}(s), got {}", expected, kind, actual),
        });
    }
    Ok(())
}

/// Table of reduction ops keyed by name.
#[derive(Debug)]
pub struct OpRegistry<T: Element> {
    ops: HashMap<&'static str, Arc<dyn ReductionOp<T>>>,
}

impl<T: Element> OpRegistry<T> {
    pub fn new() -> Self {
        OpRegistry {
            ops: HashMap::new(),
        }
    }

    /// Registry preloaded with the built-in reduction ops.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ReduceProd));
        registry.register(Arc::new(ReduceVariance));
        registry.register(Arc::new(ReduceProdBp));
        registry.register(Arc::new(ReduceVarianceBp));
        registry
    }

    /// Registers `op` under its own name, replacing any previous entry.
    pub fn register(&mut self, op: Arc<dyn ReductionOp<T>>) {
        log::debug!("registering reduction op '{}'", op.name());
        self.ops.insert(op.name(), op);
    }

    /// Looks up an op by name.
    pub fn lookup(&self, name: &str) -> Result<&Arc<dyn ReductionOp<T>>, NablaRustError> {
        self.ops
            .get(name)
            .ok_or_else(|| NablaRustError::UnknownOp(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl<T: Element> Default for OpRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
