//! # Reduction Operators Module (`ops`)
//!
//! Every operator here obeys the same two-phase contract:
//!
//! - **Shape inference** maps input [`ShapeDescriptor`](crate::shape::ShapeDescriptor)s
//!   plus the op arguments to output descriptors without touching data.
//! - **Execution** consumes tensors pre-shaped to exactly what inference
//!   predicted and fills the output buffers.
//!
//! Axis validation is shared between the phases so they cannot diverge on
//! validity. Forward ops live in [`reduction`] next to their gradient
//! counterparts; name-based dispatch goes through [`registry`].

pub(crate) mod broadcast;
pub mod reduction;
pub mod registry;

/// Argument bundle recognized by every reduction op instance.
///
/// `axes` lists the dimensions to collapse, each either a non-negative
/// index below the rank or a negative index counted from the end; an empty
/// list collapses every axis. `keep_dims` retains reduced axes as extent-1
/// dimensions instead of removing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReduceArgs {
    pub axes: Vec<isize>,
    pub keep_dims: bool,
}

impl ReduceArgs {
    pub fn new(axes: Vec<isize>, keep_dims: bool) -> Self {
        ReduceArgs { axes, keep_dims }
    }
}
