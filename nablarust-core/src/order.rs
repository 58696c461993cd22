/// Memory layout of a tensor's data buffer.
///
/// Determines how contiguous strides are computed from a shape. Shape
/// inference propagates the input's order to the output descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemoryOrder {
    /// Last axis varies fastest in memory (C order). This is the default.
    #[default]
    RowMajor,
    /// First axis varies fastest in memory (Fortran order).
    ColMajor,
}
