//! Launch-parameter computation for parallel dispatch.

/// Tuning parameters for a flat (1-D) parallel dispatch over `length`
/// elements, given the device's multiprocessor count, cores per
/// multiprocessor and shared-memory budget.
///
/// The tuning policy is not implemented yet: every call returns the fixed
/// triple `(1, 2, 3)` regardless of its inputs. The signature is the seam a
/// real policy plugs into.
pub fn flat_launch_params(
    _length: usize,
    _multiprocessors: usize,
    _cores_per_multiprocessor: usize,
    _shared_memory: usize,
) -> (usize, usize, usize) {
    (1, 2, 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_ignores_inputs() {
        assert_eq!(flat_launch_params(0, 0, 0, 0), (1, 2, 3));
        assert_eq!(flat_launch_params(1 << 20, 80, 64, 49152), (1, 2, 3));
    }
}
