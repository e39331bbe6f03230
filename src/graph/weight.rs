//! Numeric edge values.

use core::fmt::Debug;

use num_traits::Num;

/// Edge weight (or capacity) type.
///
/// Any copyable, partially ordered numeric type qualifies: `f64`, `f32`,
/// signed and unsigned integers, or `num-traits`-compatible rationals.
pub trait Weight: Num + Copy + PartialOrd + Debug {
    /// Returns `true` if the value is `>= 0`. `NaN` is not.
    #[inline]
    fn is_non_negative(&self) -> bool {
        *self >= Self::zero()
    }
}

impl<T> Weight for T where T: Num + Copy + PartialOrd + Debug {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative() {
        assert!(0.0f64.is_non_negative());
        assert!(3u32.is_non_negative());
        assert!(!(-1i64).is_non_negative());
        assert!(!f64::NAN.is_non_negative());
    }
}
