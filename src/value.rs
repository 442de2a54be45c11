use std::fmt;
use std::str::FromStr;

/// A value that can be summed along a path and written to the serialized form of a tree
///
/// Implemented for every built-in integer type. The `Display` form of a scalar is never empty and
/// never contains a `,`, so the canonical encoding of a tree is always loss-less.
pub trait Scalar: Copy + Ord + fmt::Display + FromStr {
    /// The additive identity
    const ZERO: Self;

    /// Adds two values, clamping at the bounds of the type instead of overflowing
    fn saturating_add(self, other: Self) -> Self;
}

macro_rules! impl_scalar {
    ($($int:ty),* $(,)?) => {
        $(
            impl Scalar for $int {
                const ZERO: Self = 0;

                #[inline(always)]
                fn saturating_add(self, other: Self) -> Self {
                    <$int>::saturating_add(self, other)
                }
            }
        )*
    };
}

impl_scalar!(i8, i16, i32, i64, i128, isize);
impl_scalar!(u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_add_clamps() {
        assert_eq!(Scalar::saturating_add(i8::MAX, 1), i8::MAX);
        assert_eq!(Scalar::saturating_add(i32::MIN, -1), i32::MIN);
        assert_eq!(Scalar::saturating_add(3u8, 4), 7);
        assert_eq!(<i64 as Scalar>::ZERO, 0);
    }
}
