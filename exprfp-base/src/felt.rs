//! Arithmetic over the Mersenne prime field of order 2^61 - 1.

use std::{
    fmt,
    iter::{Product, Sum},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use ff::Field;
use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::error::FieldError;

/// The field prime, 2^61 - 1.
pub const MODULUS: u64 = (1 << 61) - 1;

/// Exponent that maps a quadratic residue to one of its square roots. Valid because the prime is
/// congruent to 3 modulo 4.
const SQRT_EXP: u64 = (MODULUS + 1) / 4;

/// Folds a value below 2^64 into the field with a single Mersenne step.
#[inline]
const fn reduce(v: u64) -> u64 {
    let folded = (v & MODULUS) + (v >> 61);
    if folded >= MODULUS {
        folded - MODULUS
    } else {
        folded
    }
}

/// Reduces the product of two field elements. The input is below 2^122.
#[inline]
fn reduce_wide(v: u128) -> u64 {
    let lo = (v as u64) & MODULUS;
    let hi = (v >> 61) as u64;
    reduce(lo + hi)
}

/// Represents a field element.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Felt(u64);

impl Felt {
    pub const ZERO: Felt = Felt(0);
    pub const ONE: Felt = Felt(1);

    /// Creates a field element from any `u64`, reducing it modulo the prime.
    pub const fn new(v: u64) -> Self {
        Self(reduce(v))
    }

    /// Returns the canonical representative, always in `[0, MODULUS)`.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Raises the element to the given power by square and multiply.
    pub fn exp(self, mut e: u64) -> Self {
        let mut base = self;
        let mut acc = Felt::ONE;
        while e > 0 {
            if e & 1 == 1 {
                acc *= base;
            }
            base *= base;
            e >>= 1;
        }
        acc
    }

    /// Computes the multiplicative inverse with Fermat's little theorem.
    ///
    /// Zero has no inverse and yields [`FieldError::DivisionByZeroInField`].
    pub fn inverse(self) -> Result<Self, FieldError> {
        if self.0 == 0 {
            return Err(FieldError::DivisionByZeroInField);
        }
        Ok(self.exp(MODULUS - 2))
    }
}

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<u32> for Felt {
    fn from(value: u32) -> Self {
        Self(value.into())
    }
}

impl From<Felt> for u64 {
    fn from(value: Felt) -> Self {
        value.0
    }
}

impl fmt::Debug for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//===----------------------------------------------------------------------===//
// Operators
//===----------------------------------------------------------------------===//

impl Add for Felt {
    type Output = Felt;

    fn add(self, rhs: Self) -> Self::Output {
        let sum = self.0 + rhs.0;
        Self(if sum >= MODULUS { sum - MODULUS } else { sum })
    }
}

impl Sub for Felt {
    type Output = Felt;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.0 >= rhs.0 {
            Self(self.0 - rhs.0)
        } else {
            Self(self.0 + MODULUS - rhs.0)
        }
    }
}

impl Mul for Felt {
    type Output = Felt;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(reduce_wide(self.0 as u128 * rhs.0 as u128))
    }
}

impl Neg for Felt {
    type Output = Felt;

    fn neg(self) -> Self::Output {
        Felt::ZERO - self
    }
}

/// Derives the by-reference and assigning variants of a binary operator.
macro_rules! derive_ref_ops {
    ($($op:ident::$mthd:ident, $op_assign:ident::$mthd_assign:ident);+ $(;)?) => {
        $(
            impl<'a> $op<&'a Felt> for Felt {
                type Output = Felt;

                fn $mthd(self, rhs: &'a Felt) -> Self::Output {
                    $op::$mthd(self, *rhs)
                }
            }

            impl $op_assign for Felt {
                fn $mthd_assign(&mut self, rhs: Felt) {
                    *self = $op::$mthd(*self, rhs);
                }
            }

            impl<'a> $op_assign<&'a Felt> for Felt {
                fn $mthd_assign(&mut self, rhs: &'a Felt) {
                    *self = $op::$mthd(*self, *rhs);
                }
            }
        )+
    };
}

derive_ref_ops! {
    Add::add, AddAssign::add_assign;
    Sub::sub, SubAssign::sub_assign;
    Mul::mul, MulAssign::mul_assign;
}

impl Sum for Felt {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Felt::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Felt> for Felt {
    fn sum<I: Iterator<Item = &'a Felt>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Product for Felt {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Felt::ONE, Mul::mul)
    }
}

impl<'a> Product<&'a Felt> for Felt {
    fn product<I: Iterator<Item = &'a Felt>>(iter: I) -> Self {
        iter.copied().product()
    }
}

//===----------------------------------------------------------------------===//
// ff integration
//===----------------------------------------------------------------------===//

impl ConditionallySelectable for Felt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(u64::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for Felt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Field for Felt {
    const ZERO: Self = Felt::ZERO;

    const ONE: Self = Felt::ONE;

    fn random(mut rng: impl RngCore) -> Self {
        // 2^61 - 1 is the only masked value outside the field.
        loop {
            let v = rng.next_u64() & MODULUS;
            if v < MODULUS {
                return Self(v);
            }
        }
    }

    fn square(&self) -> Self {
        *self * *self
    }

    fn double(&self) -> Self {
        *self + *self
    }

    fn invert(&self) -> CtOption<Self> {
        let is_some = !self.ct_eq(&Felt::ZERO);
        CtOption::new(self.inverse().unwrap_or(Felt::ZERO), is_some)
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        let Ok(div_inv) = div.inverse() else {
            return (num.ct_eq(&Felt::ZERO), Felt::ZERO);
        };
        let ratio = *num * div_inv;
        let root = ratio.exp(SQRT_EXP);
        if root.square() == ratio {
            return (Choice::from(1), root);
        }
        // -1 is the 2-adic root of unity of this field.
        (Choice::from(0), (-ratio).exp(SQRT_EXP))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rand::{SeedableRng, rngs::StdRng};
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(MODULUS, 0)]
    #[case(MODULUS + 1, 1)]
    #[case(u64::MAX, u64::MAX % MODULUS)]
    #[case(1 << 61, 1)]
    fn new_reduces(#[case] input: u64, #[case] expected: u64) {
        assert_eq!(Felt::new(input).value(), expected);
    }

    #[test]
    fn sub_wraps_around() {
        assert_eq!(Felt::new(3) - Felt::new(5), Felt::new(MODULUS - 2));
    }

    #[test]
    fn minus_one_squared_is_one() {
        let minus_one = -Felt::ONE;
        assert_eq!(minus_one.value(), MODULUS - 1);
        assert_eq!(minus_one * minus_one, Felt::ONE);
    }

    #[test]
    fn largest_product_does_not_overflow() {
        let big = Felt::new(MODULUS - 1);
        let half = Felt::new(1 << 60);
        // (2^60)^2 = 2^120 = 2^(61 * 1 + 59) = 2^59 (mod 2^61 - 1)
        assert_eq!(half * half, Felt::new(1 << 59));
        assert_eq!(big * half, -half);
    }

    #[test]
    fn inverse_of_zero_fails() {
        assert_eq!(
            Felt::ZERO.inverse(),
            Err(FieldError::DivisionByZeroInField)
        );
        assert!(bool::from(Field::invert(&Felt::ZERO).is_none()));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(2654435761)]
    #[case(MODULUS - 1)]
    fn inverse_round_trip(#[case] v: u64) {
        let f = Felt::new(v);
        assert_eq!(f * f.inverse().unwrap(), Felt::ONE);
    }

    #[test]
    fn fermat_little_theorem() {
        let f = Felt::new(123456789);
        assert_eq!(f.exp(MODULUS - 1), Felt::ONE);
        assert_eq!(f.exp(0), Felt::ONE);
    }

    #[test]
    fn sqrt_of_square() {
        let f = Felt::new(987654321);
        let root = Field::sqrt(&f.square()).unwrap();
        assert!(root == f || root == -f);
    }

    #[test]
    fn minus_one_is_not_a_square() {
        let (is_square, _) = Felt::sqrt_ratio(&-Felt::ONE, &Felt::ONE);
        assert!(!bool::from(is_square));
    }

    #[test]
    fn random_is_reduced() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            assert!(Felt::random(&mut rng).value() < MODULUS);
        }
    }

    #[quickcheck]
    fn add_commutes(a: u64, b: u64) -> bool {
        Felt::new(a) + Felt::new(b) == Felt::new(b) + Felt::new(a)
    }

    #[quickcheck]
    fn mul_commutes(a: u64, b: u64) -> bool {
        Felt::new(a) * Felt::new(b) == Felt::new(b) * Felt::new(a)
    }

    #[quickcheck]
    fn mul_distributes_over_add(a: u64, b: u64, c: u64) -> bool {
        let (a, b, c) = (Felt::new(a), Felt::new(b), Felt::new(c));
        a * (b + c) == a * b + a * c
    }

    #[quickcheck]
    fn sub_undoes_add(a: u64, b: u64) -> bool {
        let (a, b) = (Felt::new(a), Felt::new(b));
        (a + b) - b == a
    }

    #[quickcheck]
    fn mul_matches_wide_modulo(a: u64, b: u64) -> bool {
        let (a, b) = (Felt::new(a), Felt::new(b));
        let expected = (a.value() as u128 * b.value() as u128) % MODULUS as u128;
        (a * b).value() as u128 == expected
    }

    #[quickcheck]
    fn inverse_cancels(a: u64) -> bool {
        let a = Felt::new(a);
        match a.inverse() {
            Ok(inv) => a * inv == Felt::ONE,
            Err(_) => a == Felt::ZERO,
        }
    }
}
