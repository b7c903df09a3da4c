use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use auto_impl_ops::auto_ops;
use num_traits::{MulAdd, One, ToPrimitive, Zero};

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct F2(bool);

impl<I> From<I> for F2
where I: ToPrimitive {
    fn from(a: I) -> Self {
        let b = a.to_i64().unwrap() % 2 != 0;
        Self(b)
    }
}

impl Display for F2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 {
            write!(f, "1")
        } else {
            write!(f, "0")
        }
    }
}

impl Debug for F2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Zero for F2 {
    fn zero() -> Self {
        Self(false)
    }

    fn is_zero(&self) -> bool {
        !self.0
    }
}

impl One for F2 {
    fn one() -> Self {
        Self(true)
    }

    fn is_one(&self) -> bool {
        self.0
    }
}

impl Neg for F2 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self
    }
}

impl Neg for &F2 {
    type Output = F2;
    fn neg(self) -> Self::Output {
        *self
    }
}

#[auto_ops]
impl<'a, 'b> Add<&'b F2> for &'a F2 {
    type Output = F2;
    fn add(self, rhs: &'b F2) -> Self::Output {
        F2(self.0 != rhs.0)
    }
}

#[auto_ops]
impl<'a, 'b> Sub<&'b F2> for &'a F2 {
    type Output = F2;
    fn sub(self, rhs: &'b F2) -> Self::Output {
        Add::add(self, rhs)
    }
}

#[auto_ops]
impl<'a, 'b> Mul<&'b F2> for &'a F2 {
    type Output = F2;
    fn mul(self, rhs: &'b F2) -> Self::Output {
        F2(self.0 && rhs.0)
    }
}

#[auto_ops]
impl<'a, 'b> Div<&'b F2> for &'a F2 {
    type Output = F2;
    fn div(self, rhs: &'b F2) -> Self::Output {
        assert!(!rhs.is_zero());
        *self
    }
}

#[auto_ops]
impl<'a, 'b> Rem<&'b F2> for &'a F2 {
    type Output = F2;
    fn rem(self, rhs: &'b F2) -> Self::Output {
        assert!(!rhs.is_zero());
        F2::zero()
    }
}

// enables sprs::MulAcc through its blanket impl, so CsMat<F2> products work.
impl MulAdd for F2 {
    type Output = F2;
    fn mul_add(self, a: Self, b: Self) -> Self::Output {
        self * a + b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init() {
        assert!(F2::from(0).is_zero());
        assert!(F2::from(1).is_one());
        assert!(F2::from(2).is_zero());
        assert!(F2::from(-3).is_one());
    }

    #[test]
    fn display() {
        assert_eq!(F2::zero().to_string(), "0");
        assert_eq!(F2::one().to_string(), "1");
    }

    #[test]
    fn add() {
        assert_eq!(F2::one() + F2::one(), F2::zero());
        assert_eq!(F2::one() + F2::zero(), F2::one());

        let mut a = F2::one();
        a += F2::one();
        assert!(a.is_zero());
    }

    #[test]
    fn mul() {
        assert_eq!(F2::one() * F2::one(), F2::one());
        assert_eq!(F2::one() * F2::zero(), F2::zero());
    }

    #[test]
    fn mul_add() {
        assert_eq!(F2::one().mul_add(F2::one(), F2::one()), F2::zero());
        assert_eq!(F2::one().mul_add(F2::zero(), F2::one()), F2::one());
    }
}
