/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Approximate equality assertions for floating point data.

#[macro_use]
extern crate failure;

use std::fmt;
use crysym_array_types::{V3, M33};

pub const DEFAULT_NONZERO_TOL: f64 = 1e-9;

/// Assert that two values are close, using relative and absolute tolerances.
///
/// ```ignore
/// assert_close!(a, b);
/// assert_close!(abs=1e-8, a, b);
/// assert_close!(rel=1e-5, abs=1e-8, a, b, "while checking {}", what);
/// ```
#[macro_export]
macro_rules! assert_close {
    (rel=$rel:expr, abs=$abs:expr, $($rest:tt)+) => {
        $crate::assert_close!(@check [$rel, $abs] $($rest)+)
    };
    (abs=$abs:expr, rel=$rel:expr, $($rest:tt)+) => {
        $crate::assert_close!(@check [$rel, $abs] $($rest)+)
    };
    (abs=$abs:expr, $($rest:tt)+) => {
        $crate::assert_close!(@check [0.0, $abs] $($rest)+)
    };
    (rel=$rel:expr, $($rest:tt)+) => {
        $crate::assert_close!(@check [$rel, 0.0] $($rest)+)
    };
    (@check [$rel:expr, $abs:expr] $a:expr, $b:expr $(,)*) => {
        $crate::assert_close!(@check [$rel, $abs] $a, $b, "not nearly equal!")
    };
    (@check [$rel:expr, $abs:expr] $a:expr, $b:expr, $($fmt:tt)+) => {{
        let (a, b) = (&$a, &$b);
        let tol = $crate::Tolerances { rel: $rel, abs: $abs };
        if let Err(e) = $crate::CheckClose::check_close(a, b, tol) {
            panic!(
                "{} (tolerances: rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
                format!($($fmt)+), tol.rel, tol.abs, a, b, e,
            );
        }
    }};
    ($($rest:tt)+) => {
        $crate::assert_close!(@check [$crate::DEFAULT_NONZERO_TOL, 0.0] $($rest)+)
    };
}

/// Python's `math.isclose`.
#[doc(hidden)]
#[inline]
pub fn __is_close(a: f64, b: f64, Tolerances { abs, rel }: Tolerances) -> bool {
    assert!(rel >= 0.0);
    assert!(abs >= 0.0);

    // catch infinities of same sign
    if a == b { return true; }

    // catch infinities of opposite sign, avoiding infinite relative tolerance
    if a.is_infinite() || b.is_infinite() { return false; }

    (a - b).abs() <= abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Copy, Clone)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

#[derive(Debug, Fail)]
pub struct CheckCloseError {
    pub values: (f64, f64),
    pub tol: Tolerances,
}

impl fmt::Display for CheckCloseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (left, right) = self.values;
        write!(f, "failed at:\n  left: {:?}\n right: {:?}\n   tol: {:?}", left, right, self.tol)
    }
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    /// Test that all values of self and other are close.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

impl CheckClose for f64 {
    #[inline]
    fn check_close(&self, other: &f64, tol: Tolerances) -> Result<(), CheckCloseError> {
        match __is_close(*self, *other, tol) {
            true => Ok(()),
            false => Err(CheckCloseError { values: (*self, *other), tol }),
        }
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { CheckClose::check_close(*self, *other, tol) }
}

impl<T: CheckClose> CheckClose for [T] {
    fn check_close(&self, other: &[T], tol: Tolerances) -> Result<(), CheckCloseError>
    {
        assert_eq!(self.len(), other.len(), "length mismatch");
        self.iter().zip(other).map(|(a, b)| a.check_close(b, tol)).collect()
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    fn check_close(&self, other: &Vec<T>, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl<T: CheckClose> CheckClose for [T; 3] {
    fn check_close(&self, other: &[T; 3], tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl CheckClose for V3 {
    fn check_close(&self, other: &V3, tol: Tolerances) -> Result<(), CheckCloseError>
    { self.0.check_close(&other.0, tol) }
}

impl CheckClose for M33 {
    fn check_close(&self, other: &M33, tol: Tolerances) -> Result<(), CheckCloseError>
    { self.0.check_close(&other.0, tol) }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use crysym_array_types::V3;

    #[test]
    fn macro_output_can_compile() {
        assert_close!(1.0, 1.0);
        assert_close!(abs=1e-8, 1.0, 1.0);
        assert_close!(rel=1e-8, abs=1e-8, 1.0, 1.0);
        assert_close!(1.0, 1.0,);
        assert_close!(abs=1e-8, 1.0, 1.0, "with {}", "message");
    }

    #[test]
    fn vectors() {
        assert_close!(abs=1e-10, V3([0.0, 0.5, 1.0]), V3([1e-12, 0.5, 1.0]));
        assert_close!(vec![[1.0, 2.0, 3.0]], vec![[1.0, 2.0, 3.0 + 1e-12]]);
    }

    #[test]
    #[should_panic(expected = "not nearly equal")]
    fn detects_difference() {
        assert_close!(abs=1e-10, V3([0.0, 0.5, 1.0]), V3([0.0, 0.5, 1.1]));
    }
}
