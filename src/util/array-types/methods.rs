/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::traits::{Semiring, Ring};
use crate::types::*;

// ---------------------------------------------------------------------------
// vectors

impl<X> V3<X> {
    /// Construct from a function on indices.
    #[inline(always)]
    pub fn from_fn<F>(mut f: F) -> Self
    where F: FnMut(usize) -> X,
    { V3([f(0), f(1), f(2)]) }

    /// Apply a function to each element.
    #[inline(always)]
    pub fn map<B, F>(self, mut f: F) -> V3<B>
    where F: FnMut(X) -> B,
    {
        let V3([a, b, c]) = self;
        V3([f(a), f(b), f(c)])
    }

    /// Apply a fallible function to each element.
    #[inline(always)]
    pub fn try_map<E, B, F>(self, mut f: F) -> Result<V3<B>, E>
    where F: FnMut(X) -> Result<B, E>,
    {
        let V3([a, b, c]) = self;
        Ok(V3([f(a)?, f(b)?, f(c)?]))
    }
}

impl<X: Semiring> V3<X> {
    #[inline(always)]
    pub fn zero() -> Self
    { V3([X::zero(); 3]) }

    #[inline]
    pub fn dot(&self, other: &Self) -> X
    { self[0] * other[0] + self[1] * other[1] + self[2] * other[2] }

    #[inline]
    pub fn sqnorm(&self) -> X
    { self.dot(self) }
}

impl V3<f64> {
    #[inline]
    pub fn norm(&self) -> f64
    { self.sqnorm().sqrt() }
}

/// Construct a vector from a function on indices.
#[inline(always)]
pub fn vee_from_fn<X, F>(f: F) -> V3<X>
where F: FnMut(usize) -> X,
{ V3::from_fn(f) }

/// Vector dot product.
#[inline(always)]
pub fn dot<X: Semiring>(a: &V3<X>, b: &V3<X>) -> X
{ a.dot(b) }

// ---------------------------------------------------------------------------
// matrices

impl<X> M33<X> {
    /// Construct from a function on `(row, col)`.
    #[inline(always)]
    pub fn from_fn<F>(mut f: F) -> Self
    where F: FnMut(usize, usize) -> X,
    { M3([
        V3([f(0, 0), f(0, 1), f(0, 2)]),
        V3([f(1, 0), f(1, 1), f(1, 2)]),
        V3([f(2, 0), f(2, 1), f(2, 2)]),
    ])}

    /// Apply a function to each element.
    #[inline]
    pub fn map<B, F>(self, mut f: F) -> M33<B>
    where F: FnMut(X) -> B,
    {
        let M3([a, b, c]) = self;
        M3([a.map(&mut f), b.map(&mut f), c.map(&mut f)])
    }

    /// Cast into a plain `[[X; 3]; 3]`.
    #[inline]
    pub fn into_array(self) -> [[X; 3]; 3]
    {
        let M3([V3(a), V3(b), V3(c)]) = self;
        [a, b, c]
    }
}

impl<X: Copy> M33<X> {
    /// Matrix transpose.
    #[inline]
    pub fn t(&self) -> Self
    { M33::from_fn(|r, c| self[c][r]) }

    /// Get a column as a vector.
    #[inline]
    pub fn col(&self, c: usize) -> V3<X>
    { V3([self[0][c], self[1][c], self[2][c]]) }
}

impl<X: Semiring> M33<X> {
    /// The identity matrix.
    #[inline]
    pub fn eye() -> Self
    { M33::from_fn(|r, c| if r == c { X::one() } else { X::zero() }) }

    /// The zero matrix.
    #[inline]
    pub fn zero() -> Self
    { M3([V3::zero(); 3]) }
}

impl<X: Ring> M33<X> {
    /// Matrix determinant.
    pub fn det(&self) -> X
    {
        let m = self;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }
}

/// Construct a matrix from an array of rows.
#[inline(always)]
pub fn from_array<X>(arr: [[X; 3]; 3]) -> M33<X>
{
    let [a, b, c] = arr;
    M3([V3(a), V3(b), V3(c)])
}

/// Construct a matrix from a function on `(row, col)`.
#[inline(always)]
pub fn from_fn<X, F>(f: F) -> M33<X>
where F: FnMut(usize, usize) -> X,
{ M33::from_fn(f) }

/// Construct an identity matrix.
#[inline(always)]
pub fn eye<X: Semiring>() -> M33<X>
{ M33::eye() }

/// Matrix inverse, by the adjugate.
///
/// Singular input produces non-finite elements.
pub fn inv(m: &M33<f64>) -> M33<f64>
{
    let cofactor = |r: usize, c: usize| {
        let (r1, r2) = ((r + 1) % 3, (r + 2) % 3);
        let (c1, c2) = ((c + 1) % 3, (c + 2) % 3);
        m[r1][c1] * m[r2][c2] - m[r1][c2] * m[r2][c1]
    };
    let det = m.det();
    // adjugate is the transpose of the cofactor matrix
    M33::from_fn(|r, c| cofactor(c, r) / det)
}
