/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::ops::{Add, Sub, Neg, Mul, Div, AddAssign, SubAssign};

use crate::traits::{Semiring, Ring, Field};
use crate::types::*;

// NOTE: Operator impls are deliberately between same-typed operands.
//       Mixed-scalar impls (V3<i32> + V3<f64>) are not provided; use `map`.

// ---------------------------------------------------------------------------
// vector-vector ops

macro_rules! impl_v_binops {
    ($( [$($lt:lifetime)*] ($($ra:tt)*) ($($rb:tt)*); )*) => {$(
        impl<$($lt,)* X: Semiring> Add<$($rb)* V3<X>> for $($ra)* V3<X> {
            type Output = V3<X>;

            #[inline]
            fn add(self, other: $($rb)* V3<X>) -> V3<X>
            { V3([self[0] + other[0], self[1] + other[1], self[2] + other[2]]) }
        }

        impl<$($lt,)* X: Ring> Sub<$($rb)* V3<X>> for $($ra)* V3<X> {
            type Output = V3<X>;

            #[inline]
            fn sub(self, other: $($rb)* V3<X>) -> V3<X>
            { V3([self[0] - other[0], self[1] - other[1], self[2] - other[2]]) }
        }
    )*};
}

impl_v_binops! {
    [] () ();
    ['b] () (&'b);
    ['a] (&'a) ();
    ['a 'b] (&'a) (&'b);
}

impl<X: Ring> Neg for V3<X> {
    type Output = V3<X>;

    #[inline]
    fn neg(self) -> V3<X>
    { V3([-self[0], -self[1], -self[2]]) }
}

impl<'a, X: Ring> Neg for &'a V3<X> {
    type Output = V3<X>;

    #[inline]
    fn neg(self) -> V3<X>
    { -*self }
}

impl<X: Semiring, B> AddAssign<B> for V3<X> where for<'a> &'a V3<X>: Add<B, Output=V3<X>> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: B)
    { *self = &*self + rhs; }
}

impl<X: Ring, B> SubAssign<B> for V3<X> where for<'a> &'a V3<X>: Sub<B, Output=V3<X>> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: B)
    { *self = &*self - rhs; }
}

// ---------------------------------------------------------------------------
// vector-scalar ops

impl<X: Semiring> Mul<X> for V3<X> {
    type Output = V3<X>;

    #[inline]
    fn mul(self, scalar: X) -> V3<X>
    { V3([self[0] * scalar, self[1] * scalar, self[2] * scalar]) }
}

impl<'a, X: Semiring> Mul<X> for &'a V3<X> {
    type Output = V3<X>;

    #[inline]
    fn mul(self, scalar: X) -> V3<X>
    { *self * scalar }
}

impl<X: Field> Div<X> for V3<X> {
    type Output = V3<X>;

    #[inline]
    fn div(self, scalar: X) -> V3<X>
    { V3([self[0] / scalar, self[1] / scalar, self[2] / scalar]) }
}

// ---------------------------------------------------------------------------
// matrix-vector ops

// row vector * matrix
impl<'v, 'm, X: Semiring> Mul<&'m M33<X>> for &'v V3<X> {
    type Output = V3<X>;

    #[inline]
    fn mul(self, m: &'m M33<X>) -> V3<X>
    {
        let mut out = V3([X::zero(); 3]);
        for c in 0..3 {
            for k in 0..3 {
                out[c] = out[c] + self[k] * m[k][c];
            }
        }
        out
    }
}

impl<'m, X: Semiring> Mul<&'m M33<X>> for V3<X> {
    type Output = V3<X>;

    #[inline(always)]
    fn mul(self, m: &'m M33<X>) -> V3<X>
    { &self * m }
}

// matrix * column vector
impl<'v, 'm, X: Semiring> Mul<&'v V3<X>> for &'m M33<X> {
    type Output = V3<X>;

    #[inline]
    fn mul(self, v: &'v V3<X>) -> V3<X>
    { V3([self[0].dot(v), self[1].dot(v), self[2].dot(v)]) }
}

impl<'m, X: Semiring> Mul<V3<X>> for &'m M33<X> {
    type Output = V3<X>;

    #[inline(always)]
    fn mul(self, v: V3<X>) -> V3<X>
    { self * &v }
}

// ---------------------------------------------------------------------------
// matrix-matrix ops

impl<'a, 'b, X: Semiring> Mul<&'b M33<X>> for &'a M33<X> {
    type Output = M33<X>;

    #[inline]
    fn mul(self, other: &'b M33<X>) -> M33<X>
    { M3([&self[0] * other, &self[1] * other, &self[2] * other]) }
}

impl<X: Semiring> Mul<M33<X>> for M33<X> {
    type Output = M33<X>;

    #[inline(always)]
    fn mul(self, other: M33<X>) -> M33<X>
    { &self * &other }
}

impl<'a, X: Ring> Neg for &'a M33<X> {
    type Output = M33<X>;

    #[inline]
    fn neg(self) -> M33<X>
    { M3([-self[0], -self[1], -self[2]]) }
}

impl<X: Ring> Neg for M33<X> {
    type Output = M33<X>;

    #[inline(always)]
    fn neg(self) -> M33<X>
    { -&self }
}
