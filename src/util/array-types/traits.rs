/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::ops::{Add, Sub, Mul, Div, Neg};
use num_traits::{Zero, One};

/// Scalars that support addition and multiplication.
pub trait Semiring: Copy + PartialEq + Zero + One + Add<Output=Self> + Mul<Output=Self> {}

/// A `Semiring` with subtraction and negation.
pub trait Ring: Semiring + Sub<Output=Self> + Neg<Output=Self> {}

/// A `Ring` with division.
pub trait Field: Ring + Div<Output=Self> {}

impl<X> Semiring for X
where X: Copy + PartialEq + Zero + One + Add<Output=X> + Mul<Output=X>,
{}

impl<X> Ring for X
where X: Semiring + Sub<Output=X> + Neg<Output=X>,
{}

impl<X> Field for X
where X: Ring + Div<Output=X>,
{}
