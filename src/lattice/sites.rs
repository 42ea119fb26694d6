/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crysym_array_types::V3;

/// A site of the asymmetric unit (or of an expanded structure).
///
/// `meta` identifies what sits there (e.g. an atomic number); only sites
/// with equal metadata are ever considered equivalent.
#[derive(Debug, Clone, PartialEq)]
pub struct Site<M> {
    pub frac: V3,
    pub meta: M,
}

impl<M> Site<M> {
    pub fn new(frac: impl Into<V3>, meta: M) -> Self
    { Site { frac: frac.into(), meta } }
}

/// A segment between two fractional positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond<M> {
    pub start: V3,
    pub end: V3,
    pub meta: M,
}

impl<M> Bond<M> {
    pub fn new(start: impl Into<V3>, end: impl Into<V3>, meta: M) -> Self
    { Bond { start: start.into(), end: end.into(), meta } }
}

/// A site with both fractional and cartesian positions.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSite<M> {
    pub frac: V3,
    pub cart: V3,
    pub meta: M,
}

/// A bond in cartesian coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CartBond<M> {
    pub start: V3,
    pub end: V3,
    pub meta: M,
}
