/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::f64::consts::PI;
use std::sync::Arc;

use crysym_array_types::{V3, M33, mat, inv};

/// Angles this close to 90 degrees (in radians) are treated as exact right angles.
const RIGHT_ANGLE_TOL: f64 = 1e-12;

/// Invalid cell parameters.
#[derive(Debug, Fail)]
pub enum CellError {
    #[fail(display = "cell lengths must be positive: {:?}", _0)]
    NonPositiveLength([f64; 3]),
    #[fail(display = "cell angles must lie strictly between 0 and 180 degrees: {:?}", _0)]
    BadAngle([f64; 3]),
    #[fail(display = "cell angles {:?} do not describe a three-dimensional cell", _0)]
    Degenerate([f64; 3]),
}

/// Unit cell parameters.
///
/// Angles are given in degrees but stored in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCell {
    lengths: [f64; 3],
    /// alpha, beta, gamma, in radians
    angles: [f64; 3],
}

impl UnitCell {
    pub fn new(lengths: [f64; 3], angles_deg: [f64; 3]) -> Result<Self, CellError>
    {
        if !lengths.iter().all(|&x| x > 0.0 && x.is_finite()) {
            return Err(CellError::NonPositiveLength(lengths));
        }
        if !angles_deg.iter().all(|&x| 0.0 < x && x < 180.0) {
            return Err(CellError::BadAngle(angles_deg));
        }

        let cell = UnitCell { lengths, angles: [
            angles_deg[0] * PI / 180.0,
            angles_deg[1] * PI / 180.0,
            angles_deg[2] * PI / 180.0,
        ]};
        match cell.a_vector_x_squared() > 0.0 {
            true => Ok(cell),
            false => Err(CellError::Degenerate(angles_deg)),
        }
    }

    /// A cube with side `a`.
    pub fn cubic(a: f64) -> Result<Self, CellError>
    { Self::new([a, a, a], [90.0, 90.0, 90.0]) }

    /// The conventional hexagonal cell.
    pub fn hexagonal(a: f64, c: f64) -> Result<Self, CellError>
    { Self::new([a, a, c], [90.0, 90.0, 120.0]) }

    pub fn lengths(&self) -> [f64; 3]
    { self.lengths }

    /// alpha, beta, gamma, in radians.
    pub fn angles(&self) -> [f64; 3]
    { self.angles }

    pub fn angles_deg(&self) -> [f64; 3]
    {
        let [a, b, c] = self.angles;
        [a * 180.0 / PI, b * 180.0 / PI, c * 180.0 / PI]
    }

    // cos α, cos β, cos γ, with right angles giving exactly zero
    fn cosines(&self) -> [f64; 3]
    {
        let snap = |angle: f64| match (angle - PI / 2.0).abs() < RIGHT_ANGLE_TOL {
            true => 0.0,
            false => angle.cos(),
        };
        let [alpha, beta, gamma] = self.angles;
        [snap(alpha), snap(beta), snap(gamma)]
    }

    // fraction of |a|^2 lying along x
    fn a_vector_x_squared(&self) -> f64
    {
        let [cos_a, cos_b, cos_g] = self.cosines();
        let y = (cos_g - cos_b * cos_a) / self.angles[0].sin();
        1.0 - cos_b.powi(2) - y * y
    }

    /// The lattice, in a fixed orientation.
    ///
    /// `c` lies along z and `b` in the yz plane, so that
    ///
    /// ```text
    /// X = fa a sqrt(1 - cos²β - ((cos γ - cos β cos α) / sin α)²)
    /// Y = fa a (cos γ - cos β cos α) / sin α + fb b sin α
    /// Z = fa a cos β + fb b cos α + fc c
    /// ```
    pub fn lattice(&self) -> Lattice
    {
        let [a, b, c] = self.lengths;
        let [cos_a, cos_b, cos_g] = self.cosines();
        let sin_a = self.angles[0].sin();
        let ay = (cos_g - cos_b * cos_a) / sin_a;
        let ax = self.a_vector_x_squared().max(0.0).sqrt();
        Lattice::from(&[
            [a * ax, a * ay, a * cos_b],
            [0.0, b * sin_a, b * cos_a],
            [0.0, 0.0, c],
        ])
    }
}

/// A vector basis for periodic boundary conditions in three dimensions,
/// with a precomputed inverse.
///
/// Lattice vectors are the rows of the matrix, so fractional row vectors
/// are multiplied on the left: `cart = frac * matrix`.
#[derive(Debug, Clone)]
pub struct Lattice {
    matrix: Arc<M33>,
    inverse: Arc<M33>,
}

// Manual impl that doesn't compare the inverse.
impl PartialEq<Lattice> for Lattice {
    fn eq(&self, other: &Lattice) -> bool {
        // deconstruct to get errors when new fields are added
        let Lattice { ref matrix, inverse: _ } = *self;
        matrix == &other.matrix
    }
}

impl Lattice {
    /// Create a lattice from a matrix where the rows are lattice vectors.
    #[inline]
    pub fn new(matrix: &M33) -> Self {
        let inverse = Arc::new(inv(matrix));
        let matrix = Arc::new(*matrix);
        Self { matrix, inverse }
    }

    /// A cubic lattice ((a, a, a), (90, 90, 90))
    #[inline]
    pub fn cubic(a: f64) -> Self { Self::orthorhombic(a, a, a) }

    /// An orthorhombic lattice ((a, b, c), (90, 90, 90))
    #[inline]
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Self
    { Self::from(&[[a, 0., 0.], [0., b, 0.], [0., 0., c]]) }

    /// Matrix where lattice vectors are rows.
    #[inline]
    pub fn matrix(&self) -> &M33
    { &self.matrix }

    /// Get the (precomputed) inverse of the matrix where lattice vectors are rows.
    #[inline]
    pub fn inverse_matrix(&self) -> &M33
    { &self.inverse }

    #[inline]
    pub fn vectors(&self) -> &[V3; 3]
    { &self.matrix().0 }

    pub fn norms(&self) -> [f64; 3]
    {
        let [a, b, c] = *self.vectors();
        [a.norm(), b.norm(), c.norm()]
    }

    /// Get the (positive) volume of the lattice cell.
    pub fn volume(&self) -> f64
    { self.matrix().det().abs() }

    pub fn to_cart(&self, frac: &V3) -> V3
    { frac * self.matrix() }

    pub fn to_frac(&self, cart: &V3) -> V3
    { cart * self.inverse_matrix() }
}

impl<'a> From<&'a [[f64; 3]; 3]> for Lattice {
    #[inline(always)]
    fn from(m: &'a [[f64; 3]; 3]) -> Self
    { Lattice::new(&mat::from_array(*m)) }
}
