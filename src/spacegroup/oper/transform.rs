/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::errors::ParseError;
use crate::oper::SeitzOp;
use crate::util::wrap_point;

use std::fmt;
use std::hash::{Hash, Hasher};

use crysym_array_types::{V3, M33};
use num_integer::Integer;

/// Matrix coefficients smaller than this are treated as zero when rendering.
const COEF_TOL: f64 = 1e-9;

/// An affine map `p -> M p + t` on fractional coordinates.
///
/// The translation is always reduced into `[0, 1)`.  Equality and hashing
/// go through the canonical string, in which translations are quantized
/// to twelfths.
#[derive(Debug, Clone)]
pub struct AffineTransform {
    /// Acts on column vectors.
    rot: M33,
    trans: V3,
    canonical: String,
}

impl AffineTransform {
    pub fn new(rot: M33, trans: V3) -> Self
    {
        let trans = wrap_point(&trans);
        let canonical = canonical_string(&rot, &trans);
        AffineTransform { rot, trans, canonical }
    }

    pub fn identity() -> Self
    { Self::new(M33::eye(), V3::zero()) }

    /// Exact conversion from an integer rotation and a translation in twelfths.
    pub fn from_seitz(op: &SeitzOp) -> Self
    {
        let rot = op.rot().map(f64::from);
        let trans = op.trans().map(|x| f64::from(x) / 12.0);
        Self::new(rot, trans)
    }

    /// Parse either algebraic notation (`"-x+1/2,y+1/2,-z"`) or a list
    /// of 12 (or 16) numbers.
    pub fn parse(text: &str) -> Result<Self, ParseError>
    { super::parse::parse_transform(text) }

    pub fn rot(&self) -> &M33
    { &self.rot }

    pub fn trans(&self) -> &V3
    { &self.trans }

    pub fn is_identity(&self) -> bool
    { self.canonical == "x,y,z" }

    /// Map a fractional point, wrapping the result into the unit cell.
    pub fn apply(&self, p: &V3) -> V3
    { wrap_point(&self.map_point(p)) }

    /// Map a fractional point without wrapping.
    pub fn map_point(&self, p: &V3) -> V3
    { &(&self.rot * p) + &self.trans }

    /// Conventional group operator: `self` applied after `other`.
    pub fn of(&self, other: &AffineTransform) -> AffineTransform
    {
        let rot = &self.rot * &other.rot;
        let trans = &(&self.rot * &other.trans) + &self.trans;
        AffineTransform::new(rot, trans)
    }

    /// Flipped group operator.
    ///
    /// `a.then(b) == b.of(a)`, i.e. "apply `a`, then `b`".
    pub fn then(&self, other: &AffineTransform) -> AffineTransform
    { other.of(self) }

    /// Same as `of`.
    pub fn compose(&self, other: &AffineTransform) -> AffineTransform
    { self.of(other) }

    pub fn canonical_str(&self) -> &str
    { &self.canonical }

    pub fn to_canonical_string(&self) -> String
    { self.canonical.clone() }
}

impl PartialEq for AffineTransform {
    fn eq(&self, other: &Self) -> bool
    { self.canonical == other.canonical }
}

impl Eq for AffineTransform {}

impl Hash for AffineTransform {
    fn hash<H: Hasher>(&self, state: &mut H)
    { self.canonical.hash(state) }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { f.write_str(&self.canonical) }
}

fn canonical_string(rot: &M33, trans: &V3) -> String
{
    const AXES: [char; 3] = ['x', 'y', 'z'];

    let rows: Vec<String> = (0..3).map(|r| {
        let mut s = String::new();
        for c in 0..3 {
            let coef = rot[r][c];
            if coef.abs() < COEF_TOL {
                continue;
            }
            if coef < 0.0 {
                s.push('-');
            } else if !s.is_empty() {
                s.push('+');
            }
            if (coef.abs() - 1.0).abs() >= COEF_TOL {
                s += &format_coef(coef.abs());
            }
            s.push(AXES[c]);
        }

        let twelfths = ((trans[r] * 12.0).round() as i64).mod_floor(&12);
        if twelfths != 0 {
            let g = twelfths.gcd(&12);
            if !s.is_empty() {
                s.push('+');
            }
            s += &format!("{}/{}", twelfths / g, 12 / g);
        }

        if s.is_empty() {
            s.push('0');
        }
        s
    }).collect();
    rows.join(",")
}

fn format_coef(x: f64) -> String
{
    let r = x.round();
    match (x - r).abs() < COEF_TOL {
        true => format!("{}", r as i64),
        false => format!("{}", x),
    }
}
