/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crysym_array_types::V3;

/// Fractional values this close to an integer are snapped onto it when wrapped.
pub const WRAP_TOL: f64 = 1e-7;

/// Per-axis tolerance when deciding that two fractional points coincide.
pub const POINT_TOL: f64 = 2e-5;

/// Reduce a fractional coordinate into `[0, 1)`.
///
/// Values within `WRAP_TOL` of either end become exactly zero.
pub fn wrap_frac(x: f64) -> f64
{
    let y = x - x.floor();
    if y < WRAP_TOL || 1.0 - y < WRAP_TOL { 0.0 } else { y }
}

pub fn wrap_point(p: &V3) -> V3
{ p.map(wrap_frac) }

pub fn same_point(a: &V3, b: &V3) -> bool
{ (0..3).all(|k| (a[k] - b[k]).abs() < POINT_TOL) }

/// Like `same_point`, but differences are measured modulo a lattice vector.
pub fn same_point_periodic(a: &V3, b: &V3) -> bool
{
    (0..3).all(|k| {
        let d = a[k] - b[k];
        (d - d.round()).abs() < POINT_TOL
    })
}

/// Append `p` unless an equal point is already present.
///
/// Returns whether it was appended.
pub fn push_unique(points: &mut Vec<V3>, p: V3) -> bool
{
    if points.iter().any(|q| same_point(q, &p)) {
        return false;
    }
    points.push(p);
    true
}
