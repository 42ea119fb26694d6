/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crysym_array_types::{V3, M33};
use num_integer::Integer;

/// A space group operation in exact integer form.
///
/// The rotation acts on column vectors of fractional coordinates and the
/// translation is stored in units of `1/12`, which is enough to represent
/// every translation that occurs in the 230 space groups.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SeitzOp {
    /// Invariants:
    ///  - `abs(det(rot)) == 1`
    rot: M33<i32>,
    /// This is the vector times 12.
    ///
    /// Invariants:
    ///  - elements are reduced into the range `0 <= x < 12`.
    trans: V3<i32>,
}

impl Default for SeitzOp {
    fn default() -> Self
    { Self::eye() }
}

impl SeitzOp {
    pub fn eye() -> Self
    { SeitzOp { rot: M33::eye(), trans: V3([0, 0, 0]) } }

    /// Construct from a rotation and a translation in twelfths.
    pub fn new(rot: M33<i32>, trans: V3<i32>) -> Self
    {
        debug_assert_eq!(rot.det().abs(), 1);
        SeitzOp { rot, trans: reduce_twelfths(trans) }
    }

    /// A pure translation, in twelfths.
    pub fn translation(trans: V3<i32>) -> Self
    { Self::new(M33::eye(), trans) }

    pub fn rot(&self) -> &M33<i32>
    { &self.rot }

    pub fn trans(&self) -> &V3<i32>
    { &self.trans }

    /// Conventional group operator: `self` applied after `other`.
    pub fn of(&self, other: &SeitzOp) -> SeitzOp
    {
        let rot = &self.rot * &other.rot;
        let trans = &(&self.rot * &other.trans) + &self.trans;
        SeitzOp::new(rot, trans)
    }

    /// Flipped group operator.
    ///
    /// `a.then(b) == b.of(a)`.
    pub fn then(&self, other: &SeitzOp) -> SeitzOp
    { other.of(self) }

    /// The same operation described relative to an origin at `-shift`.
    ///
    /// (`shift` is in twelfths.)
    pub fn shift_origin(&self, shift: &V3<i32>) -> SeitzOp
    {
        let moved = &self.rot * shift;
        SeitzOp::new(self.rot, &(&self.trans + shift) - &moved)
    }
}

fn reduce_twelfths(v: V3<i32>) -> V3<i32>
{ v.map(|x| x.mod_floor(&12)) }

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crysym_array_types::mat;

    fn rot(m: [[i32; 3]; 3]) -> M33<i32>
    { mat::from_array(m) }

    #[test]
    fn two_transform()
    {
        // two operations that don't commute
        let xy = SeitzOp::new(rot([[0, 1, 0], [1, 0, 0], [0, 0, 1]]), V3([6, 0, 0]));
        let zx = SeitzOp::new(rot([[0, 0, 1], [0, 1, 0], [1, 0, 0]]), V3([0, 0, 0]));

        let applied = |op: &SeitzOp, v: V3<i32>| &(op.rot() * &v) + op.trans();
        let v = V3([1, 2, 3]);

        assert_eq!(xy.then(&zx), zx.of(&xy));
        assert_ne!(xy.then(&zx), xy.of(&zx));
        assert_eq!(
            reduce_twelfths(applied(&zx, applied(&xy, v))),
            reduce_twelfths(applied(&xy.then(&zx), v)),
        );
    }

    #[test]
    fn threefold_screw() {
        // 3_1 along z
        let op = SeitzOp::new(rot([[0, -1, 0], [1, -1, 0], [0, 0, 1]]), V3([0, 0, 4]));
        let square = op.of(&op);
        assert_eq!(square, SeitzOp::new(rot([[-1, 1, 0], [-1, 0, 0], [0, 0, 1]]), V3([0, 0, 8])));
        assert_eq!(square.of(&op), SeitzOp::eye());
    }

    #[test]
    fn translations_are_reduced() {
        let op = SeitzOp::translation(V3([-6, 18, 12]));
        assert_eq!(op.trans(), &V3([6, 6, 0]));
    }

    #[test]
    fn origin_shift() {
        // inversion about (1/4, 1/4, 1/4)
        let inv = SeitzOp::new(-M33::eye(), V3([0, 0, 0]));
        let shifted = inv.shift_origin(&V3([3, 3, 3]));
        assert_eq!(shifted.trans(), &V3([6, 6, 6]));

        // translations commute with everything, so they are unaffected
        let t = SeitzOp::translation(V3([6, 6, 0]));
        assert_eq!(t.shift_origin(&V3([1, 2, 3])), t);
    }
}
