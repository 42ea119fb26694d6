/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::fmt;
use std::ops::RangeInclusive;

use crysym_array_types::V3;
use crysym_spacegroup::wrap_point;

/// The 14 Bravais lattices.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LatticeFamily {
    Triclinic,
    MonoclinicPrimitive,
    MonoclinicBaseCentered,
    OrthorhombicPrimitive,
    OrthorhombicBaseCentered,
    OrthorhombicBodyCentered,
    OrthorhombicFaceCentered,
    TetragonalPrimitive,
    TetragonalBodyCentered,
    Rhombohedral,
    Hexagonal,
    CubicPrimitive,
    CubicBodyCentered,
    CubicFaceCentered,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Centering { Primitive, Base, Body, Face }

const BASE: &[V3] = &[V3([0.5, 0.5, 0.0])];
const BODY: &[V3] = &[V3([0.5, 0.5, 0.5])];
const FACE: &[V3] = &[V3([0.5, 0.5, 0.0]), V3([0.5, 0.0, 0.5]), V3([0.0, 0.5, 0.5])];

impl LatticeFamily {
    pub const ALL: [LatticeFamily; 14] = [
        LatticeFamily::Triclinic,
        LatticeFamily::MonoclinicPrimitive,
        LatticeFamily::MonoclinicBaseCentered,
        LatticeFamily::OrthorhombicPrimitive,
        LatticeFamily::OrthorhombicBaseCentered,
        LatticeFamily::OrthorhombicBodyCentered,
        LatticeFamily::OrthorhombicFaceCentered,
        LatticeFamily::TetragonalPrimitive,
        LatticeFamily::TetragonalBodyCentered,
        LatticeFamily::Rhombohedral,
        LatticeFamily::Hexagonal,
        LatticeFamily::CubicPrimitive,
        LatticeFamily::CubicBodyCentered,
        LatticeFamily::CubicFaceCentered,
    ];

    pub fn centering(self) -> Centering
    {
        use self::LatticeFamily::*;
        match self {
            MonoclinicBaseCentered | OrthorhombicBaseCentered => Centering::Base,
            OrthorhombicBodyCentered | TetragonalBodyCentered | CubicBodyCentered => Centering::Body,
            OrthorhombicFaceCentered | CubicFaceCentered => Centering::Face,
            Triclinic | MonoclinicPrimitive | OrthorhombicPrimitive | TetragonalPrimitive
            | Rhombohedral | Hexagonal | CubicPrimitive => Centering::Primitive,
        }
    }

    /// Translations that map the lattice onto itself, excluding the zero vector.
    pub fn centering_translations(self) -> &'static [V3]
    {
        match self.centering() {
            Centering::Primitive => &[],
            Centering::Base => BASE,
            Centering::Body => BODY,
            Centering::Face => FACE,
        }
    }

    /// A point followed by its centering copies, all wrapped into the unit cell.
    pub fn centered_copies(self, p: &V3) -> Vec<V3>
    {
        let mut out = vec![wrap_point(p)];
        out.extend(self.centering_translations().iter().map(|t| wrap_point(&(p + t))));
        out
    }

    /// The space group numbers compatible with this lattice.
    pub fn id_range(self) -> RangeInclusive<u32>
    {
        use self::LatticeFamily::*;
        match self {
            Triclinic => 1..=2,
            MonoclinicPrimitive | MonoclinicBaseCentered => 3..=15,
            OrthorhombicPrimitive | OrthorhombicBaseCentered
            | OrthorhombicBodyCentered | OrthorhombicFaceCentered => 16..=74,
            TetragonalPrimitive | TetragonalBodyCentered => 75..=142,
            Rhombohedral => 143..=167,
            Hexagonal => 168..=194,
            CubicPrimitive | CubicBodyCentered | CubicFaceCentered => 195..=230,
        }
    }
}

impl fmt::Display for LatticeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { fmt::Debug::fmt(self, f) }
}
