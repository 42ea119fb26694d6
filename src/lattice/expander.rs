/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{LatticeFamily, Site, Bond, CartSite, CartBond, Lattice};

use crysym_array_types::V3;
use crysym_spacegroup::{SpaceGroup, wrap_frac, same_point, WRAP_TOL};

/// A box in fractional coordinates.
///
/// The upper bound is inclusive by default (so a `[0, 1]` box includes
/// the far faces and corners of the cell).  A half-open box excludes it.
#[derive(Debug, Clone, PartialEq)]
pub struct FracBox {
    min: V3,
    max: V3,
    half_open: bool,
}

impl FracBox {
    /// `min <= x <= max`.  Bounds must be finite.
    pub fn new(min: impl Into<V3>, max: impl Into<V3>) -> Self
    { FracBox { min: min.into(), max: max.into(), half_open: false } }

    /// `min <= x < max`.  Bounds must be finite.
    pub fn half_open(min: impl Into<V3>, max: impl Into<V3>) -> Self
    { FracBox { half_open: true, ..FracBox::new(min, max) } }

    /// Exactly one image of every point: `[0, 1)` along each axis.
    pub fn unit_cell() -> Self
    { FracBox::half_open([0.0; 3], [1.0; 3]) }

    pub fn min(&self) -> &V3
    { &self.min }

    pub fn max(&self) -> &V3
    { &self.max }

    pub fn is_half_open(&self) -> bool
    { self.half_open }

    // Lattice images of a single coordinate.
    fn axis_images(&self, axis: usize, c: f64) -> Vec<f64>
    {
        let (min, max) = (self.min[axis], self.max[axis]);
        let inside = |x: f64| match self.half_open {
            true => x < max - WRAP_TOL,
            false => x <= max + WRAP_TOL,
        };

        let mut out = vec![];
        let mut x = c - (c - min + WRAP_TOL).floor();
        while inside(x) {
            out.push(x);
            x += 1.0;
        }
        out
    }

    /// Every lattice image of `p` that lies in the box.
    ///
    /// Ordered with x outermost and z innermost.
    pub fn images(&self, p: &V3) -> Vec<V3>
    {
        iproduct!(self.axis_images(0, p[0]), self.axis_images(1, p[1]), self.axis_images(2, p[2]))
            .map(|(x, y, z)| V3([x, y, z]))
            .collect()
    }
}

impl Default for FracBox {
    fn default() -> Self
    { FracBox::unit_cell() }
}

/// Produces every periodic image of a set of sites inside a box.
///
/// With a space group, each site is first replaced by its orbit in the
/// unit cell.  Without one, only the centering translations of the lattice
/// family are used.  The two are never combined, and no deduplication
/// happens across sites.
#[derive(Debug, Clone)]
pub struct LatticeExpander<'a> {
    family: LatticeFamily,
    group: Option<&'a SpaceGroup>,
    bbox: FracBox,
}

impl<'a> LatticeExpander<'a> {
    pub fn new(family: LatticeFamily, group: Option<&'a SpaceGroup>, bbox: FracBox) -> Self
    { LatticeExpander { family, group, bbox } }

    /// The images of `p` within a single unit cell.
    pub fn cell_images(&self, p: &V3) -> Vec<V3>
    {
        match self.group {
            Some(group) => group.transform_point(p),
            None => self.family.centered_copies(p),
        }
    }

    /// The images of `p` within the box.
    pub fn expand_point(&self, p: &V3) -> Vec<V3>
    {
        self.cell_images(p).iter()
            .flat_map(|q| self.bbox.images(q))
            .collect()
    }

    pub fn expand_sites<M: Clone>(&self, sites: &[Site<M>]) -> Vec<Site<M>>
    {
        let mut out = vec![];
        for site in sites {
            out.extend(self.expand_point(&site.frac).into_iter().map(|frac| {
                Site { frac, meta: site.meta.clone() }
            }));
        }
        debug!("Expanded {} sites into {}", sites.len(), out.len());
        out
    }

    /// Expand bonds the same way as sites.
    ///
    /// Each image of a bond is placed so that its start lies in the unit
    /// cell, coincident images (in either direction) are dropped, and the
    /// rest are tiled across the box by their start.
    pub fn expand_bonds<M: Clone>(&self, bonds: &[Bond<M>]) -> Vec<Bond<M>>
    {
        let mut out = vec![];
        for bond in bonds {
            let mut in_cell: Vec<(V3, V3)> = vec![];
            for (start, end) in self.bond_cell_images(bond) {
                let image = normalized(&start, &end);
                let reverse = normalized(&end, &start);
                let duplicate = in_cell.iter().any(|(s, e)| {
                    (same_point(s, &image.0) && same_point(e, &image.1))
                    || (same_point(s, &reverse.0) && same_point(e, &reverse.1))
                });
                if !duplicate {
                    in_cell.push(image);
                }
            }

            for (start, end) in in_cell {
                let delta = &end - &start;
                for image in self.bbox.images(&start) {
                    out.push(Bond {
                        end: &image + &delta,
                        start: image,
                        meta: bond.meta.clone(),
                    });
                }
            }
        }
        debug!("Expanded {} bonds into {}", bonds.len(), out.len());
        out
    }

    // unwrapped images of both endpoints
    fn bond_cell_images<M>(&self, bond: &Bond<M>) -> Vec<(V3, V3)>
    {
        match self.group {
            Some(group) => {
                group.transforms().iter()
                    .map(|t| (t.map_point(&bond.start), t.map_point(&bond.end)))
                    .collect()
            },
            None => {
                Some(V3::zero()).iter()
                    .chain(self.family.centering_translations())
                    .map(|t| (&bond.start + t, &bond.end + t))
                    .collect()
            },
        }
    }
}

// translate a segment by a lattice vector so that its start is in the unit cell
fn normalized(start: &V3, end: &V3) -> (V3, V3)
{
    let shift = start.map(|x| (x - wrap_frac(x)).round());
    (start - &shift, end - &shift)
}

/// Expand sites over a box and convert them to cartesian coordinates.
pub fn expand<M: Clone>(
    lattice: &Lattice,
    family: LatticeFamily,
    group: Option<&SpaceGroup>,
    sites: &[Site<M>],
    bbox: &FracBox,
) -> Vec<CartSite<M>>
{
    LatticeExpander::new(family, group, bbox.clone())
        .expand_sites(sites).into_iter()
        .map(|Site { frac, meta }| CartSite { cart: lattice.to_cart(&frac), frac, meta })
        .collect()
}

/// Expand bonds over a box and convert them to cartesian coordinates.
pub fn expand_bonds<M: Clone>(
    lattice: &Lattice,
    family: LatticeFamily,
    group: Option<&SpaceGroup>,
    bonds: &[Bond<M>],
    bbox: &FracBox,
) -> Vec<CartBond<M>>
{
    LatticeExpander::new(family, group, bbox.clone())
        .expand_bonds(bonds).into_iter()
        .map(|Bond { start, end, meta }| CartBond {
            start: lattice.to_cart(&start),
            end: lattice.to_cart(&end),
            meta,
        })
        .collect()
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::test_util::sorted_points;
    use pretty_assertions::assert_eq;

    fn group(ops: &[&str]) -> SpaceGroup
    {
        let mut g = SpaceGroup::new(0);
        for op in ops {
            g.add_transform(op).unwrap();
        }
        g
    }

    #[test]
    fn axis_tiling() {
        let closed = FracBox::new([0.0; 3], [1.0; 3]);
        assert_eq!(closed.axis_images(0, 0.0), vec![0.0, 1.0]);
        assert_eq!(closed.axis_images(0, 0.5), vec![0.5]);
        assert_eq!(closed.axis_images(0, 3.5), vec![0.5]);
        assert_eq!(closed.axis_images(0, -0.75), vec![0.25]);

        let wide = FracBox::new([-1.0; 3], [1.0; 3]);
        assert_eq!(wide.axis_images(1, 0.0), vec![-1.0, 0.0, 1.0]);
        assert_eq!(wide.axis_images(1, 0.5), vec![-0.5, 0.5]);

        let cell = FracBox::unit_cell();
        assert_eq!(cell.axis_images(2, 0.0), vec![0.0]);
        assert_eq!(cell.axis_images(2, 0.99), vec![0.99]);
    }

    #[test]
    fn image_order() {
        let bbox = FracBox::new([0.0; 3], [1.0, 1.0, 0.5]);
        assert_eq!(bbox.images(&V3([0.0, 0.0, 0.25])), vec![
            V3([0.0, 0.0, 0.25]),
            V3([0.0, 1.0, 0.25]),
            V3([1.0, 0.0, 0.25]),
            V3([1.0, 1.0, 0.25]),
        ]);
    }

    #[test]
    fn face_centered_unit_cell() {
        let expander = LatticeExpander::new(LatticeFamily::CubicFaceCentered, None, FracBox::unit_cell());
        let sites = expander.expand_sites(&[Site::new([0.0, 0.0, 0.0], 11)]);
        assert_eq!(sorted_points(sites.iter().map(|s| s.frac).collect()), vec![
            V3([0.0, 0.0, 0.0]),
            V3([0.0, 0.5, 0.5]),
            V3([0.5, 0.0, 0.5]),
            V3([0.5, 0.5, 0.0]),
        ]);
        assert!(sites.iter().all(|s| s.meta == 11));
    }

    #[test]
    fn closed_box_includes_far_faces() {
        let expander = LatticeExpander::new(LatticeFamily::CubicFaceCentered, None, FracBox::new([0.0; 3], [1.0; 3]));
        // 8 corners + 6 face centers
        assert_eq!(expander.expand_point(&V3([0.0, 0.0, 0.0])).len(), 14);

        let expander = LatticeExpander::new(LatticeFamily::CubicBodyCentered, None, FracBox::new([0.0; 3], [1.0; 3]));
        assert_eq!(expander.expand_point(&V3([0.0, 0.0, 0.0])).len(), 9);
    }

    #[test]
    fn grouped_mode_ignores_centering() {
        let p21 = group(&["x,y,z", "-x,y+1/2,-z"]);
        // family says face-centered, but the group takes precedence
        let expander = LatticeExpander::new(LatticeFamily::CubicFaceCentered, Some(&p21), FracBox::unit_cell());
        let points = expander.expand_point(&V3([0.1, 0.2, 0.3]));
        assert_eq!(points.len(), 2);
        assert_close!(abs=1e-12, points[1], V3([0.9, 0.7, 0.7]));
    }

    #[test]
    fn orbit_members_are_tiled_independently() {
        let inversion = group(&["x,y,z", "-x,-y,-z"]);
        let bbox = FracBox::new([0.0; 3], [1.0, 1.0, 1.0]);
        let expander = LatticeExpander::new(LatticeFamily::Triclinic, Some(&inversion), bbox);
        // (0.5, 0, 0) is its own inverse, and has two images along each of y and z
        assert_eq!(expander.expand_point(&V3([0.5, 0.0, 0.0])).len(), 4);
        // (0.25, 0.25, 0.25) and (0.75, 0.75, 0.75)
        assert_eq!(expander.expand_point(&V3([0.25, 0.25, 0.25])).len(), 2);
    }

    #[test]
    fn bonds() {
        let inversion = group(&["x,y,z", "-x,-y,-z"]);
        let expander = LatticeExpander::new(LatticeFamily::Triclinic, Some(&inversion), FracBox::unit_cell());

        // a bond through the inversion center maps onto itself (reversed)
        let through = Bond::new([0.9, 0.0, 0.0], [1.1, 0.0, 0.0], "Si-Si");
        let bonds = expander.expand_bonds(&[through]);
        assert_eq!(bonds.len(), 1);
        assert_close!(abs=1e-12, bonds[0].start, V3([0.9, 0.0, 0.0]));
        assert_close!(abs=1e-12, bonds[0].end, V3([1.1, 0.0, 0.0]));

        // a general bond has two images; the second starts inside the cell
        let general = Bond::new([0.1, 0.2, 0.3], [0.2, 0.2, 0.3], "Si-O");
        let bonds = expander.expand_bonds(&[general]);
        assert_eq!(bonds.len(), 2);
        assert_close!(abs=1e-12, bonds[1].start, V3([0.9, 0.8, 0.7]));
        assert_close!(abs=1e-12, bonds[1].end, V3([0.8, 0.8, 0.7]));
        assert!(bonds.iter().all(|b| b.meta == "Si-O"));
    }

    #[test]
    fn cartesian_output() {
        let lattice = Lattice::cubic(2.0);
        let sites = expand(
            &lattice,
            LatticeFamily::CubicBodyCentered,
            None,
            &[Site::new([0.0, 0.0, 0.0], ())],
            &FracBox::unit_cell(),
        );
        assert_eq!(sites.len(), 2);
        assert_close!(abs=1e-12, sites[1].cart, V3([1.0, 1.0, 1.0]));

        let bonds = expand_bonds(
            &lattice,
            LatticeFamily::CubicBodyCentered,
            None,
            &[Bond::new([0.0, 0.0, 0.0], [0.5, 0.5, 0.5], ())],
            &FracBox::unit_cell(),
        );
        assert_eq!(bonds.len(), 2);
        assert_close!(abs=1e-12, bonds[1].start, V3([1.0, 1.0, 1.0]));
        assert_close!(abs=1e-12, bonds[1].end, V3([2.0, 2.0, 2.0]));
    }
}
