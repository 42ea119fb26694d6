/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::catalog::{SpaceGroupCatalog, Found};
use crate::errors::{ParseError, HallParseError, UnresolvableGroupError};
use crate::hall::expand_hall;
use crate::oper::AffineTransform;
use crate::util::push_unique;

use std::collections::HashSet;
use std::fmt;

use crysym_array_types::V3;

/// A space group setting: an id, optional names and the list of operations.
///
/// Equality only looks at the operations, as a set.
#[derive(Debug, Clone, Default)]
pub struct SpaceGroup {
    /// 1 to 230, or 0 for a custom group.
    id: u32,
    hm_name: String,
    hall_name: String,
    transforms: Vec<AffineTransform>,
}

impl SpaceGroup {
    pub fn new(id: u32) -> Self
    { SpaceGroup { id, ..Default::default() } }

    pub fn with_names(mut self, hm_name: impl Into<String>, hall_name: impl Into<String>) -> Self
    {
        self.hm_name = hm_name.into();
        self.hall_name = hall_name.into();
        self
    }

    /// Build a custom group (id 0) from a Hall symbol.
    pub fn from_hall(symbol: &str) -> Result<Self, HallParseError>
    {Ok({
        let mut group = SpaceGroup::new(0).with_names("", symbol);
        group.transforms = expand_hall(symbol)?.iter().map(AffineTransform::from_seitz).collect();
        group
    })}

    pub fn id(&self) -> u32
    { self.id }

    pub fn hm_name(&self) -> &str
    { &self.hm_name }

    pub fn hall_name(&self) -> &str
    { &self.hall_name }

    pub fn transforms(&self) -> &[AffineTransform]
    { &self.transforms }

    pub fn len(&self) -> usize
    { self.transforms.len() }

    pub fn is_empty(&self) -> bool
    { self.transforms.is_empty() }

    /// Parse a symmetry operation and append it.
    pub fn add_transform(&mut self, text: &str) -> Result<(), ParseError>
    {Ok({
        self.transforms.push(AffineTransform::parse(text)?);
    })}

    pub fn push_transform(&mut self, transform: AffineTransform)
    { self.transforms.push(transform) }

    pub fn contains(&self, transform: &AffineTransform) -> bool
    { self.transforms.contains(transform) }

    /// The orbit of a fractional point.
    ///
    /// Images are wrapped into the unit cell and deduplicated; the first
    /// occurrence wins, so the order follows the order of the operations.
    pub fn transform_point(&self, p: &V3) -> Vec<V3>
    {
        let mut out = Vec::with_capacity(self.transforms.len());
        for t in &self.transforms {
            push_unique(&mut out, t.apply(p));
        }
        out
    }

    /// Whether the operations form a group.
    ///
    /// This requires a non-empty list without duplicates, containing
    /// the identity, and closed under composition.
    pub fn is_valid(&self) -> bool
    {
        if self.transforms.is_empty() {
            return false;
        }
        let keys: HashSet<&str> = self.transforms.iter().map(|t| t.canonical_str()).collect();
        if keys.len() != self.transforms.len() {
            return false;
        }
        if !keys.contains("x,y,z") {
            return false;
        }
        iproduct!(&self.transforms, &self.transforms)
            .all(|(a, b)| keys.contains(a.of(b).canonical_str()))
    }

    /// One canonical operation per line, in insertion order.
    pub fn transforms_string(&self) -> String
    {
        let mut out = String::new();
        for t in &self.transforms {
            out += t.canonical_str();
            out.push('\n');
        }
        out
    }

    /// Resolve this (possibly partial) description against a catalog.
    ///
    /// See `SpaceGroupCatalog::find`.
    pub fn find(&self, catalog: &SpaceGroupCatalog) -> Result<Found, UnresolvableGroupError>
    { catalog.find(self) }
}

impl PartialEq for SpaceGroup {
    fn eq(&self, other: &SpaceGroup) -> bool
    {
        let set = |g: &SpaceGroup| g.transforms.iter().map(|t| t.canonical_str().to_string()).collect::<HashSet<_>>();
        self.transforms.len() == other.transforms.len() && set(self) == set(other)
    }
}

impl fmt::Display for SpaceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        if !self.hm_name.is_empty() {
            write!(f, "{}", self.hm_name)?;
            if !self.hall_name.is_empty() {
                write!(f, " [{}]", self.hall_name)?;
            }
            Ok(())
        } else if !self.hall_name.is_empty() {
            write!(f, "[{}]", self.hall_name)
        } else if self.id != 0 {
            write!(f, "#{}", self.id)
        } else {
            write!(f, "custom group of order {}", self.transforms.len())
        }
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn group(ops: &[&str]) -> SpaceGroup
    {
        let mut g = SpaceGroup::new(0);
        for op in ops {
            g.add_transform(op).unwrap();
        }
        g
    }

    const P21C: &[&str] = &["x,y,z", "-x,y+1/2,-z+1/2", "-x,-y,-z", "x,-y+1/2,z+1/2"];

    #[test]
    fn equality_ignores_order_and_names() {
        let a = group(P21C);
        let mut reversed = P21C.to_vec();
        reversed.reverse();
        let b = group(&reversed).with_names("P 1 21/c 1", "-P 2ybc");
        assert_eq!(a, b);

        let c = group(&P21C[..3]);
        assert_ne!(a, c);
    }

    #[test]
    fn validity() {
        assert!(group(P21C).is_valid());
        assert!(!SpaceGroup::new(14).is_valid());
        // not closed
        assert!(!group(&P21C[..3]).is_valid());
        // no identity
        assert!(!group(&["-x,-y,-z"]).is_valid());
        // duplicate
        assert!(!group(&["x,y,z", "-x,-y,-z", "-x,-y,-z+1"]).is_valid());
    }

    #[test]
    fn orbit_deduplicates_in_order() {
        let g = group(P21C);
        let orbit = g.transform_point(&V3([0.1, 0.2, 0.3]));
        assert_eq!(orbit.len(), 4);
        assert_close!(abs=1e-12, orbit[0], V3([0.1, 0.2, 0.3]));
        assert_close!(abs=1e-12, orbit[1], V3([0.9, 0.7, 0.2]));

        // an inversion center maps onto itself
        assert_eq!(g.transform_point(&V3([0.0, 0.0, 0.0])).len(), 2);
        assert_eq!(g.transform_point(&V3([0.5, 0.0, 0.0])).len(), 2);
    }

    #[test]
    fn export_is_reproducible() {
        let g = group(&["x,y,z", "1/2-x,1/2+y,-z"]);
        assert_eq!(g.transforms_string(), "x,y,z\n-x+1/2,y+1/2,-z\n");
    }

    #[test]
    fn from_hall() {
        let g = SpaceGroup::from_hall("-P 2ybc").unwrap();
        assert_eq!(g, group(P21C));
        assert!(g.is_valid());
        assert_eq!(g.hall_name(), "-P 2ybc");
        assert_eq!(g.to_string(), "[-P 2ybc]");
        assert!(SpaceGroup::from_hall("-P 7").is_err());
    }
}
