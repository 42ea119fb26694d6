/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::sync::Arc;

use failure::Error;

use crysym_config::{CatalogSetting, ValidatedSettings};
use crysym_lattice::{
    UnitCell, Lattice, LatticeFamily, FracBox,
    Site, Bond, CartSite, CartBond,
    SpaceGroupResolver, expand, expand_bonds,
};
use crysym_spacegroup::{SpaceGroup, SpaceGroupCatalog};

/// Open the catalog named by a config file, failing if it can't be read.
pub fn open_catalog(setting: &CatalogSetting) -> Result<SpaceGroupCatalog, Error>
{
    let catalog = match setting {
        CatalogSetting::Bundled => SpaceGroupCatalog::new(crysym_spacegroup::CatalogSource::Bundled),
        CatalogSetting::Path(path) => SpaceGroupCatalog::from_path(path),
    };
    if let Some(e) = catalog.ensure_loaded().load_error() {
        bail!("could not load space groups: {}", e);
    }
    Ok(catalog)
}

/// An asymmetric unit in a cell, together with what it expands into.
///
/// The group is either chosen explicitly or identified from the sites on
/// each `update`.
#[derive(Debug, Clone)]
pub struct Crystal<'c, M> {
    catalog: &'c SpaceGroupCatalog,
    cell: UnitCell,
    family: LatticeFamily,
    sites: Vec<Site<M>>,
    bonds: Vec<Bond<M>>,
    group: Option<Arc<SpaceGroup>>,
    bbox: FracBox,
    auto_resolve: bool,
}

/// The output of `Crystal::update`.
#[derive(Debug, Clone)]
pub struct Expanded<M> {
    pub group: Option<Arc<SpaceGroup>>,
    pub sites: Vec<CartSite<M>>,
    pub bonds: Vec<CartBond<M>>,
}

impl<'c, M: PartialEq + Clone> Crystal<'c, M> {
    pub fn new(catalog: &'c SpaceGroupCatalog, cell: UnitCell, family: LatticeFamily) -> Self
    {
        Crystal {
            catalog, cell, family,
            sites: vec![],
            bonds: vec![],
            group: None,
            bbox: FracBox::unit_cell(),
            auto_resolve: false,
        }
    }

    pub fn with_box(mut self, bbox: FracBox) -> Self
    { self.bbox = bbox; self }

    /// Identify the group from the sites during `update`.
    pub fn with_auto_resolve(mut self, auto_resolve: bool) -> Self
    { self.auto_resolve = auto_resolve; self }

    pub fn add_site(&mut self, site: Site<M>) -> &mut Self
    { self.sites.push(site); self }

    pub fn add_bond(&mut self, bond: Bond<M>) -> &mut Self
    { self.bonds.push(bond); self }

    /// Use a specific group (or none, for a plain lattice of centering copies).
    pub fn set_group(&mut self, group: Option<Arc<SpaceGroup>>) -> &mut Self
    { self.group = group; self }

    /// Use the catalog group with this Hall or Hermann-Mauguin name.
    pub fn set_group_by_name(&mut self, name: &str) -> Result<&mut Self, Error>
    {
        let group = match self.catalog.by_name(name) {
            Some(group) => group.clone(),
            None => bail!("no space group named {:?}", name),
        };
        Ok(self.set_group(Some(group)))
    }

    pub fn catalog(&self) -> &'c SpaceGroupCatalog
    { self.catalog }

    pub fn cell(&self) -> &UnitCell
    { &self.cell }

    pub fn lattice(&self) -> Lattice
    { self.cell.lattice() }

    pub fn family(&self) -> LatticeFamily
    { self.family }

    pub fn sites(&self) -> &[Site<M>]
    { &self.sites }

    pub fn bonds(&self) -> &[Bond<M>]
    { &self.bonds }

    pub fn group(&self) -> Option<&Arc<SpaceGroup>>
    { self.group.as_ref() }

    pub fn bbox(&self) -> &FracBox
    { &self.bbox }

    /// Recompute the expanded structure.
    ///
    /// With auto-resolution enabled, the group is identified first and
    /// sites that are images of other sites are dropped from the asymmetric
    /// unit.  If no group fits, the previous group is kept.
    pub fn update(&mut self) -> Expanded<M>
    {
        if self.auto_resolve && !self.sites.is_empty() {
            match SpaceGroupResolver::new(self.catalog).resolve(self.family, &self.sites) {
                Ok(resolved) => {
                    self.group = Some(resolved.group);
                    self.sites = resolved.unique_sites;
                },
                Err(e) => warn!("{}; keeping the previous group", e),
            }
        }

        let lattice = self.lattice();
        let group = self.group.as_ref().map(|g| &**g);
        let sites = expand(&lattice, self.family, group, &self.sites, &self.bbox);
        let bonds = expand_bonds(&lattice, self.family, group, &self.bonds, &self.bbox);
        debug!("Expanded to {} sites and {} bonds", sites.len(), bonds.len());

        Expanded { group: self.group.clone(), sites, bonds }
    }
}

impl<'c> Crystal<'c, String> {
    /// Build a crystal from a config file.  Sites are keyed by their kind.
    pub fn from_settings(catalog: &'c SpaceGroupCatalog, settings: ValidatedSettings) -> Result<Self, Error>
    {
        let ValidatedSettings {
            catalog: _, cell, family, bbox, resolve_group, group, sites, bonds,
        } = settings;

        let mut crystal = Crystal::new(catalog, cell, family)
            .with_box(bbox)
            .with_auto_resolve(resolve_group);
        if let Some(name) = group {
            crystal.set_group_by_name(&name)?;
        }
        crystal.sites = sites;
        crystal.bonds = bonds;
        Ok(crystal)
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crysym_array_types::V3;
    use crysym_config::{Settings, YamlRead};

    fn small_catalog() -> SpaceGroupCatalog {
        SpaceGroupCatalog::from_yaml_str("
groups:
  - { id: 1, HM: 'P 1', Hall: 'P 1' }
  - { id: 2, HM: 'P -1', Hall: '-P 1' }
")
    }

    #[test]
    fn explicit_group() {
        let _ = env_logger::try_init();

        let catalog = small_catalog();
        let cell = UnitCell::cubic(2.0).unwrap();
        let mut crystal = Crystal::new(&catalog, cell, LatticeFamily::Triclinic);
        crystal.add_site(Site::new([0.25, 0.0, 0.0], 'X'));
        crystal.set_group_by_name("-P 1").unwrap();

        let out = crystal.update();
        assert_eq!(out.group.map(|g| g.id()), Some(2));
        assert_eq!(out.sites.len(), 2);
        assert_close!(abs=1e-12, out.sites[0].cart, V3([0.5, 0.0, 0.0]));
        assert_close!(abs=1e-12, out.sites[1].cart, V3([1.5, 0.0, 0.0]));
    }

    #[test]
    fn unknown_group_name() {
        let catalog = small_catalog();
        let cell = UnitCell::cubic(1.0).unwrap();
        let mut crystal = Crystal::<()>::new(&catalog, cell, LatticeFamily::Triclinic);
        assert!(crystal.set_group_by_name("P 42").is_err());
        assert!(crystal.group().is_none());
    }

    #[test]
    fn resolution_failure_keeps_group() {
        let _ = env_logger::try_init();

        // nothing in this catalog belongs to the cubic families
        let catalog = small_catalog();
        let cell = UnitCell::cubic(1.0).unwrap();
        let mut crystal = Crystal::new(&catalog, cell, LatticeFamily::CubicPrimitive)
            .with_auto_resolve(true);
        crystal.add_site(Site::new([0.0; 3], 1));
        crystal.set_group_by_name("P 1").unwrap();

        let out = crystal.update();
        assert_eq!(out.group.map(|g| g.id()), Some(1));
        assert_eq!(out.sites.len(), 1);
    }

    #[test]
    fn from_settings_resolves() {
        let _ = env_logger::try_init();

        let catalog = small_catalog();
        let settings = Settings::from_str("
cell: { a: 1, b: 1, c: 1 }
family: triclinic
sites:
  - { frac: [0.1, 0.2, 0.3], kind: A }
  - { frac: [0.9, 0.8, 0.7], kind: A }
").unwrap().validate().unwrap();

        let mut crystal = Crystal::from_settings(&catalog, settings).unwrap();
        let out = crystal.update();
        assert_eq!(out.group.map(|g| g.id()), Some(2));
        assert_eq!(crystal.sites().len(), 1);
        assert_eq!(out.sites.len(), 2);
    }
}
