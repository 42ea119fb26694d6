/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Building crystals from config files.

mod shared;

use crysym::{Crystal, Settings, YamlRead, open_catalog, V3};
use pretty_assertions::assert_eq;

const COPPER: &str = "
cell: { a: 3.61, b: 3.61, c: 3.61 }
family: cubic-face-centered
box: { min: [0, 0, 0], max: [1, 1, 1], half-open: false }
sites:
  - { frac: [0, 0, 0], kind: Cu }
  - { frac: [0, 0.5, 0.5], kind: Cu }
bonds:
  - { start: [0, 0, 0], end: [0.5, 0.5, 0], kind: Cu-Cu }
";

#[test]
fn copper_from_config() {
    let _ = env_logger::try_init();

    let settings = Settings::from_str(COPPER).unwrap().validate().unwrap();
    let catalog = open_catalog(&settings.catalog).unwrap();
    let mut crystal = Crystal::from_settings(&catalog, settings).unwrap();

    let out = crystal.update();
    assert_eq!(out.group.as_ref().map(|g| g.id()), Some(225));
    assert_eq!(crystal.sites().len(), 1);
    assert_eq!(out.sites.len(), 14);
    assert!(out.sites.iter().all(|s| s.meta == "Cu"));
    assert!(!out.bonds.is_empty());

    let max = out.sites.iter()
        .map(|s| s.cart.iter().cloned().fold(0.0, f64::max))
        .fold(0.0, f64::max);
    assert!((max - 3.61).abs() < 1e-9);
}

#[test]
fn explicit_group_from_config() {
    let settings = Settings::from_str("
cell: { a: 4, b: 4, c: 4 }
family: cubic-primitive
resolve-group: false
group: 'P m -3 m'
sites:
  - { frac: [0.5, 0.5, 0.5], kind: Cs }
  - { frac: [0, 0, 0], kind: Cl }
").unwrap().validate().unwrap();
    let catalog = open_catalog(&settings.catalog).unwrap();
    let mut crystal = Crystal::from_settings(&catalog, settings).unwrap();

    let out = crystal.update();
    assert_eq!(out.group.map(|g| g.id()), Some(221));
    let fracs = shared::sorted(out.sites.iter().map(|s| s.frac));
    assert_eq!(fracs, vec![V3([0.0, 0.0, 0.0]), V3([0.5, 0.5, 0.5])]);
}

#[test]
fn missing_catalog_file() {
    let settings = Settings::from_str("
catalog: { path: /nonexistent/space-groups.yaml }
cell: { a: 1, b: 1, c: 1 }
family: triclinic
").unwrap().validate().unwrap();
    assert!(open_catalog(&settings.catalog).is_err());
}
