/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

// Crate where serde_yaml code is monomorphized.
//
// The functions here also make use of serde_ignored to catch typos in the config.

// NOTE: Please use the YamlRead trait!
//       Don't call serde_yaml::from_{reader,value,etc.} on these types from other crates.

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;
#[macro_use]
extern crate failure;

use std::io::Read;
use std::path::PathBuf;

use crysym_lattice::{LatticeFamily, UnitCell, CellError, FracBox, Site, Bond};

/// Provides an alternative to serde_yaml::from_reader where unknown keys
/// are reported rather than silently dropped.
pub trait YamlRead: for <'de> serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, serde_yaml::Error>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, serde_yaml::Error> {
        // serde_ignored needs a Deserializer, and serde_yaml only gives us one
        // by way of Value.
        Self::from_value(value_from_dyn_reader(r)?)
    }

    fn from_str(s: &str) -> Result<Self, serde_yaml::Error>
    { Self::from_reader(s.as_bytes()) }

    fn from_value(value: serde_yaml::Value) -> Result<Self, serde_yaml::Error>;
}

macro_rules! derive_yaml_read {
    ($Type:ty) => {
        impl YamlRead for $Type {
            fn from_value(value: serde_yaml::Value) -> Result<$Type, serde_yaml::Error> {
                serde_ignored::deserialize(
                    value,
                    |path| warn!("Unused config item (possible typo?): {}", path),
                )
            }
        }
    };
}

derive_yaml_read!{serde_yaml::Value}

fn value_from_dyn_reader(r: &mut dyn Read) -> Result<serde_yaml::Value, serde_yaml::Error>
{ serde_yaml::from_reader(r) }

/// Everything needed to build and expand a crystal.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogSetting,

    pub cell: CellSettings,

    pub family: LatticeFamily,

    /// The region (in fractional coordinates) to fill with images.
    #[serde(default, rename = "box")]
    pub bbox: BoxSettings,

    /// Identify the space group from the sites whenever the crystal is updated.
    #[serde(default = "_settings__resolve_group")]
    pub resolve_group: bool,

    /// A group to start from, looked up by Hall or Hermann-Mauguin name.
    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub sites: Vec<SiteSettings>,

    #[serde(default)]
    pub bonds: Vec<BondSettings>,
}
derive_yaml_read!{Settings}
fn _settings__resolve_group() -> bool { true }

/// Where space group definitions come from.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogSetting {
    /// The table compiled into the library.
    Bundled,
    /// A YAML file with the same layout as the bundled table.
    Path(PathBuf),
}

impl Default for CatalogSetting {
    fn default() -> Self { CatalogSetting::Bundled }
}

/// Cell parameters.  Angles are in degrees.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct CellSettings {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    #[serde(default = "_cell__angle")]
    pub alpha: f64,
    #[serde(default = "_cell__angle")]
    pub beta: f64,
    #[serde(default = "_cell__angle")]
    pub gamma: f64,
}
derive_yaml_read!{CellSettings}
fn _cell__angle() -> f64 { 90.0 }

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BoxSettings {
    #[serde(default = "_box__min")]
    pub min: [f64; 3],
    #[serde(default = "_box__max")]
    pub max: [f64; 3],
    /// Exclude the upper faces of the box.
    #[serde(default = "_box__half_open")]
    pub half_open: bool,
}
fn _box__min() -> [f64; 3] { [0.0; 3] }
fn _box__max() -> [f64; 3] { [1.0; 3] }
fn _box__half_open() -> bool { true }

impl Default for BoxSettings {
    fn default() -> Self {
        BoxSettings { min: _box__min(), max: _box__max(), half_open: _box__half_open() }
    }
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SiteSettings {
    pub frac: [f64; 3],
    /// Sites are only ever considered equivalent to sites of the same kind.
    pub kind: String,
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BondSettings {
    pub start: [f64; 3],
    pub end: [f64; 3],
    #[serde(default)]
    pub kind: String,
}

/// Settings that failed validation.
#[derive(Debug, Fail)]
pub enum ConfigError {
    #[fail(display = "invalid cell: {}", _0)]
    Cell(#[fail(cause)] CellError),
    #[fail(display = "box bounds must be finite: min {:?}, max {:?}", min, max)]
    NonFiniteBox { min: [f64; 3], max: [f64; 3] },
    #[fail(display = "box is inverted along axis {}: min {} > max {}", axis, min, max)]
    InvertedBox { axis: usize, min: f64, max: f64 },
    #[fail(display = "site {} has a non-finite position {:?}", index, frac)]
    BadSite { index: usize, frac: [f64; 3] },
    #[fail(display = "bond {} has a non-finite endpoint", index)]
    BadBond { index: usize },
}

impl From<CellError> for ConfigError {
    fn from(e: CellError) -> Self { ConfigError::Cell(e) }
}

/// Settings whose values have been checked and converted to library types.
#[derive(Debug, Clone)]
pub struct ValidatedSettings {
    pub catalog: CatalogSetting,
    pub cell: UnitCell,
    pub family: LatticeFamily,
    pub bbox: FracBox,
    pub resolve_group: bool,
    pub group: Option<String>,
    pub sites: Vec<Site<String>>,
    pub bonds: Vec<Bond<String>>,
}

impl Settings {
    pub fn validate(self) -> Result<ValidatedSettings, ConfigError> {
        let cell = self.cell.validate()?;
        let bbox = self.bbox.validate()?;

        let sites = self.sites.into_iter().enumerate()
            .map(|(index, SiteSettings { frac, kind })| match finite(&frac) {
                true => Ok(Site::new(frac, kind)),
                false => Err(ConfigError::BadSite { index, frac }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bonds = self.bonds.into_iter().enumerate()
            .map(|(index, BondSettings { start, end, kind })| match finite(&start) && finite(&end) {
                true => Ok(Bond::new(start, end, kind)),
                false => Err(ConfigError::BadBond { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if sites.is_empty() {
            warn!("No sites in the config; the crystal will be empty.");
        }

        Ok(ValidatedSettings {
            catalog: self.catalog,
            family: self.family,
            resolve_group: self.resolve_group,
            group: self.group,
            cell, bbox, sites, bonds,
        })
    }
}

impl CellSettings {
    pub fn validate(&self) -> Result<UnitCell, ConfigError> {
        let &CellSettings { a, b, c, alpha, beta, gamma } = self;
        Ok(UnitCell::new([a, b, c], [alpha, beta, gamma])?)
    }
}

impl BoxSettings {
    pub fn validate(&self) -> Result<FracBox, ConfigError> {
        let &BoxSettings { min, max, half_open } = self;
        if !(finite(&min) && finite(&max)) {
            return Err(ConfigError::NonFiniteBox { min, max });
        }
        for axis in 0..3 {
            if min[axis] > max[axis] {
                return Err(ConfigError::InvertedBox { axis, min: min[axis], max: max[axis] });
            }
        }
        Ok(match half_open {
            true => FracBox::half_open(min, max),
            false => FracBox::new(min, max),
        })
    }
}

fn finite(v: &[f64; 3]) -> bool
{ v.iter().all(|x| x.is_finite()) }

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FCC: &str = "
catalog: bundled
cell: { a: 4.05, b: 4.05, c: 4.05 }
family: cubic-face-centered
box: { min: [0, 0, 0], max: [2, 2, 2], half-open: false }
resolve-group: false
group: 'F 4 2 3'
sites:
  - { frac: [0, 0, 0], kind: Al }
bonds:
  - { start: [0, 0, 0], end: [0.5, 0.5, 0] }
";

    #[test]
    fn read_full() {
        let _ = env_logger::try_init();

        let settings = Settings::from_str(FCC).unwrap();
        assert_eq!(settings.catalog, CatalogSetting::Bundled);
        assert_eq!(settings.family, LatticeFamily::CubicFaceCentered);
        assert_eq!(settings.cell.alpha, 90.0);
        assert_eq!(settings.bbox.max, [2.0; 3]);
        assert!(!settings.bbox.half_open);
        assert!(!settings.resolve_group);
        assert_eq!(settings.group, Some("F 4 2 3".to_string()));
        assert_eq!(settings.sites, vec![SiteSettings { frac: [0.0; 3], kind: "Al".into() }]);
        assert_eq!(settings.bonds[0].kind, "");
    }

    #[test]
    fn defaults() {
        let settings = Settings::from_str("
cell: { a: 3, b: 3, c: 5, gamma: 120 }
family: hexagonal
").unwrap();
        assert_eq!(settings.catalog, CatalogSetting::Bundled);
        assert_eq!(settings.bbox, BoxSettings::default());
        assert!(settings.resolve_group);
        assert_eq!(settings.group, None);
        assert!(settings.sites.is_empty());
        assert_eq!(settings.cell.gamma, 120.0);
    }

    #[test]
    fn catalog_path() {
        let settings = Settings::from_str("
catalog: { path: groups.yaml }
cell: { a: 1, b: 1, c: 1 }
family: triclinic
").unwrap();
        assert_eq!(settings.catalog, CatalogSetting::Path("groups.yaml".into()));
    }

    #[test]
    fn unknown_keys_are_not_fatal() {
        let _ = env_logger::try_init();

        let settings = Settings::from_str("
cell: { a: 1, b: 1, c: 1, delta: 3 }
family: triclinic
colour: blue
").unwrap();
        assert_eq!(settings.cell.a, 1.0);
    }

    #[test]
    fn round_trip() {
        let settings = Settings::from_str(FCC).unwrap();
        let text = serde_yaml::to_string(&settings).unwrap();
        assert_eq!(Settings::from_str(&text).unwrap(), settings);
    }

    #[test]
    fn validate_ok() {
        let valid = Settings::from_str(FCC).unwrap().validate().unwrap();
        assert_eq!(valid.cell.lengths(), [4.05; 3]);
        assert_eq!(valid.bbox, FracBox::new([0.0; 3], [2.0; 3]));
        assert_eq!(valid.sites, vec![Site::new([0.0; 3], "Al".to_string())]);
        assert_eq!(valid.bonds.len(), 1);
    }

    #[test]
    fn validate_errors() {
        let base = Settings::from_str(FCC).unwrap();

        let mut s = base.clone();
        s.cell.b = -1.0;
        match s.validate() {
            Err(ConfigError::Cell(CellError::NonPositiveLength(_))) => {},
            r => panic!("unexpected: {:?}", r),
        }

        let mut s = base.clone();
        s.cell.gamma = 180.0;
        match s.validate() {
            Err(ConfigError::Cell(CellError::BadAngle(_))) => {},
            r => panic!("unexpected: {:?}", r),
        }

        let mut s = base.clone();
        s.bbox.min = [0.0, 3.0, 0.0];
        match s.validate() {
            Err(ConfigError::InvertedBox { axis: 1, .. }) => {},
            r => panic!("unexpected: {:?}", r),
        }

        let mut s = base.clone();
        s.bbox.max[2] = std::f64::INFINITY;
        match s.validate() {
            Err(ConfigError::NonFiniteBox { .. }) => {},
            r => panic!("unexpected: {:?}", r),
        }

        let mut s = base.clone();
        s.sites[0].frac[0] = std::f64::NAN;
        match s.validate() {
            Err(ConfigError::BadSite { index: 0, .. }) => {},
            r => panic!("unexpected: {:?}", r),
        }
    }
}
