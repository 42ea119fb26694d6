/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::errors::{CatalogLoadError, UnresolvableGroupError, AmbiguousGroupWarning, Warning};
use crate::oper::AffineTransform;
use crate::SpaceGroup;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use failure::Error;

const BUNDLED_YAML: &str = include_str!("data/space-groups.yaml");

lazy_static! {
    static ref BUNDLED: SpaceGroupCatalog = SpaceGroupCatalog::new(CatalogSource::Bundled);
}

/// Where a catalog reads its definitions from.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    /// The definitions compiled into this crate.
    Bundled,
    Path(PathBuf),
    /// YAML text held in memory.
    Text(String),
}

/// The known space group settings.
///
/// The definitions are read the first time the catalog is queried (or
/// when `ensure_loaded` is called), and never change afterwards.
///
/// A catalog whose resource could not be read behaves as an empty catalog;
/// the reason is available from `load_error`.
#[derive(Debug)]
pub struct SpaceGroupCatalog {
    source: CatalogSource,
    tables: OnceLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    /// Registration order.
    groups: Vec<Arc<SpaceGroup>>,
    by_id: HashMap<u32, Vec<Arc<SpaceGroup>>>,
    by_hall: HashMap<String, Arc<SpaceGroup>>,
    /// Every setting registered under each HM name (full or short).
    by_hm: HashMap<String, Vec<Arc<SpaceGroup>>>,
    error: Option<CatalogLoadError>,
}

/// The outcome of resolving a group against the catalog.
#[derive(Debug, Clone)]
pub struct Found {
    pub group: Arc<SpaceGroup>,
    pub warnings: Vec<Warning>,
}

/// One element of the `groups` list.
#[derive(Debug, Deserialize)]
struct Entry {
    id: u32,
    #[serde(rename = "HM", default)]
    hm: Option<String>,
    #[serde(rename = "HMs", default)]
    hm_short: Option<String>,
    #[serde(rename = "Hall", default)]
    hall: Option<String>,
    #[serde(default)]
    transforms: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    groups: Option<Vec<serde_yaml::Value>>,
}

impl SpaceGroupCatalog {
    pub fn new(source: CatalogSource) -> Self
    { SpaceGroupCatalog { source, tables: OnceLock::new() } }

    pub fn from_path(path: impl Into<PathBuf>) -> Self
    { Self::new(CatalogSource::Path(path.into())) }

    pub fn from_yaml_str(text: impl Into<String>) -> Self
    { Self::new(CatalogSource::Text(text.into())) }

    /// The shared catalog of bundled definitions, loaded on first use.
    pub fn bundled() -> &'static SpaceGroupCatalog
    { &BUNDLED }

    pub fn source(&self) -> &CatalogSource
    { &self.source }

    /// Read the definitions if that has not happened yet.
    pub fn ensure_loaded(&self) -> &Self
    {
        self.tables();
        self
    }

    /// Why the resource could not be read, if it couldn't.
    pub fn load_error(&self) -> Option<&CatalogLoadError>
    { self.tables().error.as_ref() }

    /// All settings with this number, in registration order.
    pub fn by_id(&self, id: u32) -> &[Arc<SpaceGroup>]
    {
        match self.tables().by_id.get(&id) {
            Some(groups) => groups,
            None => &[],
        }
    }

    /// Look up by Hall symbol, falling back to Hermann-Mauguin symbols.
    ///
    /// When several settings share a name, the first one registered wins.
    pub fn by_name(&self, name: &str) -> Option<&Arc<SpaceGroup>>
    {
        let tables = self.tables();
        tables.by_hall.get(name)
            .or_else(|| tables.by_hm.get(name).and_then(|v| v.first()))
    }

    /// Every setting, in registration order.
    pub fn all(&self) -> impl Iterator<Item=&Arc<SpaceGroup>>
    { self.tables().groups.iter() }

    pub fn len(&self) -> usize
    { self.tables().groups.len() }

    pub fn is_empty(&self) -> bool
    { self.len() == 0 }

    fn tables(&self) -> &Tables
    { self.tables.get_or_init(|| load_tables(&self.source)) }
}

impl SpaceGroupCatalog {
    /// Identify the catalog setting described by a (possibly partial) group.
    ///
    /// In order of preference, this uses:
    ///
    /// 1. The Hall name.  The entry is returned even when the candidate's
    ///    transforms disagree with it (reported as a warning).
    /// 2. The HM name.  With transforms, only an exact match is accepted;
    ///    without, the first setting registered under the name is taken.
    /// 3. The id.  With transforms an exact match is preferred; otherwise
    ///    the setting is taken if it is the only one with that id.
    /// 4. A search of the whole catalog for a group with the same
    ///    transforms.  This requires the candidate to be a valid group.
    ///
    /// Nothing is guessed; if all of these fail the result is an error.
    pub fn find(&self, candidate: &SpaceGroup) -> Result<Found, UnresolvableGroupError>
    {
        let tables = self.tables();
        let mut warnings = vec![];
        let has_transforms = !candidate.is_empty();

        let hall = candidate.hall_name();
        if !hall.is_empty() {
            if let Some(group) = tables.by_hall.get(hall) {
                if has_transforms && **group != *candidate {
                    warn!("Space group {}: {}", candidate, Warning::HallMismatch { hall: hall.to_string() });
                    warnings.push(Warning::HallMismatch { hall: hall.to_string() });
                }
                return Ok(Found { group: group.clone(), warnings });
            }
        }

        let hm = candidate.hm_name();
        if !hm.is_empty() {
            if let Some(settings) = tables.by_hm.get(hm) {
                if !has_transforms {
                    if settings.len() > 1 {
                        warnings.push(ambiguity(hm, settings));
                    }
                    return Ok(Found { group: settings[0].clone(), warnings });
                }
                if let Some(group) = settings.iter().find(|g| ***g == *candidate) {
                    return Ok(Found { group: group.clone(), warnings });
                }
                debug!("no setting of '{}' has the given transforms", hm);
            }
        }

        let id = candidate.id();
        if 1 <= id && id <= 230 {
            let settings = self.by_id(id);
            if has_transforms {
                if let Some(group) = settings.iter().find(|g| ***g == *candidate) {
                    return Ok(Found { group: group.clone(), warnings });
                }
            }
            match settings.len() {
                0 => {},
                1 => return Ok(Found { group: settings[0].clone(), warnings }),
                _ => warnings.push(ambiguity(&format!("#{}", id), settings)),
            }
        }

        if !candidate.is_valid() {
            return Err(UnresolvableGroupError::new(format!("{} (not a valid group)", candidate)));
        }
        tables.groups.iter()
            .find(|g| ***g == *candidate)
            .map(|group| Found { group: group.clone(), warnings })
            .ok_or_else(|| UnresolvableGroupError::new(candidate.to_string()))
    }
}

fn ambiguity(key: &str, settings: &[Arc<SpaceGroup>]) -> Warning
{
    let warning = AmbiguousGroupWarning {
        key: key.to_string(),
        settings: settings.iter().map(|g| g.to_string()).collect(),
    };
    warn!("{}", warning);
    Warning::Ambiguous(warning)
}

//--------------------------------------------------------------------
// loading

fn load_tables(source: &CatalogSource) -> Tables
{
    let mut tables = Tables::default();
    let result = read_source(source).and_then(|text| parse_document(&text, &mut tables));
    if let Err(e) = result {
        error!("{}", e);
        tables.error = Some(e);
    }
    info!("Space group catalog: {} settings of {} groups", tables.groups.len(), tables.by_id.len());
    tables
}

fn read_source(source: &CatalogSource) -> Result<String, CatalogLoadError>
{
    match source {
        CatalogSource::Bundled => Ok(BUNDLED_YAML.to_string()),
        CatalogSource::Text(text) => Ok(text.clone()),
        CatalogSource::Path(path) => read_file(path),
    }
}

fn read_file(path: &Path) -> Result<String, CatalogLoadError>
{
    std::fs::read_to_string(path).map_err(|error| {
        CatalogLoadError::Io { path: path.display().to_string(), error }
    })
}

fn parse_document(text: &str, tables: &mut Tables) -> Result<(), CatalogLoadError>
{
    let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(CatalogLoadError::Yaml)?;
    let document: Document = serde_ignored::deserialize(
        value,
        |path| warn!("Unused space group catalog key (possible typo?): {}", path),
    ).map_err(CatalogLoadError::Yaml)?;

    let entries = document.groups.ok_or(CatalogLoadError::NoGroups)?;
    for (index, value) in entries.into_iter().enumerate() {
        match build_entry(value) {
            Ok((group, hm_short)) => tables.register(group, hm_short),
            Err(e) => warn!("Skipping space group catalog entry {}: {}", index, e),
        }
    }
    Ok(())
}

fn build_entry(value: serde_yaml::Value) -> Result<(SpaceGroup, Option<String>), Error>
{Ok({
    let entry: Entry = serde_ignored::deserialize(
        value,
        |path| warn!("Unused space group entry key (possible typo?): {}", path),
    )?;
    ensure!(1 <= entry.id && entry.id <= 230, "id {} is out of range", entry.id);

    let hm = entry.hm.unwrap_or_default();
    let hall = entry.hall.unwrap_or_default();
    let mut group = SpaceGroup::new(entry.id).with_names(hm, hall.clone());

    match (entry.transforms, hall.is_empty()) {
        (Some(transforms), _) => {
            for text in &transforms {
                group.add_transform(text)?;
            }
        },
        (None, false) => {
            for op in &crate::hall::expand_hall(&hall)? {
                group.push_transform(AffineTransform::from_seitz(op));
            }
        },
        (None, true) => bail!("entry for #{} has neither transforms nor a Hall symbol", entry.id),
    }
    (group, entry.hm_short)
})}

impl Tables {
    fn register(&mut self, group: SpaceGroup, hm_short: Option<String>)
    {
        let group = Arc::new(group);
        self.groups.push(group.clone());
        self.by_id.entry(group.id()).or_insert_with(Vec::new).push(group.clone());

        if !group.hm_name().is_empty() {
            self.by_hm.entry(group.hm_name().to_string()).or_insert_with(Vec::new).push(group.clone());
        }
        if let Some(short) = hm_short {
            if !short.is_empty() && short != group.hm_name() {
                self.by_hm.entry(short).or_insert_with(Vec::new).push(group.clone());
            }
        }
        if !group.hall_name().is_empty() {
            let hall = group.hall_name().to_string();
            if self.by_hall.contains_key(&hall) {
                warn!("Duplicate Hall symbol '{}' in space group catalog; keeping the first", hall);
            } else {
                self.by_hall.insert(hall, group.clone());
            }
        }
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SMALL: &str = "
groups:
  - id: 3
    HM: 'P 1 2 1'
    HMs: 'P2'
    Hall: 'P 2y'
  - id: 3
    HM: 'P 1 1 2'
    HMs: 'P2'
    Hall: 'P 2'
  - id: 2
    HM: 'P -1'
    Hall: '-P 1'
    transforms: ['x,y,z', '-x,-y,-z']
  - id: 4
    Hall: 'P 2yb'
    transforms: ['x,y,z', '-x,y+1/2,-z', 'not a transform']
  - id: 999
    Hall: 'P 1'
  - id: 5
    HM: 'C 1 2 1'
    Hall: 'C 2y'
    colour: 'blue'
";

    fn group(id: u32, ops: &[&str]) -> SpaceGroup
    {
        let mut g = SpaceGroup::new(id);
        for op in ops {
            g.add_transform(op).unwrap();
        }
        g
    }

    #[test]
    fn loading_skips_bad_entries() {
        let _ = env_logger::try_init();
        let catalog = SpaceGroupCatalog::from_yaml_str(SMALL);
        assert_eq!(catalog.len(), 4);
        assert!(catalog.load_error().is_none());
        assert_eq!(catalog.by_id(3).len(), 2);
        assert_eq!(catalog.by_id(4).len(), 0);
        assert_eq!(catalog.by_id(999).len(), 0);
        assert_eq!(catalog.by_id(5)[0].len(), 4);
    }

    #[test]
    fn infinite_hall_entry_is_skipped() {
        let _ = env_logger::try_init();
        let catalog = SpaceGroupCatalog::from_yaml_str("
groups:
  - { id: 1, Hall: 'P 3 4x' }
  - { id: 2, Hall: '-P 1' }
");
        assert!(catalog.load_error().is_none());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.by_id(1).is_empty());
        assert_eq!(catalog.by_name("-P 1").map(|g| g.len()), Some(2));
    }

    #[test]
    fn names_first_registration_wins() {
        let catalog = SpaceGroupCatalog::from_yaml_str(SMALL);
        assert_eq!(catalog.by_name("P2").unwrap().hall_name(), "P 2y");
        assert_eq!(catalog.by_name("P 1 1 2").unwrap().hall_name(), "P 2");
        assert_eq!(catalog.by_name("P 2").unwrap().hm_name(), "P 1 1 2");
        assert!(catalog.by_name("P 21").is_none());
        let ids = catalog.all().map(|g| g.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 3, 2, 5]);
    }

    #[test]
    fn load_errors_are_retained() {
        let _ = env_logger::try_init();

        let catalog = SpaceGroupCatalog::from_yaml_str("[1, 2");
        assert!(catalog.is_empty());
        match catalog.load_error() {
            Some(CatalogLoadError::Yaml(_)) => {},
            e => panic!("unexpected: {:?}", e),
        }

        let catalog = SpaceGroupCatalog::from_yaml_str("something: else");
        assert!(catalog.by_name("P 2y").is_none());
        match catalog.load_error() {
            Some(CatalogLoadError::NoGroups) => {},
            e => panic!("unexpected: {:?}", e),
        }

        let catalog = SpaceGroupCatalog::from_path("/this/path/does/not/exist.yaml");
        assert_eq!(catalog.by_id(1).len(), 0);
        match catalog.ensure_loaded().load_error() {
            Some(CatalogLoadError::Io { .. }) => {},
            e => panic!("unexpected: {:?}", e),
        }
    }

    #[test]
    fn find_by_hall() {
        let catalog = SpaceGroupCatalog::from_yaml_str(SMALL);
        let found = catalog.find(&SpaceGroup::new(0).with_names("", "P 2")).unwrap();
        assert_eq!(found.group.hm_name(), "P 1 1 2");
        assert!(found.warnings.is_empty());

        // wrong transforms are reported, but the entry is still used
        let mut wrong = group(0, &["x,y,z"]).with_names("", "P 2");
        wrong.add_transform("-x,y,-z").unwrap();
        let found = catalog.find(&wrong).unwrap();
        assert_eq!(found.group.hall_name(), "P 2");
        assert_eq!(found.warnings, vec![Warning::HallMismatch { hall: "P 2".into() }]);
    }

    #[test]
    fn find_by_hm() {
        let catalog = SpaceGroupCatalog::from_yaml_str(SMALL);

        let found = catalog.find(&SpaceGroup::new(0).with_names("P2", "")).unwrap();
        assert_eq!(found.group.hall_name(), "P 2y");
        match &found.warnings[..] {
            [Warning::Ambiguous(w)] => {
                assert_eq!(w.key, "P2");
                assert_eq!(w.settings.len(), 2);
            },
            w => panic!("unexpected: {:?}", w),
        }

        let unique_axis_c = group(0, &["x,y,z", "-x,-y,z"]).with_names("P2", "");
        let found = catalog.find(&unique_axis_c).unwrap();
        assert_eq!(found.group.hall_name(), "P 2");
        assert!(found.warnings.is_empty());
    }

    #[test]
    fn find_by_id() {
        let catalog = SpaceGroupCatalog::from_yaml_str(SMALL);

        let found = catalog.find(&group(3, &["-x,-y,z", "x,y,z"])).unwrap();
        assert_eq!(found.group.hall_name(), "P 2");

        // a single setting is taken even if the transforms disagree
        let found = catalog.find(&group(2, &["x,y,z"])).unwrap();
        assert_eq!(found.group.hall_name(), "-P 1");

        // several settings and nothing to choose between them
        assert!(catalog.find(&SpaceGroup::new(3)).is_err());
    }

    #[test]
    fn find_exhaustive() {
        let catalog = SpaceGroupCatalog::from_yaml_str(SMALL);
        let found = catalog.find(&group(0, &["-x,-y,-z", "x,y,z"])).unwrap();
        assert_eq!(found.group.id(), 2);

        // not a group
        assert!(catalog.find(&group(0, &["-x,-y,-z"])).is_err());
        // a group, but not in the catalog
        assert!(catalog.find(&group(0, &["x,y,z", "-x,y,z"])).is_err());
        assert!(catalog.find(&SpaceGroup::new(0)).is_err());
    }
}
