/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Crystallographic space groups and the expansion of asymmetric units.
//!
//! This crate gathers the pieces from the workspace:
//!
//! * `crysym_spacegroup`: affine operations, space groups, Hall symbols and
//!   the catalog of known settings.
//! * `crysym_lattice`: unit cells, lattice expansion and group identification.
//! * `crysym_config`: YAML settings.
//!
//! `Crystal` ties them together, and `GlobalLogger` sets up logging for
//! programs built on it.

#[macro_use] extern crate log;
#[macro_use] extern crate failure;
#[cfg(test)] #[macro_use] extern crate crysym_assert_close;

mod crystal;
mod logging;

pub use crate::crystal::{Crystal, Expanded, open_catalog};
pub use crate::logging::{GlobalLogger, ColorizedLevel};

pub use crysym_array_types::{V3, M33};
pub use crysym_spacegroup::{
    AffineTransform, SpaceGroup, SpaceGroupCatalog, CatalogSource, Found,
    ParseError, ParseErrorKind, HallParseError, HallErrorKind,
    CatalogLoadError, UnresolvableGroupError, AmbiguousGroupWarning, Warning,
    expand_hall, wrap_frac, wrap_point, same_point, WRAP_TOL, POINT_TOL,
};
pub use crysym_lattice::{
    UnitCell, Lattice, CellError, LatticeFamily, Centering,
    Site, Bond, CartSite, CartBond, FracBox,
    LatticeExpander, SpaceGroupResolver, Resolved,
    expand, expand_bonds, resolve, is_consistent,
};
pub use crysym_config::{Settings, ValidatedSettings, ConfigError, YamlRead};
