/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Space groups as sets of affine operations on fractional coordinates.
//!
//! The main entry points are `AffineTransform` (a single operation),
//! `SpaceGroup` (a setting of a group), and `SpaceGroupCatalog` (the table
//! of known settings, read from a YAML resource).

#[macro_use] extern crate log;
#[macro_use] extern crate failure;
#[macro_use] extern crate itertools;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate serde_derive;
#[cfg(test)] #[macro_use] extern crate crysym_assert_close;

mod errors;
mod util;
mod oper;
mod group;
mod hall;
mod spacegroup;
mod catalog;

pub use crate::errors::{
    ParseError, ParseErrorKind,
    HallParseError, HallErrorKind,
    CatalogLoadError,
    UnresolvableGroupError,
    AmbiguousGroupWarning, Warning,
};
pub use crate::util::{
    wrap_frac, wrap_point, same_point, same_point_periodic, push_unique,
    WRAP_TOL, POINT_TOL,
};
pub use crate::oper::{AffineTransform, SeitzOp};
pub use crate::hall::expand_hall;
pub use crate::spacegroup::SpaceGroup;
pub use crate::catalog::{SpaceGroupCatalog, CatalogSource, Found};
