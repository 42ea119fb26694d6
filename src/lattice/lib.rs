/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Unit cells, lattice families, periodic expansion of sites, and
//! identification of space groups from site positions.

#[macro_use] extern crate log;
#[macro_use] extern crate failure;
#[macro_use] extern crate itertools;
#[macro_use] extern crate serde_derive;
#[cfg(test)] #[macro_use] extern crate crysym_assert_close;

mod cell;
mod family;
mod sites;
mod expander;
mod resolver;

pub use crate::cell::{UnitCell, Lattice, CellError};
pub use crate::family::{LatticeFamily, Centering};
pub use crate::sites::{Site, Bond, CartSite, CartBond};
pub use crate::expander::{FracBox, LatticeExpander, expand, expand_bonds};
pub use crate::resolver::{SpaceGroupResolver, Resolved, resolve, is_consistent};
