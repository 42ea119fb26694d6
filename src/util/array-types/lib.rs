/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Tiny fixed-size vector and matrix types.
//!
//! Matrices are containers of row vectors.  Both conventions for
//! matrix-vector products are available; `&v * &m` treats `v` as a row
//! vector and `&m * &v` treats it as a column vector.  Which one a piece of
//! code means should always be obvious from how it is written.

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

mod types;
mod traits;
mod ops;
mod methods;

pub use crate::types::*;
pub use crate::traits::{Semiring, Ring, Field};
pub use crate::methods::{dot, inv};

/// Functions for constructing matrices.
pub mod mat {
    pub use crate::methods::{from_array, from_fn, eye, inv};
}

/// Functions for constructing vectors.
pub mod vee {
    pub use crate::methods::vee_from_fn as from_fn;
}
