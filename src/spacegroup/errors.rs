/* ************************************************************************ **
** This file is part of crysym, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::fmt;
use std::io;

/// Malformed symmetry operation text.
#[derive(Debug, Fail)]
#[fail(display = "Unable to parse symmetry operation {:?}: {}", text, kind)]
pub struct ParseError {
    pub text: String,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Fail)]
pub enum ParseErrorKind {
    #[fail(display = "expected 3 comma-separated rows, found {}", _0)]
    RowCount(usize),
    #[fail(display = "empty term")]
    EmptyTerm,
    #[fail(display = "bad number {:?}", _0)]
    BadNumber(String),
    #[fail(display = "zero denominator in {:?}", _0)]
    ZeroDenominator(String),
    #[fail(display = "unknown token {:?}", _0)]
    UnknownToken(String),
    #[fail(display = "expected 12 or 16 numbers, found {}", _0)]
    NumberCount(usize),
}

/// Malformed Hall symbol.
#[derive(Debug, Fail)]
#[fail(display = "Invalid Hall symbol {:?}: {}", symbol, kind)]
pub struct HallParseError {
    pub symbol: String,
    pub kind: HallErrorKind,
}

#[derive(Debug, Clone, PartialEq, Fail)]
pub enum HallErrorKind {
    #[fail(display = "no lattice symbol or rotation")]
    Empty,
    #[fail(display = "bad lattice symbol {:?}", _0)]
    BadLattice(String),
    #[fail(display = "bad rotation {:?}", _0)]
    BadRotation(String),
    #[fail(display = "rotation {:?} has no default axis here", _0)]
    NoDefaultAxis(String),
    #[fail(display = "bad origin shift {:?}", _0)]
    BadShift(String),
    #[fail(display = "generators do not close into a group of at most {} operations", _0)]
    NotFinite(usize),
}

/// The catalog resource could not be read at all.
///
/// Problems with individual entries are not errors; those entries are
/// skipped with a warning.
#[derive(Debug, Fail)]
pub enum CatalogLoadError {
    #[fail(display = "Could not read space group catalog '{}'", path)]
    Io {
        path: String,
        #[fail(cause)] error: io::Error,
    },
    #[fail(display = "Space group catalog is not valid YAML: {}", _0)]
    Yaml(#[fail(cause)] serde_yaml::Error),
    #[fail(display = "Space group catalog has no 'groups' list")]
    NoGroups,
}

/// No catalog group matches a candidate or a set of sites.
#[derive(Debug, Fail)]
#[fail(display = "No known space group matches {}", what)]
pub struct UnresolvableGroupError {
    backtrace: failure::Backtrace,
    pub what: String,
}

impl UnresolvableGroupError {
    pub fn new(what: impl Into<String>) -> Self {
        UnresolvableGroupError {
            backtrace: failure::Backtrace::new(),
            what: what.into(),
        }
    }
}

/// A lookup key matched more than one setting and the first was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbiguousGroupWarning {
    /// The name or id that was looked up.
    pub key: String,
    /// Display names of every setting sharing the key, in registration order.
    pub settings: Vec<String>,
}

impl fmt::Display for AmbiguousGroupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is shared by {} settings ({})", self.key, self.settings.len(), self.settings.join("; "))?;
        if let Some(first) = self.settings.first() {
            write!(f, "; using {}", first)?;
        }
        Ok(())
    }
}

/// Something questionable noticed while resolving a group against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    Ambiguous(AmbiguousGroupWarning),
    /// The Hall name matched, but the candidate's own transforms did not.
    HallMismatch { hall: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Ambiguous(w) => fmt::Display::fmt(w, f),
            Warning::HallMismatch { hall } => {
                write!(f, "transforms disagree with catalog entry '{}'; using the catalog's", hall)
            },
        }
    }
}
