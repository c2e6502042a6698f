//! Transport-mode filter.
//!
//! Trip modes are free-form strings taken verbatim (trimmed) from the `Mot`
//! column.  The filter layer reserves `"all"` as a wildcard; it is never a
//! stored trip mode.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Either every mode, or exactly one mode string.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum ModeFilter {
    #[default]
    All,
    Only(String),
}

impl ModeFilter {
    /// The reserved wildcard value.
    pub const WILDCARD: &'static str = "all";

    /// Exact string match; `All` matches every mode.
    #[inline]
    pub fn matches(&self, mode: &str) -> bool {
        match self {
            ModeFilter::All     => true,
            ModeFilter::Only(m) => m == mode,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, ModeFilter::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ModeFilter::All     => Self::WILDCARD,
            ModeFilter::Only(m) => m,
        }
    }
}

impl From<&str> for ModeFilter {
    fn from(s: &str) -> Self {
        match s.trim() {
            Self::WILDCARD => ModeFilter::All,
            m => ModeFilter::Only(m.to_owned()),
        }
    }
}

impl From<String> for ModeFilter {
    fn from(s: String) -> Self {
        ModeFilter::from(s.as_str())
    }
}

impl From<ModeFilter> for String {
    fn from(f: ModeFilter) -> String {
        match f {
            ModeFilter::All     => ModeFilter::WILDCARD.to_owned(),
            ModeFilter::Only(m) => m,
        }
    }
}

impl FromStr for ModeFilter {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ModeFilter::from(s))
    }
}

impl fmt::Display for ModeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
