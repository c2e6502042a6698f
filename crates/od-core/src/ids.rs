//! Strongly typed zone identifier.
//!
//! Zone ids come from the shape file as free-form strings (numeric ids are
//! stringified on load), so `ZoneId` wraps a `String` rather than an integer
//! index.  `Ord` is plain byte-wise string order; the flow renderer relies on
//! it to pick a canonical direction for each unordered zone pair.
//!
//! Byte order on UTF-8 equals code point order.  It differs from UTF-16
//! code-unit order (what a browser's `<` compares) only when a character
//! above U+FFFF meets one in U+E000..=U+FFFF: here `"\u{FFFD}" < "\u{1F600}"`,
//! in UTF-16 the surrogate pair sorts first.  ASCII and the digit ids of
//! real shape files order the same either way.

use std::borrow::Borrow;
use std::fmt;

/// Identifier of an administrative zone.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ZoneId(pub String);

impl ZoneId {
    /// Build an id from anything string-like.  Surrounding whitespace is kept;
    /// trip ids are trimmed on load, zone ids are not.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    #[inline]
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ZoneId {
    #[inline]
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for ZoneId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ZoneId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}
