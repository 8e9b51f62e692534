//! Node identifiers backed by a global string interner.
//!
//! Roadmap nodes are referenced by id in progress maps, position maps and
//! selection callbacks. Interning keeps those ids `Copy` and cheap to hash.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier of a roadmap node.
///
/// # Examples
///
/// ```
/// use trailmap_core::identifier::Id;
///
/// let intro = Id::new("intro-to-rust");
/// let same: Id = "intro-to-rust".into();
///
/// assert_eq!(intro, same);
/// assert_eq!(intro, "intro-to-rust");
/// assert_eq!(intro.to_string(), "intro-to-rust");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Identifier for the node at `index` when a document leaves ids out.
    ///
    /// ```
    /// use trailmap_core::identifier::Id;
    ///
    /// assert_eq!(Id::from_index(3), "node-3");
    /// ```
    pub fn from_index(index: usize) -> Self {
        Self::new(&format!("node-{index}"))
    }

    /// Runs `f` with the interned string, avoiding an allocation.
    fn with_str<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        f(interner.resolve(self.0).unwrap_or_default())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|s| f.write_str(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|s| s == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}
