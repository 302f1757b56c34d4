//! Snapshot persistence.
//!
//! What was seen on the previous run lives in a single JSON file in the
//! cache directory, as a flat key/value map namespaced by key prefix:
//!
//! ```text
//! {
//!   "updated_at": "2026-10-19T08:00:00Z",
//!   "entries": {
//!     "lastComment/62025": { "content": "...", "vote": "rulez", "author": "ced" },
//!     "lastComment/70001": null,
//!     "knownProduction/https://www.pouet.net/prod.php?which=100": "Climax"
//!   }
//! }
//! ```

pub mod local;

use std::fmt;

pub use local::SnapshotStore;

/// Key namespaces of the snapshot store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// `lastComment/<prodId>` → `Comment | null`
    LastComment,
    /// `knownProduction/<prodLink>` → name
    KnownProduction,
}

impl Namespace {
    pub const ALL: [Namespace; 2] = [Namespace::LastComment, Namespace::KnownProduction];

    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::LastComment => "lastComment",
            Namespace::KnownProduction => "knownProduction",
        }
    }

    /// Full store key for `id` in this namespace.
    pub fn key(self, id: &str) -> String {
        format!("{}/{}", self.prefix(), id)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
