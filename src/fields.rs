//! Field names understood by the cdnjs API.
//!
//! The API lets callers restrict a response to a subset of attributes via the
//! `fields` query parameter. Callers may name those attributes either by the
//! Rust field name of the model (`latest_main_file_url`) or by the JSON key the
//! server uses (`latest`). [`FieldNameRegistry`] maps the former to the latter.
//! Lookups ignore case and underscores, so `LatestMainFileUrl` and
//! `latest_main_file_url` name the same attribute.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Canonical attribute name to wire name, in declaration order.
///
/// `LibraryMetadata` attributes come first, then `LibraryAssets`. Entries must
/// stay in sync with the serde renames in [`crate::models`].
const FIELD_TABLE: &[(&str, &str)] = &[
    // LibraryMetadata
    ("name", "name"),
    ("version", "version"),
    ("latest_main_file_url", "latest"),
    ("latest_main_file_sri", "sri"),
    ("latest_main_filename", "filename"),
    ("description", "description"),
    ("keywords", "keywords"),
    ("author", "author"),
    ("homepage_url", "homepage"),
    ("assets", "assets"),
    ("versions", "versions"),
    // LibraryAssets
    ("name", "name"),
    ("version", "version"),
    ("raw_files", "rawFiles"),
    ("files", "files"),
    ("sri", "sri"),
];

static REGISTRY: Lazy<FieldNameRegistry> =
    Lazy::new(|| FieldNameRegistry::from_pairs(FIELD_TABLE.iter().copied()));

/// Returns the process-wide field name registry.
pub fn field_names() -> &'static FieldNameRegistry {
    &REGISTRY
}

// Lowercase with underscores removed.
fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Immutable mapping of canonical attribute names to wire names.
///
/// Lookups ignore ASCII case and underscores.
#[derive(Debug, Clone)]
pub struct FieldNameRegistry {
    // Keyed by lookup_key(canonical).
    entries: IndexMap<String, (&'static str, &'static str)>,
}

impl FieldNameRegistry {
    /// Build a registry from `(canonical, wire)` pairs.
    ///
    /// When the same canonical name (ignoring case and underscores) appears
    /// more than once,
    /// the first pair wins.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str)>,
    {
        let mut entries = IndexMap::new();
        for (canonical, wire) in pairs {
            entries
                .entry(lookup_key(canonical))
                .or_insert((canonical, wire));
        }
        Self { entries }
    }

    /// Look up the wire name for a canonical attribute name.
    pub fn wire_name(&self, canonical: &str) -> Option<&'static str> {
        self.entries
            .get(&lookup_key(canonical))
            .map(|(_, wire)| *wire)
    }

    /// Resolve a requested field to the name sent on the wire.
    ///
    /// Unknown names are returned unchanged.
    pub fn resolve<'a>(&self, name: &'a str) -> &'a str {
        self.wire_name(name).unwrap_or(name)
    }

    /// Iterate `(canonical, wire)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.values().copied()
    }

    /// Canonical names in registration order.
    pub fn canonical_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.values().map(|(canonical, _)| *canonical)
    }

    /// Distinct wire names in registration order.
    pub fn wire_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::with_capacity(self.entries.len());
        for (_, wire) in self.entries.values() {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(wire)) {
                names.push(wire);
            }
        }
        names
    }

    /// Number of canonical names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Set of requested field names.
///
/// Names compare case-insensitively; the first spelling added is the one
/// kept. Iteration follows insertion order so rendered queries are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    names: IndexMap<String, String>,
}

impl FieldSet {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name. Returns false if an equal name (ignoring case) was present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let key = name.to_ascii_lowercase();
        if self.names.contains_key(&key) {
            return false;
        }
        self.names.insert(key, name);
        true
    }

    /// Remove a name. Returns true if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names
            .shift_remove(&name.to_ascii_lowercase())
            .is_some()
    }

    /// Returns true if the set contains `name`, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&name.to_ascii_lowercase())
    }

    /// Remove every name.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Number of names in the set.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate names as originally spelled, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for FieldSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}
