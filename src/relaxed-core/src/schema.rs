use serde::{Deserialize, Serialize};

/// Expected shape of an accepted parameter.
///
/// The kind drives serialization only; caller values are not type-checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Int,
    Str,
    List,
    Object,
}

impl ValueKind {
    /// Structured kinds travel as JSON text in a query string
    pub fn is_structured(self) -> bool {
        matches!(self, ValueKind::List | ValueKind::Object)
    }
}

/// Exhaustive allow-list of parameter names for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySchema {
    entries: &'static [(&'static str, ValueKind)],
}

impl KeySchema {
    pub const fn new(entries: &'static [(&'static str, ValueKind)]) -> Self {
        Self { entries }
    }

    pub fn kind_of(&self, key: &str) -> Option<ValueKind> {
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, kind)| *kind)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.kind_of(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
