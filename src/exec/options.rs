//! Option mapping serialized into command-line flags
//!
//! Callers describe an extraction with named options; the mapping is turned
//! into `--key value` argument pairs and forwarded verbatim. The external
//! tool is the authority on what the keys mean, so no validation happens
//! here beyond the page-selector type.

use std::fmt;

/// Page selector forwarded to the external tool.
///
/// Either an explicit list of page numbers or a verbatim range expression
/// such as `"1-10"`. Range expressions are not validated; the tool rejects
/// malformed selectors itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pages {
    /// Explicit page numbers, serialized comma-joined
    List(Vec<u32>),
    /// Verbatim range expression, e.g. `"1-10"`
    Range(String),
}

impl fmt::Display for Pages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pages::List(pages) => {
                let joined = pages
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&joined)
            }
            Pages::Range(range) => f.write_str(range),
        }
    }
}

/// Ordered mapping of option names to values.
///
/// Insertion order is preserved so serialized flag order is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Options {
    entries: Vec<(String, String)>,
}

impl Options {
    /// Create an empty option mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option. An existing key keeps its position and gets the new
    /// value; a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        let key = key.into();
        let value = value.to_string();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up an option value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether an option is set
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove an option, returning its value if it was set
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Whether no options are set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize into `--key value` argument pairs
    pub fn to_args(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(key, value)| [format!("--{key}"), value.clone()])
            .collect()
    }
}
