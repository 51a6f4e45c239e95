//! Include-list parsing
//!
//! The module list comes from a single configuration string shaped like
//! `[core, ui, widgets]`. Parsing is deliberately lenient: brackets and commas
//! are dropped and the rest is split on whitespace. Anything that does not
//! look like a list still yields names; names that do not match a module
//! directory are filtered out later by the inclusion check.

use std::fmt;

/// Ordered module names from the include list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleNameList {
    names: Vec<String>,
}

impl ModuleNameList {
    /// Parse a raw include-list string
    pub fn parse(raw: &str) -> Self {
        let cleaned: String = raw
            .chars()
            .map(|c| match c {
                '[' | ']' | ',' => ' ',
                other => other,
            })
            .collect();

        Self {
            names: cleaned.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Names in configuration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names, duplicates included
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate names in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Display for ModuleNameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}

impl<'a> IntoIterator for &'a ModuleNameList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
