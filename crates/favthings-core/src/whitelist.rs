//! Whitelist of accepted category names.
//!
//! The `categories.conf` format is deliberately loose: every line is split on
//! `:` and each trimmed, non-empty token is a category name.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{FavThingsError, Result};

const BUILTIN_CATEGORIES_CONF: &str = include_str!("../resources/categories.conf");

/// Read-only set of category names the parser accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    names: HashSet<String>,
}

impl Whitelist {
    /// The categories bundled with the library.
    pub fn builtin() -> Self {
        Self::from_conf_str(BUILTIN_CATEGORIES_CONF)
    }

    pub fn from_conf_str(content: &str) -> Self {
        content
            .lines()
            .flat_map(|line| line.split(':'))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Load a `categories.conf` file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FavThingsError::WhitelistNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(Self::from_conf_str(&content))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Accepted names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Whitelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for Whitelist {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}
