//! Named value store for event scripting
//!
//! Conditions and operations read and write string-keyed values here.
//! Numbers are stored in their string form and parsed on access, so a key
//! written as a flag can later be read as a counter and vice versa. A
//! failed parse is a [`GameError::MalformedValue`], never a panic.
//!
//! The store is owned by the session and passed to evaluation explicitly.
//! Every mutation bumps `version`, which lets collaborators cheaply detect
//! that script state changed since they last looked.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};

/// Versioned string key-value store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Values {
    entries: AHashMap<String, String>,
    version: u64,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutation counter; reads never change it
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
        self.version += 1;
    }

    /// Read a value as a number
    ///
    /// Returns `Ok(None)` for an absent key and `MalformedValue` for a
    /// present value that does not parse.
    pub fn get_number(&self, key: &str) -> Result<Option<f32>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<f32>()
                .map(Some)
                .map_err(|_| GameError::MalformedValue {
                    key: key.to_string(),
                    value: raw.clone(),
                }),
        }
    }

    pub fn set_number(&mut self, key: impl Into<String>, value: f32) {
        self.set_str(key, value.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
