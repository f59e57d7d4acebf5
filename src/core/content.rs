//! # Content Cache
//!
//! Decoded text per entry path, for the lifetime of one imported archive.
//! A path is recorded as `Loading` the moment its decode is requested, so a
//! second selection while the first request is in flight never issues
//! another one. Failures are remembered as `Unreadable` for the same reason.

use std::collections::HashMap;

use crate::archive::ArchiveError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Decode requested, result not yet delivered.
    Loading,
    Text(String),
    /// Decode failed; holds the reason shown to the user.
    Unreadable(String),
}

#[derive(Debug, Default)]
pub struct ContentCache {
    entries: HashMap<String, Content>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&Content> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mark `path` as loading. Returns `true` if a decode should be issued,
    /// `false` if the path is already loading or resolved.
    pub fn begin(&mut self, path: &str) -> bool {
        if self.entries.contains_key(path) {
            return false;
        }
        self.entries.insert(path.to_string(), Content::Loading);
        true
    }

    /// Store the outcome of a decode.
    pub fn resolve(&mut self, path: &str, result: Result<String, ArchiveError>) {
        let content = match result {
            Ok(text) => Content::Text(text),
            Err(e) => Content::Unreadable(e.to_string()),
        };
        self.entries.insert(path.to_string(), content);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
