//! Visited registry and discovery trail
//!
//! One flat map from URL to the URL that discovered it first. The map is
//! only ever grown through [`Trail::claim`], which checks, marks, and records
//! the parent under a single lock, so concurrent discoverers of the same page
//! can never both win.

use crate::SearchError;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Shared map of claimed URLs to their discovering parent
///
/// The root (start page) is recorded with no parent.
#[derive(Debug, Default)]
pub struct Trail {
    entries: Mutex<HashMap<String, Option<String>>>,
}

impl Trail {
    /// Creates an empty trail
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Option<String>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims `url` for exploration and records who found it
    ///
    /// Returns true only for the single call that performed the claim. Every
    /// later call for the same URL returns false and changes nothing.
    pub fn claim(&self, url: &str, parent: Option<&str>) -> bool {
        let mut entries = self.lock();
        if entries.contains_key(url) {
            return false;
        }
        entries.insert(url.to_owned(), parent.map(str::to_owned));
        true
    }

    /// Returns the URL that discovered `url`, if any
    ///
    /// `None` both for the root and for unclaimed URLs.
    pub fn parent_of(&self, url: &str) -> Option<String> {
        self.lock().get(url).cloned().flatten()
    }

    /// Number of claimed URLs
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether nothing has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Rebuilds the path from the root to `target`
    ///
    /// Follows parent links backward from `target` until the root, then
    /// reverses, so the result starts at the root and ends at `target`.
    pub fn path_to(&self, target: &str) -> Result<Vec<String>, SearchError> {
        let entries = self.lock();
        let mut path = vec![target.to_owned()];
        let mut current = target;

        loop {
            match entries.get(current) {
                None => return Err(SearchError::BrokenTrail(current.to_owned())),
                Some(None) => break,
                Some(Some(parent)) => {
                    // Parents are claimed before their children, so a chain
                    // longer than the map means it loops.
                    if path.len() > entries.len() {
                        return Err(SearchError::BrokenTrail(parent.clone()));
                    }
                    path.push(parent.clone());
                    current = parent.as_str();
                }
            }
        }

        path.reverse();
        Ok(path)
    }
}
