//! Shared, append-only table of package names.
//!
//! Thousands of keys share a handful of packages, so decoded records point at
//! one `Arc<str>` per distinct package instead of allocating per key. The table
//! is safe to use from every decode worker at once.

use ahash::AHashSet;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct PackageInterner {
    names: RwLock<AHashSet<Arc<str>>>,
}

impl PackageInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared copy of `name`, inserting it on first sight.
    pub fn intern(&self, name: &str) -> Arc<str> {
        if let Some(existing) = self.names.read().get(name) {
            return Arc::clone(existing);
        }

        let mut names = self.names.write();
        // Another worker may have inserted between the two locks.
        if let Some(existing) = names.get(name) {
            return Arc::clone(existing);
        }
        let interned: Arc<str> = Arc::from(name);
        names.insert(Arc::clone(&interned));
        interned
    }

    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}
