//! Set of changed paths awaiting the next flush

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Unique paths in insertion order
///
/// Order is kept for readable prompts only; consumers must not rely on it.
#[derive(Debug, Default)]
pub struct PendingSet {
    order: Vec<PathBuf>,
    members: HashSet<PathBuf>,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path, returning `false` if it was already pending
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.members.contains(&path) {
            return false;
        }
        self.members.insert(path.clone());
        self.order.push(path);
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.members.contains(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.order.iter()
    }

    /// Take every pending path, leaving the set empty
    pub fn drain(&mut self) -> Vec<PathBuf> {
        self.members.clear();
        std::mem::take(&mut self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut pending = PendingSet::new();
        assert!(pending.insert(PathBuf::from("/p/docs/a.md")));
        assert!(!pending.insert(PathBuf::from("/p/docs/a.md")));
        assert!(pending.insert(PathBuf::from("/p/docs/b.md")));
        assert_eq!(pending.len(), 2);
        assert!(pending.contains(Path::new("/p/docs/a.md")));
    }

    #[test]
    fn test_drain_empties_and_keeps_order() {
        let mut pending = PendingSet::new();
        pending.insert(PathBuf::from("/p/b.md"));
        pending.insert(PathBuf::from("/p/a.md"));
        pending.insert(PathBuf::from("/p/b.md"));

        let drained = pending.drain();
        assert_eq!(
            drained,
            vec![PathBuf::from("/p/b.md"), PathBuf::from("/p/a.md")]
        );
        assert!(pending.is_empty());
        assert!(!pending.contains(Path::new("/p/a.md")));
        assert!(pending.insert(PathBuf::from("/p/a.md")));
    }
}
