//! File change event types
//!
//! Every variant is a "file updated" notification as far as the aggregator is
//! concerned; it only ever looks at [`FileChange::path`].

use std::path::PathBuf;

/// Represents a file system change event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// File was created
    Created(PathBuf),
    /// File was modified
    Modified(PathBuf),
    /// File was deleted
    Deleted(PathBuf),
    /// File was renamed
    Renamed { from: PathBuf, to: PathBuf },
}

impl FileChange {
    /// Get the primary path associated with this change
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Created(path) => path,
            Self::Modified(path) => path,
            Self::Deleted(path) => path,
            Self::Renamed { to, .. } => to,
        }
    }

    /// Short label for log output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Modified(_) => "modified",
            Self::Deleted(_) => "deleted",
            Self::Renamed { .. } => "renamed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_uses_destination_path() {
        let change = FileChange::Renamed {
            from: PathBuf::from("/p/docs/old.md"),
            to: PathBuf::from("/p/docs/new.md"),
        };
        assert_eq!(change.path(), &PathBuf::from("/p/docs/new.md"));
        assert_eq!(change.kind(), "renamed");
    }

    #[test]
    fn test_path_for_simple_variants() {
        let path = PathBuf::from("/p/TOP.md");
        assert_eq!(FileChange::Created(path.clone()).path(), &path);
        assert_eq!(FileChange::Modified(path.clone()).path(), &path);
        assert_eq!(FileChange::Deleted(path.clone()).path(), &path);
    }
}
