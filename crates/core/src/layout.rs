//! Designated documentation paths of a project
//!
//! Every path is derived from the project root once, at startup. The
//! aggregator compares incoming event paths against these by equality and
//! component prefix.

use std::path::{Path, PathBuf};

/// Directory holding the project documentation, relative to the root
pub const DOCS_DIR: &str = "docs";

/// File the summarization request writes to, relative to the docs directory
pub const OUTPUT_FILE: &str = "README.md";

/// Agent instruction files at the project root
pub const INSTRUCTION_FILES: [&str; 2] = ["AGENTS.md", "CLAUDE.md"];

/// Designated documentation paths for a project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLayout {
    root: PathBuf,
    docs_dir: PathBuf,
    output_file: PathBuf,
    instruction_files: [PathBuf; 2],
}

impl DocLayout {
    /// Derive the layout from an absolute project root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let docs_dir = root.join(DOCS_DIR);
        let output_file = docs_dir.join(OUTPUT_FILE);
        let instruction_files = INSTRUCTION_FILES.map(|name| root.join(name));

        Self {
            root,
            docs_dir,
            output_file,
            instruction_files,
        }
    }

    /// Project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Designated documentation directory (`<root>/docs/`)
    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    /// Destination of the summarization request (`<root>/docs/README.md`)
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Instruction files that never trigger an update
    pub fn instruction_files(&self) -> &[PathBuf] {
        &self.instruction_files
    }

    /// Whether `path` is an instruction file
    pub fn is_instruction_file(&self, path: &Path) -> bool {
        self.instruction_files.iter().any(|f| f == path)
    }

    /// Whether `path` lies strictly inside the docs directory
    pub fn is_in_docs_dir(&self, path: &Path) -> bool {
        path != self.docs_dir && path.starts_with(&self.docs_dir)
    }
}
