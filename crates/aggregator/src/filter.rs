//! Path rules deciding which changes count as documentation

use docsync_core::DocLayout;
use std::fmt;
use std::path::Path;

/// Why a path was accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptReason {
    /// Inside the designated documentation directory
    DocsDirectory,
    /// A markdown file anywhere else
    Markdown,
}

/// Why a path was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The summary output file; accepting it would re-trigger on our own write
    OutputFile,
    /// An agent instruction file
    InstructionFile,
    /// Neither in the docs directory nor markdown
    NotDocumentation,
}

/// Result of classifying a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept(AcceptReason),
    Ignore(IgnoreReason),
}

impl Verdict {
    /// Whether the path joins the pending set
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Accept(AcceptReason::DocsDirectory) => "accept (docs directory)",
            Self::Accept(AcceptReason::Markdown) => "accept (markdown file)",
            Self::Ignore(IgnoreReason::OutputFile) => "ignore (summary output file)",
            Self::Ignore(IgnoreReason::InstructionFile) => "ignore (instruction file)",
            Self::Ignore(IgnoreReason::NotDocumentation) => "ignore (not documentation)",
        };
        f.pad(label)
    }
}

/// Classifies change paths against a project's [`DocLayout`]
#[derive(Debug, Clone)]
pub struct PathFilter {
    layout: DocLayout,
}

impl PathFilter {
    pub fn new(layout: DocLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &DocLayout {
        &self.layout
    }

    /// Classify a path. Rules are evaluated in order and the first match wins.
    pub fn classify(&self, path: &Path) -> Verdict {
        if path == self.layout.output_file() {
            return Verdict::Ignore(IgnoreReason::OutputFile);
        }
        if self.layout.is_instruction_file(path) {
            return Verdict::Ignore(IgnoreReason::InstructionFile);
        }
        if self.layout.is_in_docs_dir(path) {
            return Verdict::Accept(AcceptReason::DocsDirectory);
        }
        if is_markdown(path) {
            return Verdict::Accept(AcceptReason::Markdown);
        }
        Verdict::Ignore(IgnoreReason::NotDocumentation)
    }
}

/// Suffix match on the file name, so `.md` alone still counts
fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().ends_with(b".md"))
}
