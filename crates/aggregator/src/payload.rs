//! Flush payload construction

use chrono::NaiveDate;
use std::path::PathBuf;

/// Label appended to the date to form the session title
pub const DEFAULT_SESSION_LABEL: &str = "Docs Update Plugin";

/// Title of the session that collects one calendar day of updates
///
/// ```
/// use chrono::NaiveDate;
/// use docsync_aggregator::session_title;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
/// assert_eq!(session_title(date, "Docs Update Plugin"), "2026-03-09 Docs Update Plugin");
/// ```
pub fn session_title(date: NaiveDate, label: &str) -> String {
    format!("{} {label}", date.format("%Y-%m-%d"))
}

/// The batch handed to the session server by one flush
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushPayload {
    /// Changed files in pending-set order
    pub files: Vec<PathBuf>,
    /// Title of the session the prompt goes to
    pub session_title: String,
}

impl FlushPayload {
    pub fn new(files: Vec<PathBuf>, date: NaiveDate, label: &str) -> Self {
        Self {
            files,
            session_title: session_title(date, label),
        }
    }

    /// Toast text announcing the update
    pub fn toast_message(&self) -> String {
        format!("Updating Docs in: \"{}\"", self.session_title)
    }

    /// Files as a bulleted list, one per line
    pub fn file_list(&self) -> String {
        self.files
            .iter()
            .map(|path| format!("- {}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Full prompt text submitted to the session
    pub fn prompt(&self) -> String {
        format!(
            "Documentation files were changed:
{files}

Your task: Update docs/README.md to reflect the current state of all documentation.

Instructions:
1. Read all files in the docs/ folder (recursively)
2. Read all .md files outside the docs/ folder (e.g., README.md), except AGENTS.md and CLAUDE.md
3. Create a unified summary of all documentation (not per-file summaries)
4. If files have timestamps and information conflicts between files, use the newer file's information
5. If any information is unclear, look at the project codebase as the source of truth
6. Update docs/README.md with this unified summary
7. If docs/README.md doesn't exist, create it
8. Keep the summary concise but informative
9. Remove any content from docs/README.md that cannot be found in any documentation file

Do not include docs/README.md itself in the summary.",
            files = self.file_list()
        )
    }
}
