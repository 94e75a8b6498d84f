use std::path::PathBuf;

use boq_model::{ItemIssue, QuoteTotals};
use boq_transform::MergeMode;

/// What an `import` run did.
#[derive(Debug)]
pub struct ImportOutcome {
    pub file_name: String,
    pub mode: MergeMode,
    pub existing: usize,
    pub imported: usize,
    pub warnings: usize,
    pub total_items: usize,
    pub totals: QuoteTotals,
    pub issues: Vec<ItemIssue>,
    /// `None` when the list went to stdout or nothing was written.
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}
