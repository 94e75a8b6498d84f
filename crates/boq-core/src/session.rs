//! One spreadsheet import, from upload to confirmation.

use std::path::Path;

use tracing::{debug, warn};

use boq_ingest::{SpreadsheetSource, read_grid_from_path, read_grid_with_options};
use boq_map::{HeaderDetection, MappingState, detect_header};
use boq_model::{
    FieldKey, ModelError, ParseWarning, PreviewItem, QuoteItem, QuoteItemList, RawGrid,
};
use boq_transform::{MergeMode, NormalizedRows, PreviewEdit, commit, normalize};

use crate::context::ImportContext;
use crate::error::Result;

/// An open import: the detected layout, the editable mapping and the
/// current preview.
///
/// Every mapping change rebuilds the preview from the raw rows, so preview
/// edits made before it are discarded.
#[derive(Debug, Clone)]
pub struct ImportSession {
    file_name: String,
    detection: HeaderDetection,
    mapping: MappingState,
    preview: NormalizedRows,
}

impl ImportSession {
    /// Reads `source`, detects its header and builds the first preview.
    pub fn open(ctx: &ImportContext, source: &SpreadsheetSource) -> Result<Self> {
        let grid = read_grid_with_options(source, ctx.read_options())?;
        Ok(Self::from_grid(ctx, source.file_name(), &grid))
    }

    /// Like [`open`](Self::open) for a file on disk.
    pub fn open_path(ctx: &ImportContext, path: &Path) -> Result<Self> {
        let grid = read_grid_from_path(path, ctx.read_options())?;
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        Ok(Self::from_grid(ctx, &file_name, &grid))
    }

    /// Starts a session from an already decoded grid.
    pub fn from_grid(ctx: &ImportContext, file_name: &str, grid: &RawGrid) -> Self {
        let detection = detect_header(grid, ctx.dictionary(), ctx.detect_options());
        let mapping = MappingState::from_detection(&detection);
        let mut session = Self {
            file_name: file_name.to_string(),
            detection,
            mapping,
            preview: NormalizedRows::default(),
        };
        session.renormalize();
        session
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn detection(&self) -> &HeaderDetection {
        &self.detection
    }

    pub fn mapping(&self) -> &MappingState {
        &self.mapping
    }

    pub fn preview(&self) -> &[PreviewItem] {
        &self.preview.items
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.preview.warnings
    }

    /// Points `field` at `column` and rebuilds the preview if the column
    /// changed.
    pub fn assign_column(&mut self, field: FieldKey, column: usize) -> Result<()> {
        let previous = self.mapping.column_map().get(field);
        self.mapping.assign(field, column)?;
        if previous != Some(column) {
            self.renormalize();
        }
        Ok(())
    }

    /// Unmaps `field`. The preview is rebuilt only if it was mapped.
    pub fn clear_column(&mut self, field: FieldKey) -> Result<bool> {
        let cleared = self.mapping.clear(field)?;
        if cleared {
            self.renormalize();
        }
        Ok(cleared)
    }

    /// Makes a detected field editable. The column map and preview are
    /// left as they are.
    pub fn unlock_field(&mut self, field: FieldKey) -> bool {
        self.mapping.unlock(field)
    }

    /// Edits one preview row in place.
    pub fn edit_preview(&mut self, index: usize, field: FieldKey, text: &str) -> Result<()> {
        let len = self.preview.items.len();
        let item = self
            .preview
            .items
            .get_mut(index)
            .ok_or(ModelError::RowOutOfRange { index, len })?;
        item.set_field(field, text);
        Ok(())
    }

    /// Builds the merged item list. The session stays open either way, so a
    /// failed commit can be fixed and retried.
    pub fn confirm(&self, existing: &[QuoteItem], mode: MergeMode) -> Result<Vec<QuoteItem>> {
        let merged = commit(
            existing,
            &self.preview.items,
            mode,
            self.mapping.column_map(),
        )?;
        Ok(merged)
    }

    /// Confirms into `list`, replacing its contents only on success.
    pub fn confirm_into(&self, list: &mut QuoteItemList, mode: MergeMode) -> Result<()> {
        let merged = self.confirm(list.items(), mode)?;
        list.replace(merged);
        Ok(())
    }

    fn renormalize(&mut self) {
        self.preview = normalize(&self.detection.data_rows, self.mapping.column_map());
        debug!(
            file = %self.file_name,
            items = self.preview.items.len(),
            "rebuilt preview"
        );
        if !self.preview.warnings.is_empty() {
            warn!(
                file = %self.file_name,
                count = self.preview.warnings.len(),
                "some numeric cells could not be read and were imported as 0"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rows: &[&[&str]]) -> ImportSession {
        let grid = RawGrid::from_strings(rows.iter().map(|row| row.iter().copied()));
        ImportSession::from_grid(&ImportContext::new(), "test.csv", &grid)
    }

    #[test]
    fn test_mapping_edits_discard_preview_edits() {
        let mut session = session(&[
            &["品名", "数量", "単価", "備考"],
            &["配線工事", "100", "500", "至急"],
        ]);
        session.edit_preview(0, FieldKey::Name, "変更済み").unwrap();
        assert_eq!(session.preview()[0].name, "変更済み");

        session.assign_column(FieldKey::Specification, 3).unwrap();
        assert_eq!(session.preview()[0].name, "配線工事");
        assert_eq!(session.preview()[0].specification, "至急");
    }

    #[test]
    fn test_preview_edits_survive_unchanged_mapping() {
        let mut session = session(&[&["品名", "数量", "単価"], &["a", "1", "1"]]);
        session.edit_preview(0, FieldKey::Name, "edited").unwrap();

        assert!(session.unlock_field(FieldKey::Quantity));
        assert_eq!(session.preview()[0].name, "edited");

        session.assign_column(FieldKey::Quantity, 1).unwrap();
        assert_eq!(session.preview()[0].name, "edited");

        assert!(!session.clear_column(FieldKey::Category).unwrap());
        assert_eq!(session.preview()[0].name, "edited");

        assert!(session.clear_column(FieldKey::Quantity).unwrap());
        assert_eq!(session.preview()[0].name, "a");
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut session = session(&[&["品名", "数量", "単価"], &["a", "1", "1"]]);
        assert!(session.edit_preview(5, FieldKey::Name, "x").is_err());
    }

    #[test]
    fn test_confirm_into_keeps_list_on_failure() {
        let mut session = session(&[&["品名", "単価"], &["a", "1"]]);
        let mut list = QuoteItemList::new(vec![QuoteItem::empty(0)]);
        assert!(session.confirm_into(&mut list, MergeMode::Replace).is_err());
        assert_eq!(list.len(), 1);

        session.assign_column(FieldKey::Quantity, 1).unwrap();
        session.confirm_into(&mut list, MergeMode::Add).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[1].name, "a");
    }
}
