//! `--map` / `--unmap` handling.

use std::fmt;
use std::str::FromStr;

use boq_core::{ImportSession, SessionError};
use boq_map::{column_letter, parse_column_ref};
use boq_model::FieldKey;
use tracing::debug;

/// A `field=COL` argument, e.g. `unit_price=E` or `数量=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnAssignment {
    pub field: FieldKey,
    pub column: usize,
}

impl FromStr for ColumnAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, column) = s
            .split_once('=')
            .ok_or_else(|| format!("expected FIELD=COLUMN, got {s:?}"))?;
        let field = field.parse::<FieldKey>().map_err(|e| e.to_string())?;
        let column = parse_column_ref(column).map_err(|e| e.to_string())?;
        Ok(Self { field, column })
    }
}

impl fmt::Display for ColumnAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, column_letter(self.column))
    }
}

/// Applies command-line mapping overrides. Flags given explicitly win over
/// header detection, so detected fields are unlocked first.
pub fn apply_overrides(
    session: &mut ImportSession,
    assignments: &[ColumnAssignment],
    unmapped: &[FieldKey],
) -> Result<(), SessionError> {
    for assignment in assignments {
        if session.unlock_field(assignment.field) {
            debug!(field = %assignment.field, "overriding detected column");
        }
        session.assign_column(assignment.field, assignment.column)?;
    }
    for field in unmapped {
        session.unlock_field(*field);
        session.clear_column(*field)?;
    }
    Ok(())
}
