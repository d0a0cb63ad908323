//! Row models displayed by model tables.
//!
//! A row wraps a domain entity together with the display fields cached from
//! it. Columns are declared once per row type; frozen columns are display-only
//! and editable columns are offered by the row edit dialog.

mod cell;
mod check_in_row;
mod part_row;
mod stock_item_row;

pub use cell::{
    CellValue, DEFAULT_TIMESTAMP_FORMAT, FieldEdit, FieldKind, FieldValue, format_number,
};
pub use check_in_row::CheckInRow;
pub use part_row::PartRow;
pub use stock_item_row::StockItemRow;

use crate::domain::errors::RowValidationError;

/// Identity of a row within one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(pub u64);

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Column declaration of a row model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Field key.
    pub key: &'static str,
    /// Header label.
    pub label: &'static str,
    /// Input type used when editing.
    pub kind: FieldKind,
    /// Whether the edit dialog offers this field.
    pub editable: bool,
}

impl ColumnDef {
    /// Declares a display-only column.
    #[must_use]
    pub const fn frozen(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            editable: false,
        }
    }

    /// Declares an editable column.
    #[must_use]
    pub const fn editable(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            editable: true,
        }
    }
}

/// A domain row shown in a model table.
pub trait TableRow {
    /// Column declarations, in display order.
    fn columns() -> &'static [ColumnDef];

    /// Field keys, in display order.
    fn field_names() -> Vec<&'static str> {
        Self::columns().iter().map(|column| column.key).collect()
    }

    /// Columns the edit dialog may change.
    fn editable_fields() -> Vec<&'static ColumnDef> {
        Self::columns()
            .iter()
            .filter(|column| column.editable)
            .collect()
    }

    /// Looks up a column by field key.
    fn column(field: &str) -> Option<&'static ColumnDef> {
        Self::columns().iter().find(|column| column.key == field)
    }

    /// Header label of a field.
    fn display_name(field: &str) -> Option<&'static str> {
        Self::column(field).map(|column| column.label)
    }

    /// Row identity.
    fn key(&self) -> RowKey;

    /// Current value of a field.
    fn cell(&self, field: &str) -> Option<CellValue>;

    /// Short name used in dialog titles.
    fn title_name(&self) -> String;

    /// Applies validated edits. Either every edit is applied or none is.
    ///
    /// # Errors
    /// Returns a validation error if any edit is rejected.
    fn apply_edits(&mut self, edits: &[FieldEdit]) -> Result<(), RowValidationError> {
        reject_frozen::<Self>(edits)
    }
}

/// Rejects edits to fields that are unknown or frozen.
///
/// # Errors
/// Returns a combined validation error listing each rejected field.
pub fn reject_frozen<R: TableRow + ?Sized>(edits: &[FieldEdit]) -> Result<(), RowValidationError> {
    let errors: Vec<_> = edits
        .iter()
        .filter(|edit| !R::column(&edit.field).is_some_and(|column| column.editable))
        .map(|edit| RowValidationError::field(&edit.field, format!("{}: Field is frozen", edit.field)))
        .collect();

    RowValidationError::combine(errors).map_or(Ok(()), Err)
}
