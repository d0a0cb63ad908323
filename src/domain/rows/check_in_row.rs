//! Rows of the check-in log.

use chrono::{DateTime, Local};

use super::{CellValue, ColumnDef, FieldKind, RowKey, TableRow};
use crate::domain::entities::StockItem;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::frozen("stock_number", "Stock#", FieldKind::Integer),
    ColumnDef::frozen("part_name", "Part Name", FieldKind::Text),
    ColumnDef::frozen("quantity", "Q", FieldKind::Number),
    ColumnDef::frozen("previous_location", "Prev Loc", FieldKind::Text),
    ColumnDef::frozen("new_location", "New Loc", FieldKind::Text),
    ColumnDef::frozen("timestamp", "Check-In Timestamp", FieldKind::Text),
];

/// One completed check-in.
///
/// Keyed by log entry rather than stock item so repeated check-ins of the
/// same item each get their own row.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInRow {
    entry: u64,
    stock_number: u64,
    part_name: String,
    quantity: f64,
    previous_location: String,
    new_location: String,
    timestamp: DateTime<Local>,
}

impl CheckInRow {
    /// Creates a log entry for a checked-in item.
    #[must_use]
    pub fn new(
        entry: u64,
        item: &StockItem,
        previous_location: impl Into<String>,
        new_location: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            entry,
            stock_number: item.id().as_u64(),
            part_name: item.part_name().to_string(),
            quantity: item.quantity(),
            previous_location: previous_location.into(),
            new_location: new_location.into(),
            timestamp,
        }
    }
}

impl TableRow for CheckInRow {
    fn columns() -> &'static [ColumnDef] {
        COLUMNS
    }

    fn key(&self) -> RowKey {
        RowKey(self.entry)
    }

    fn cell(&self, field: &str) -> Option<CellValue> {
        match field {
            "stock_number" => i64::try_from(self.stock_number).ok().map(CellValue::Integer),
            "part_name" => Some(CellValue::Text(self.part_name.clone())),
            "quantity" => Some(CellValue::Number(self.quantity)),
            "previous_location" => Some(CellValue::Text(self.previous_location.clone())),
            "new_location" => Some(CellValue::Text(self.new_location.clone())),
            "timestamp" => Some(CellValue::Timestamp(self.timestamp)),
            _ => None,
        }
    }

    fn title_name(&self) -> String {
        format!("Stock #{}", self.stock_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LocationId;
    use crate::domain::rows::{FieldEdit, FieldValue};

    fn item() -> StockItem {
        StockItem::new(12_u64, 1_u64, 3.0).with_location(LocationId(1), "Bench")
    }

    #[test]
    fn test_repeated_item_gets_distinct_keys() {
        let now = Local::now();
        let first = CheckInRow::new(1, &item(), "Bench", "Bin 4", now);
        let second = CheckInRow::new(2, &item(), "Bench", "Bin 4", now);

        assert_ne!(first.key(), second.key());
        assert_eq!(first.stock_number, second.stock_number);
    }

    #[test]
    fn test_all_fields_frozen() {
        assert!(CheckInRow::editable_fields().is_empty());

        let mut row = CheckInRow::new(1, &item(), "Bench", "Bin 4", Local::now());
        let err = row
            .apply_edits(&[FieldEdit::new("quantity", FieldValue::Number(1.0))])
            .unwrap_err();
        assert!(err.message.contains("Field is frozen"));
    }

    #[test]
    fn test_unknown_part_name() {
        let row = CheckInRow::new(1, &item(), "Bench", "Bin 4", Local::now());
        assert_eq!(row.cell("part_name"), Some(CellValue::Text("UNKNOWN".to_string())));
        assert_eq!(CheckInRow::display_name("quantity"), Some("Q"));
    }
}
