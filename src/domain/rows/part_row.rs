//! Rows of the part search results.

use super::{CellValue, ColumnDef, FieldKind, RowKey, TableRow};
use crate::domain::entities::Part;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::frozen("part_number", "Part#", FieldKind::Integer),
    ColumnDef::frozen("name", "Name", FieldKind::Text),
    ColumnDef::frozen("ipn", "IPN", FieldKind::Text),
    ColumnDef::frozen("description", "Description", FieldKind::Text),
    ColumnDef::frozen("in_stock", "In Stock", FieldKind::Number),
];

/// A part returned by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct PartRow {
    part: Part,
}

impl PartRow {
    /// Wraps a part.
    #[must_use]
    pub const fn new(part: Part) -> Self {
        Self { part }
    }

    /// Wrapped part.
    #[must_use]
    pub const fn part(&self) -> &Part {
        &self.part
    }
}

impl From<Part> for PartRow {
    fn from(part: Part) -> Self {
        Self::new(part)
    }
}

impl TableRow for PartRow {
    fn columns() -> &'static [ColumnDef] {
        COLUMNS
    }

    fn key(&self) -> RowKey {
        RowKey(self.part.id().as_u64())
    }

    fn cell(&self, field: &str) -> Option<CellValue> {
        match field {
            "part_number" => i64::try_from(self.part.id().as_u64())
                .ok()
                .map(CellValue::Integer),
            "name" => Some(CellValue::Text(self.part.name().to_string())),
            "ipn" => Some(CellValue::Text(self.part.ipn().unwrap_or_default().to_string())),
            "description" => Some(CellValue::Text(self.part.description().to_string())),
            "in_stock" => Some(CellValue::Number(self.part.in_stock())),
            _ => None,
        }
    }

    fn title_name(&self) -> String {
        format!("Part #{}", self.part.id())
    }
}
