//! Rows of the transfer table.

use super::{
    CellValue, ColumnDef, FieldEdit, FieldKind, RowKey, TableRow, format_number, reject_frozen,
};
use crate::domain::entities::StockItem;
use crate::domain::errors::RowValidationError;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::frozen("stock_number", "Stock Number", FieldKind::Integer),
    ColumnDef::frozen("part_name", "Part Name", FieldKind::Text),
    ColumnDef::editable("quantity", "Quantity", FieldKind::Number),
    ColumnDef::frozen("current_location", "Current Location", FieldKind::Text),
];

/// A scanned stock item waiting to be transferred.
#[derive(Debug, Clone, PartialEq)]
pub struct StockItemRow {
    stock_number: u64,
    part_name: String,
    quantity: f64,
    current_location: String,
    item: StockItem,
}

impl StockItemRow {
    /// Wraps a scanned stock item.
    #[must_use]
    pub fn new(item: StockItem) -> Self {
        Self {
            stock_number: item.id().as_u64(),
            part_name: item.part_name().to_string(),
            quantity: item.quantity(),
            current_location: item.location_name().to_string(),
            item,
        }
    }

    /// Returns the wrapped stock item.
    #[must_use]
    pub const fn item(&self) -> &StockItem {
        &self.item
    }

    /// Quantity to transfer.
    #[must_use]
    pub const fn quantity(&self) -> f64 {
        self.quantity
    }

    fn validate_quantity(&self, quantity: f64) -> Result<(), RowValidationError> {
        if quantity <= 0.0 {
            return Err(RowValidationError::field(
                "quantity",
                "Quantity must be greater than zero",
            ));
        }

        let original = self.item.original_quantity();
        if quantity > original {
            return Err(RowValidationError::field(
                "quantity",
                format!(
                    "Quantity is greater than the original stock quantity ({})",
                    format_number(original)
                ),
            ));
        }

        Ok(())
    }
}

impl From<StockItem> for StockItemRow {
    fn from(item: StockItem) -> Self {
        Self::new(item)
    }
}

impl TableRow for StockItemRow {
    fn columns() -> &'static [ColumnDef] {
        COLUMNS
    }

    fn key(&self) -> RowKey {
        RowKey(self.stock_number)
    }

    fn cell(&self, field: &str) -> Option<CellValue> {
        match field {
            "stock_number" => i64::try_from(self.stock_number).ok().map(CellValue::Integer),
            "part_name" => Some(CellValue::Text(self.part_name.clone())),
            "quantity" => Some(CellValue::Number(self.quantity)),
            "current_location" => Some(CellValue::Text(self.current_location.clone())),
            _ => None,
        }
    }

    fn title_name(&self) -> String {
        format!("Stock #{}", self.stock_number)
    }

    fn apply_edits(&mut self, edits: &[FieldEdit]) -> Result<(), RowValidationError> {
        reject_frozen::<Self>(edits)?;

        let mut new_quantity = None;
        let mut errors = Vec::new();
        for edit in edits {
            if edit.field != "quantity" {
                continue;
            }
            match edit.value.as_number() {
                Some(quantity) => match self.validate_quantity(quantity) {
                    Ok(()) => new_quantity = Some(quantity),
                    Err(e) => errors.push(e),
                },
                None => errors.push(RowValidationError::field(
                    "quantity",
                    "Input should be a valid number",
                )),
            }
        }

        if let Some(error) = RowValidationError::combine(errors) {
            return Err(error);
        }

        if let Some(quantity) = new_quantity {
            self.quantity = quantity;
            self.item.set_quantity(quantity);
        }
        Ok(())
    }
}
