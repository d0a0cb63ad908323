//! Cell values and field kinds shared by every row model.

use std::cmp::Ordering;

use chrono::{DateTime, Local};

use crate::domain::errors::RowValidationError;

/// Default rendering of timestamp cells.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Input type of a row field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Whole number.
    Integer,
    /// Decimal number.
    Number,
}

impl FieldKind {
    /// Parses raw dialog input for `field`.
    ///
    /// # Errors
    /// Returns a validation error naming the field if the input does not parse.
    pub fn parse(self, field: &str, input: &str) -> Result<FieldValue, RowValidationError> {
        let trimmed = input.trim();
        match self {
            Self::Text => Ok(FieldValue::Text(input.to_string())),
            Self::Integer => trimmed.parse::<i64>().map(FieldValue::Integer).map_err(|_| {
                RowValidationError::field(field, "Input should be a valid integer")
            }),
            Self::Number => trimmed
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(FieldValue::Number)
                .ok_or_else(|| RowValidationError::field(field, "Input should be a valid number")),
        }
    }
}

/// Parsed value submitted from the edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text input.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Decimal number.
    Number(f64),
}

impl FieldValue {
    /// Returns the value as a float if it is numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

/// One submitted field edit.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    /// Field key.
    pub field: String,
    /// Parsed value.
    pub value: FieldValue,
}

impl FieldEdit {
    /// Creates an edit for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, value: FieldValue) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

/// Value held by a table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Decimal number.
    Number(f64),
    /// Local date and time.
    Timestamp(DateTime<Local>),
}

impl CellValue {
    /// Formats the cell with the given timestamp format.
    #[must_use]
    pub fn format(&self, timestamp_format: &str) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Number(value) => format_number(*value),
            Self::Timestamp(value) => value.format(timestamp_format).to_string(),
        }
    }

    /// Orders cells for sorting; mixed kinds compare by their text.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Integer(a), Self::Number(b)) => (*a as f64).total_cmp(b),
            (Self::Number(a), Self::Integer(b)) => a.total_cmp(&(*b as f64)),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (a, b) => a
                .format(DEFAULT_TIMESTAMP_FORMAT)
                .cmp(&b.format(DEFAULT_TIMESTAMP_FORMAT)),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(DEFAULT_TIMESTAMP_FORMAT))
    }
}

/// Formats a quantity without a trailing `.0` for whole values.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
