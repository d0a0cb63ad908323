//! Stock movement DTOs.

use chrono::{DateTime, Local};

use crate::domain::entities::StockItem;

/// Result of a successful transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    /// Number of stock items moved.
    pub count: usize,
    /// Name of the destination location.
    pub destination_name: String,
}

impl TransferOutcome {
    /// Returns the status line shown after the transfer.
    #[must_use]
    pub fn summary(&self) -> String {
        let plural = if self.count == 1 { "" } else { "s" };
        format!(
            "Transferred {} stock item{plural} to {}",
            self.count, self.destination_name
        )
    }
}

/// A completed check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInRecord {
    /// The stock item as it was before moving.
    pub item: StockItem,
    /// Location the item was taken from.
    pub previous_location: String,
    /// Default location the item was returned to.
    pub new_location: String,
    /// When the check-in happened.
    pub timestamp: DateTime<Local>,
}
