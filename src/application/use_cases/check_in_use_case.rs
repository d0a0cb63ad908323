//! Check-in use case.

use std::sync::Arc;

use chrono::Local;
use tracing::info;

use crate::application::dto::CheckInRecord;
use crate::application::services::BarcodeScanner;
use crate::domain::errors::ApiError;
use crate::domain::ports::{InventoryPort, TransferLine};

/// Returns a scanned stock item to its part's default location.
pub struct CheckInUseCase {
    inventory: Arc<dyn InventoryPort>,
    scanner: BarcodeScanner,
}

impl CheckInUseCase {
    /// Creates the use case.
    #[must_use]
    pub fn new(inventory: Arc<dyn InventoryPort>) -> Self {
        let scanner = BarcodeScanner::new(inventory.clone());
        Self { inventory, scanner }
    }

    /// Scans a stock item and moves its full quantity to the default location.
    ///
    /// # Errors
    /// Returns error if the scan fails, the part has no default location, or
    /// the transfer is rejected.
    pub async fn execute(&self, payload: &str) -> Result<CheckInRecord, ApiError> {
        let item = self.scanner.scan_stock_item(payload).await?;

        let Some(target) = item.default_location().cloned() else {
            return Err(ApiError::unexpected(format!(
                "Part {} has no default location",
                item.part_name()
            )));
        };

        self.inventory
            .transfer_stock(&[TransferLine::from(&item)], target.id(), "Checked in")
            .await?;

        info!(
            pk = %item.id(),
            from = ?item.location(),
            location = %target.name(),
            "Checked in stock item"
        );

        Ok(CheckInRecord {
            previous_location: item.location_name().to_string(),
            new_location: target.name().to_string(),
            timestamp: Local::now(),
            item,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::barcode::{BarcodeKind, BarcodeMatch};
    use crate::domain::entities::{LocationId, Part, StockItem, StockLocation};
    use crate::domain::ports::mocks::MockInventory;

    fn inventory() -> MockInventory {
        MockInventory::new()
            .with_barcode("item-1", BarcodeMatch::new(BarcodeKind::StockItem, 1))
            .with_barcode("item-2", BarcodeMatch::new(BarcodeKind::StockItem, 2))
            .with_item(
                StockItem::new(1_u64, 10_u64, 2.0)
                    .with_part_name("Caliper")
                    .with_location(LocationId(1), "Bench"),
            )
            .with_item(StockItem::new(2_u64, 11_u64, 1.0).with_part_name("Loose"))
            .with_part(Part::new(10_u64, "Caliper").with_default_location(LocationId(7)))
            .with_part(Part::new(11_u64, "Loose"))
            .with_location(StockLocation::new(7_u64, "Tool Wall"))
    }

    #[tokio::test]
    async fn test_check_in_moves_to_default_location() {
        let inventory = Arc::new(inventory());
        let use_case = CheckInUseCase::new(inventory.clone());

        let record = use_case.execute("item-1").await.unwrap();

        assert_eq!(record.previous_location, "Bench");
        assert_eq!(record.new_location, "Tool Wall");
        let transfers = inventory.transfers();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].location, LocationId(7));
        assert_eq!(transfers[0].notes, "Checked in");
    }

    #[tokio::test]
    async fn test_check_in_requires_default_location() {
        let inventory = Arc::new(inventory());
        let use_case = CheckInUseCase::new(inventory.clone());

        let err = use_case.execute("item-2").await.unwrap_err();

        assert_eq!(err.to_string(), "Part Loose has no default location");
        assert!(inventory.transfers().is_empty());
    }
}
