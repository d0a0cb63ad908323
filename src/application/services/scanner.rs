//! Barcode resolution against the inventory service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::barcode::{BarcodeKind, BarcodeMatch, Whitelist};
use crate::domain::entities::{LocationId, Part, PartId, StockItem, StockItemId, StockLocation};
use crate::domain::errors::ApiError;
use crate::domain::ports::InventoryPort;

/// Entity a barcode resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ScannedEntity {
    /// A stock item, with its default location resolved.
    StockItem(StockItem),
    /// A stock location.
    StockLocation(StockLocation),
    /// A part definition.
    Part(Part),
}

impl ScannedEntity {
    /// Kind of the resolved entity.
    #[must_use]
    pub const fn kind(&self) -> BarcodeKind {
        match self {
            Self::StockItem(_) => BarcodeKind::StockItem,
            Self::StockLocation(_) => BarcodeKind::StockLocation,
            Self::Part(_) => BarcodeKind::Part,
        }
    }
}

/// Resolves scanned payloads to entities.
#[derive(Clone)]
pub struct BarcodeScanner {
    inventory: Arc<dyn InventoryPort>,
}

impl BarcodeScanner {
    /// Creates a scanner backed by the inventory port.
    #[must_use]
    pub fn new(inventory: Arc<dyn InventoryPort>) -> Self {
        Self { inventory }
    }

    /// Scans a payload and fetches the matched entity if its kind is accepted.
    ///
    /// # Errors
    /// Returns error if the barcode does not match, the match is not
    /// whitelisted, or the entity cannot be fetched.
    pub async fn scan(&self, payload: &str, whitelist: &Whitelist) -> Result<ScannedEntity, ApiError> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(ApiError::NoMatch("Empty barcode".to_string()));
        }

        let found = self.inventory.scan_barcode(payload).await?;
        debug!(kind = %found.kind, pk = found.pk, "Barcode matched");
        whitelist.check(&found)?;

        self.fetch(found).await
    }

    /// Scans a payload that must be a stock item.
    ///
    /// # Errors
    /// Returns error if the payload does not resolve to a stock item.
    pub async fn scan_stock_item(&self, payload: &str) -> Result<StockItem, ApiError> {
        match self.scan(payload, &Whitelist::stock_items()).await? {
            ScannedEntity::StockItem(item) => Ok(item),
            other => Err(unexpected_kind(&other)),
        }
    }

    /// Scans a payload that must be a stock location.
    ///
    /// # Errors
    /// Returns error if the payload does not resolve to a stock location.
    pub async fn scan_location(&self, payload: &str) -> Result<StockLocation, ApiError> {
        match self.scan(payload, &Whitelist::stock_locations()).await? {
            ScannedEntity::StockLocation(location) => Ok(location),
            other => Err(unexpected_kind(&other)),
        }
    }

    async fn fetch(&self, found: BarcodeMatch) -> Result<ScannedEntity, ApiError> {
        match found.kind {
            BarcodeKind::StockItem => {
                let mut item = self.inventory.stock_item(StockItemId(found.pk)).await?;
                let default_location = self.default_location(item.part()).await;
                item.set_default_location(default_location);
                info!(pk = found.pk, part = %item.part_name(), "Scanned stock item");
                Ok(ScannedEntity::StockItem(item))
            }
            BarcodeKind::StockLocation => {
                let location = self.inventory.stock_location(LocationId(found.pk)).await?;
                info!(pk = found.pk, name = %location.name(), "Scanned stock location");
                Ok(ScannedEntity::StockLocation(location))
            }
            BarcodeKind::Part => {
                let part = self.inventory.part(PartId(found.pk)).await?;
                info!(pk = found.pk, name = %part.name(), "Scanned part");
                Ok(ScannedEntity::Part(part))
            }
            other => Err(ApiError::unexpected(format!(
                "Scanning {other} barcodes is not supported"
            ))),
        }
    }

    async fn default_location(&self, part_id: PartId) -> Option<StockLocation> {
        let part = match self.inventory.part(part_id).await {
            Ok(part) => part,
            Err(e) => {
                warn!(part = %part_id, error = %e, "Failed to fetch part for default location");
                return None;
            }
        };

        let location_id = part.default_location()?;
        match self.inventory.stock_location(location_id).await {
            Ok(location) => Some(location),
            Err(e) => {
                warn!(location = %location_id, error = %e, "Failed to fetch default location");
                None
            }
        }
    }
}

fn unexpected_kind(entity: &ScannedEntity) -> ApiError {
    ApiError::unexpected(format!("unexpected {} result from scan", entity.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockInventory;

    fn inventory() -> MockInventory {
        MockInventory::new()
            .with_barcode("{\"stockitem\":338}", BarcodeMatch::new(BarcodeKind::StockItem, 338))
            .with_barcode("{\"stocklocation\":4}", BarcodeMatch::new(BarcodeKind::StockLocation, 4))
            .with_barcode("{\"salesorder\":1}", BarcodeMatch::new(BarcodeKind::SalesOrder, 1))
            .with_item(StockItem::new(338_u64, 5_u64, 10.0).with_part_name("Resistor"))
            .with_part(Part::new(5_u64, "Resistor").with_default_location(LocationId(4)))
            .with_location(StockLocation::new(4_u64, "Bin 4"))
    }

    fn scanner(inventory: MockInventory) -> BarcodeScanner {
        BarcodeScanner::new(Arc::new(inventory))
    }

    #[tokio::test]
    async fn test_scan_stock_item_resolves_default_location() {
        let item = scanner(inventory())
            .scan_stock_item("{\"stockitem\":338}")
            .await
            .unwrap();

        assert_eq!(item.id(), StockItemId(338));
        assert_eq!(item.default_location().map(StockLocation::name), Some("Bin 4"));
    }

    #[tokio::test]
    async fn test_scan_trims_payload() {
        let location = scanner(inventory())
            .scan_location("  {\"stocklocation\":4}\n")
            .await
            .unwrap();
        assert_eq!(location.name(), "Bin 4");
    }

    #[tokio::test]
    async fn test_scan_rejects_wrong_kind() {
        let err = scanner(inventory())
            .scan_location("{\"stockitem\":338}")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Barcode is a stockitem, expected one of: stocklocation"
        );
    }

    #[tokio::test]
    async fn test_scan_empty_payload() {
        let err = scanner(inventory()).scan_stock_item("   ").await.unwrap_err();
        assert_eq!(err, ApiError::NoMatch("Empty barcode".to_string()));
    }

    #[tokio::test]
    async fn test_scan_unknown_barcode() {
        let err = scanner(inventory()).scan_stock_item("garbage").await.unwrap_err();
        assert!(err.is_scan_miss());
    }

    #[tokio::test]
    async fn test_scan_unsupported_kind() {
        let whitelist = Whitelist::new([BarcodeKind::SalesOrder]);
        let err = scanner(inventory())
            .scan("{\"salesorder\":1}", &whitelist)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unexpected { .. }));
    }

    #[tokio::test]
    async fn test_missing_part_leaves_default_location_empty() {
        let inventory = MockInventory::new()
            .with_barcode("item", BarcodeMatch::new(BarcodeKind::StockItem, 1))
            .with_item(StockItem::new(1_u64, 99_u64, 1.0));

        let item = scanner(inventory).scan_stock_item("item").await.unwrap();
        assert!(item.default_location().is_none());
    }
}
