//! Inventory service port definition.

use async_trait::async_trait;

use crate::domain::barcode::BarcodeMatch;
use crate::domain::entities::{
    LocationId, Part, PartId, ServerInfo, StockItem, StockItemId, StockLocation,
};
use crate::domain::errors::ApiError;

/// One stock item and the quantity of it to move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferLine {
    /// Stock item to move.
    pub item: StockItemId,
    /// Quantity to move; less than the stock quantity splits the item.
    pub quantity: f64,
}

impl TransferLine {
    /// Creates a transfer line.
    #[must_use]
    pub const fn new(item: StockItemId, quantity: f64) -> Self {
        Self { item, quantity }
    }
}

impl From<&StockItem> for TransferLine {
    fn from(item: &StockItem) -> Self {
        Self::new(item.id(), item.quantity())
    }
}

/// Port for inventory service operations.
#[async_trait]
pub trait InventoryPort: Send + Sync {
    /// Returns server identification; doubles as a health check.
    async fn server_info(&self) -> Result<ServerInfo, ApiError>;

    /// Resolves raw barcode data to an entity.
    async fn scan_barcode(&self, payload: &str) -> Result<BarcodeMatch, ApiError>;

    /// Fetches a stock item with its part name and location name.
    async fn stock_item(&self, id: StockItemId) -> Result<StockItem, ApiError>;

    /// Fetches a stock location.
    async fn stock_location(&self, id: LocationId) -> Result<StockLocation, ApiError>;

    /// Fetches a part.
    async fn part(&self, id: PartId) -> Result<Part, ApiError>;

    /// Moves stock items to a location.
    async fn transfer_stock(
        &self,
        lines: &[TransferLine],
        location: LocationId,
        notes: &str,
    ) -> Result<(), ApiError>;

    /// Searches parts by free text. An empty query lists parts.
    async fn search_parts(&self, query: &str, limit: usize) -> Result<Vec<Part>, ApiError>;
}

/// In-memory inventory for tests.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// A recorded transfer call.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedTransfer {
        /// Items and quantities sent.
        pub lines: Vec<TransferLine>,
        /// Destination location.
        pub location: LocationId,
        /// Transfer notes.
        pub notes: String,
    }

    /// In-memory inventory for testing.
    #[derive(Default)]
    pub struct MockInventory {
        barcodes: HashMap<String, BarcodeMatch>,
        items: HashMap<StockItemId, StockItem>,
        locations: HashMap<LocationId, StockLocation>,
        parts: HashMap<PartId, Part>,
        fail_transfers: Option<ApiError>,
        offline: bool,
        transfers: Mutex<Vec<RecordedTransfer>>,
        searches: Mutex<Vec<(String, usize)>>,
    }

    impl MockInventory {
        /// Creates empty mock.
        pub fn new() -> Self {
            Self::default()
        }

        /// Resolves `payload` to `found`.
        pub fn with_barcode(mut self, payload: &str, found: BarcodeMatch) -> Self {
            self.barcodes.insert(payload.to_string(), found);
            self
        }

        /// Adds a fetchable stock item.
        pub fn with_item(mut self, item: StockItem) -> Self {
            self.items.insert(item.id(), item);
            self
        }

        /// Adds a fetchable location.
        pub fn with_location(mut self, location: StockLocation) -> Self {
            self.locations.insert(location.id(), location);
            self
        }

        /// Adds a fetchable part.
        pub fn with_part(mut self, part: Part) -> Self {
            self.parts.insert(part.id(), part);
            self
        }

        /// Rejects every transfer with `error`.
        pub fn failing_transfers(mut self, error: ApiError) -> Self {
            self.fail_transfers = Some(error);
            self
        }

        /// Fails every health check and scan with a network error.
        pub fn offline(mut self) -> Self {
            self.offline = true;
            self
        }

        /// Transfers received so far.
        pub fn transfers(&self) -> Vec<RecordedTransfer> {
            self.transfers.lock().unwrap().clone()
        }

        /// Search queries and limits received so far.
        pub fn searches(&self) -> Vec<(String, usize)> {
            self.searches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InventoryPort for MockInventory {
        async fn server_info(&self) -> Result<ServerInfo, ApiError> {
            if self.offline {
                return Err(ApiError::network("failed to connect to server"));
            }
            Ok(ServerInfo {
                server: "InvenTree".to_string(),
                version: "0.15.0".to_string(),
                api_version: Some(200),
            })
        }

        async fn scan_barcode(&self, payload: &str) -> Result<BarcodeMatch, ApiError> {
            if self.offline {
                return Err(ApiError::network("request timed out"));
            }
            self.barcodes
                .get(payload)
                .copied()
                .ok_or_else(|| ApiError::NoMatch("No match found for barcode data".to_string()))
        }

        async fn stock_item(&self, id: StockItemId) -> Result<StockItem, ApiError> {
            self.items
                .get(&id)
                .cloned()
                .ok_or_else(|| ApiError::not_found(format!("stock item {id}")))
        }

        async fn stock_location(&self, id: LocationId) -> Result<StockLocation, ApiError> {
            self.locations
                .get(&id)
                .cloned()
                .ok_or_else(|| ApiError::not_found(format!("stock location {id}")))
        }

        async fn part(&self, id: PartId) -> Result<Part, ApiError> {
            self.parts
                .get(&id)
                .cloned()
                .ok_or_else(|| ApiError::not_found(format!("part {id}")))
        }

        async fn transfer_stock(
            &self,
            lines: &[TransferLine],
            location: LocationId,
            notes: &str,
        ) -> Result<(), ApiError> {
            if let Some(error) = &self.fail_transfers {
                return Err(error.clone());
            }
            self.transfers.lock().unwrap().push(RecordedTransfer {
                lines: lines.to_vec(),
                location,
                notes: notes.to_string(),
            });
            Ok(())
        }

        async fn search_parts(&self, query: &str, limit: usize) -> Result<Vec<Part>, ApiError> {
            self.searches
                .lock()
                .unwrap()
                .push((query.to_string(), limit));
            let needle = query.to_lowercase();
            let mut parts: Vec<Part> = self
                .parts
                .values()
                .filter(|part| {
                    needle.is_empty()
                        || part.name().to_lowercase().contains(&needle)
                        || part.ipn().is_some_and(|ipn| ipn.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect();
            parts.sort_by_key(Part::id);
            parts.truncate(limit);
            Ok(parts)
        }
    }
}
