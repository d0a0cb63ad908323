//! Stock transfer use case.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::dto::TransferOutcome;
use crate::domain::entities::{StockItem, StockLocation};
use crate::domain::errors::TransferError;
use crate::domain::ports::{InventoryPort, TransferLine};

/// Moves a batch of scanned stock items to one destination.
pub struct TransferItemsUseCase {
    inventory: Arc<dyn InventoryPort>,
}

impl TransferItemsUseCase {
    /// Creates the use case.
    #[must_use]
    pub fn new(inventory: Arc<dyn InventoryPort>) -> Self {
        Self { inventory }
    }

    /// Validates the batch and performs the transfer.
    ///
    /// All validation problems are reported together, in display order.
    ///
    /// # Errors
    /// Returns [`TransferError::Invalid`] when nothing was scanned or no
    /// destination is set, and [`TransferError::Api`] if the server rejects
    /// the transfer.
    pub async fn execute(
        &self,
        items: &[StockItem],
        destination: Option<&StockLocation>,
    ) -> Result<TransferOutcome, TransferError> {
        let mut problems = Vec::new();
        if items.is_empty() {
            problems.push(TransferError::NoItems);
        }
        if destination.is_none() {
            problems.push(TransferError::NoDestination);
        }
        let Some(destination) = destination.filter(|_| problems.is_empty()) else {
            return Err(TransferError::Invalid(problems));
        };

        let lines: Vec<TransferLine> = items.iter().map(TransferLine::from).collect();
        let partial = items.iter().filter(|item| item.is_partial()).count();

        info!(
            count = lines.len(),
            partial,
            destination = %destination.name(),
            "Transferring stock items"
        );

        self.inventory
            .transfer_stock(&lines, destination.id(), "")
            .await
            .inspect_err(|e| warn!(error = %e, "Transfer failed"))?;

        Ok(TransferOutcome {
            count: lines.len(),
            destination_name: destination.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{LocationId, StockItemId};
    use crate::domain::errors::ApiError;
    use crate::domain::ports::mocks::MockInventory;

    fn items() -> Vec<StockItem> {
        vec![
            StockItem::new(1_u64, 1_u64, 5.0),
            StockItem::new(2_u64, 1_u64, 3.0),
        ]
    }

    #[tokio::test]
    async fn test_reports_all_problems() {
        let use_case = TransferItemsUseCase::new(Arc::new(MockInventory::new()));
        let err = use_case.execute(&[], None).await.unwrap_err();

        assert_eq!(
            err,
            TransferError::Invalid(vec![TransferError::NoItems, TransferError::NoDestination])
        );
    }

    #[tokio::test]
    async fn test_missing_destination() {
        let use_case = TransferItemsUseCase::new(Arc::new(MockInventory::new()));
        let err = use_case.execute(&items(), None).await.unwrap_err();

        assert_eq!(err.joined(" "), "Destination not set.");
    }

    #[tokio::test]
    async fn test_transfer_sends_edited_quantities() {
        let inventory = Arc::new(MockInventory::new());
        let use_case = TransferItemsUseCase::new(inventory.clone());
        let destination = StockLocation::new(4_u64, "Bin 4");
        let mut items = items();
        items[1].set_quantity(1.0);

        let outcome = use_case.execute(&items, Some(&destination)).await.unwrap();

        assert_eq!(outcome.summary(), "Transferred 2 stock items to Bin 4");
        let transfers = inventory.transfers();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].location, LocationId(4));
        assert_eq!(
            transfers[0].lines,
            vec![
                TransferLine::new(StockItemId(1), 5.0),
                TransferLine::new(StockItemId(2), 1.0),
            ]
        );
    }

    #[tokio::test]
    async fn test_server_failure_is_api_error() {
        let inventory = MockInventory::new().failing_transfers(ApiError::bad_request("nope"));
        let use_case = TransferItemsUseCase::new(Arc::new(inventory));
        let destination = StockLocation::new(4_u64, "Bin 4");

        let err = use_case
            .execute(&items(), Some(&destination))
            .await
            .unwrap_err();
        assert_eq!(err, TransferError::Api(ApiError::bad_request("nope")));
    }
}
