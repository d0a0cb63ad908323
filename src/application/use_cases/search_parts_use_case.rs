//! Part search use case.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::Part;
use crate::domain::errors::ApiError;
use crate::domain::ports::InventoryPort;

/// Searches parts by free text.
pub struct SearchPartsUseCase {
    inventory: Arc<dyn InventoryPort>,
    limit: usize,
}

impl SearchPartsUseCase {
    /// Creates the use case returning at most `limit` parts per search.
    #[must_use]
    pub fn new(inventory: Arc<dyn InventoryPort>, limit: usize) -> Self {
        Self {
            inventory,
            limit: limit.max(1),
        }
    }

    /// Runs a search; an empty query lists parts.
    ///
    /// # Errors
    /// Returns error if the server request fails.
    pub async fn execute(&self, query: &str) -> Result<Vec<Part>, ApiError> {
        let query = query.trim();
        let parts = self.inventory.search_parts(query, self.limit).await?;
        debug!(query, count = parts.len(), "Part search finished");
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockInventory;

    fn inventory() -> MockInventory {
        MockInventory::new()
            .with_part(Part::new(1_u64, "Raspberry Pi Zero").with_ipn("RPI-0001"))
            .with_part(Part::new(2_u64, "Resistor 10k"))
    }

    #[tokio::test]
    async fn test_search_trims_query() {
        let inventory = Arc::new(inventory());
        let use_case = SearchPartsUseCase::new(inventory.clone(), 25);

        let parts = use_case.execute("  rpi-0001 ").await.unwrap();

        assert_eq!(parts.len(), 1);
        assert_eq!(inventory.searches(), vec![("rpi-0001".to_string(), 25)]);
    }

    #[tokio::test]
    async fn test_empty_query_lists_parts() {
        let use_case = SearchPartsUseCase::new(Arc::new(inventory()), 50);
        let parts = use_case.execute("").await.unwrap();
        assert_eq!(parts.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_limit_is_raised() {
        let inventory = Arc::new(inventory());
        let use_case = SearchPartsUseCase::new(inventory.clone(), 0);
        use_case.execute("x").await.unwrap();
        assert_eq!(inventory.searches()[0].1, 1);
    }
}
