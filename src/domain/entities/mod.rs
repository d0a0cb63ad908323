//! Domain entities.

mod api_token;
mod part;
mod stock_item;
mod stock_location;

pub use api_token::ApiToken;
pub use part::{Part, PartId};
pub use stock_item::{NO_LOCATION_NAME, StockItem, StockItemId, UNKNOWN_PART_NAME};
pub use stock_location::{LocationId, StockLocation};

/// Server identification returned by the API root endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server product name (normally `InvenTree`).
    pub server: String,
    /// Server software version.
    pub version: String,
    /// REST API version number.
    pub api_version: Option<u32>,
}

impl ServerInfo {
    /// Returns a short label such as `InvenTree 0.15.0`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.server, self.version)
    }
}
