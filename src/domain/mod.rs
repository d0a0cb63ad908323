//! Domain layer with core business entities and port definitions.

/// Barcode scan results and whitelists.
pub mod barcode;
/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Table row models.
pub mod rows;
/// Serde utilities.
pub mod serde_utils;

pub use barcode::{BarcodeKind, BarcodeMatch, Whitelist};
pub use entities::{ApiToken, Part, ServerInfo, StockItem, StockLocation};
pub use errors::{ApiError, TransferError};
pub use ports::InventoryPort;
