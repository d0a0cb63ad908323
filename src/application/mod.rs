//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{CheckInRecord, TransferOutcome};
pub use services::{BarcodeScanner, ScannedEntity};
pub use use_cases::{CheckInUseCase, SearchPartsUseCase, TransferItemsUseCase};
