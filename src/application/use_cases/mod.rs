//! Use case implementations.

mod check_in_use_case;
mod search_parts_use_case;
mod transfer_items_use_case;

pub use check_in_use_case::CheckInUseCase;
pub use search_parts_use_case::SearchPartsUseCase;
pub use transfer_items_use_case::TransferItemsUseCase;
