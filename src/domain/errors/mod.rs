//! Domain error types.

mod api_error;
mod transfer_error;
mod validation_error;

pub use api_error::ApiError;
pub use transfer_error::TransferError;
pub use validation_error::{RowValidationError, TableError};
