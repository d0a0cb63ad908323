//! Data transfer objects for the application layer.

mod transfer_dto;

pub use transfer_dto::{CheckInRecord, TransferOutcome};
