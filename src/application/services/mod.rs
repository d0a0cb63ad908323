//! Application services.

pub mod scanner;

pub use scanner::{BarcodeScanner, ScannedEntity};
