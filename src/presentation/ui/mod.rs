//! UI screens and dialogs.

mod app;
mod check_in_tab;
mod error_dialog;
mod part_search_tab;
mod row_edit_dialog;
mod tab;
mod transfer_tab;
/// Layout helpers.
pub mod utils;

pub use app::App;
pub use check_in_tab::CheckInTab;
pub use error_dialog::ErrorDialog;
pub use part_search_tab::PartSearchTab;
pub use row_edit_dialog::{RowEditAction, RowEditDialog};
pub use tab::{TabAction, TabId};
pub use transfer_tab::{TransferFocus, TransferTab};
