mod button;
mod footer_bar;
mod header_bar;
mod input;
mod labeled_text;
mod model_table;
mod status_bar;

pub use button::{Button, ButtonVariant};
pub use footer_bar::{FooterBar, FooterBarStyle, KeyHint};
pub use header_bar::{ConnectionStatus, HeaderBar, HeaderBarStyle};
pub use input::TextInput;
pub use labeled_text::LabeledText;
pub use model_table::{ModelTable, SortOrder, SyncReport, TableAction};
pub use status_bar::{STATUS_OK, StatusBar, StatusLevel};
