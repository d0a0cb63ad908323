//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Tabs,
};
use tracing::{debug, error, info, warn};

use crate::application::services::BarcodeScanner;
use crate::application::use_cases::{CheckInUseCase, SearchPartsUseCase, TransferItemsUseCase};
use crate::domain::errors::{ApiError, TableError, TransferError};
use crate::domain::ports::InventoryPort;
use crate::domain::rows::RowKey;
use crate::infrastructure::config::AppConfig;
use crate::presentation::events::{EventHandler, EventResult, GlobalKey};
use crate::presentation::ui::{
    CheckInTab, ErrorDialog, PartSearchTab, RowEditAction, RowEditDialog, TabAction, TabId,
    TransferTab,
};
use crate::presentation::widgets::{ConnectionStatus, FooterBar, HeaderBar, KeyHint, StatusBar};

const TAB_HINTS: &[KeyHint] = &[
    KeyHint::new("F1-F3", "Tabs"),
    KeyHint::new("Tab", "Focus"),
    KeyHint::new("Enter", "Scan/Edit"),
    KeyHint::new("Del", "Remove"),
    KeyHint::new("C-c", "Quit"),
];

const ERROR_HINTS: &[KeyHint] = &[KeyHint::new("Enter", "Dismiss")];

const EDIT_HINTS: &[KeyHint] = &[
    KeyHint::new("Tab", "Next"),
    KeyHint::new("Enter", "Save"),
    KeyHint::new("Esc", "Cancel"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

enum Modal {
    Error(ErrorDialog),
    RowEdit(RowEditDialog),
}

/// Terminal application: tabs, dialogs and the event loop.
pub struct App {
    state: AppState,
    host: String,
    server: Option<String>,
    connection: ConnectionStatus,
    inventory: Arc<dyn InventoryPort>,
    scanner: BarcodeScanner,
    transfer_use_case: TransferItemsUseCase,
    check_in_use_case: CheckInUseCase,
    search_use_case: SearchPartsUseCase,
    active_tab: TabId,
    transfer_tab: TransferTab,
    check_in_tab: CheckInTab,
    part_search_tab: PartSearchTab,
    modals: Vec<Modal>,
}

impl App {
    /// Creates the app for a server.
    ///
    /// # Errors
    /// Returns error if a tab's table cannot be set up.
    pub fn new(
        inventory: Arc<dyn InventoryPort>,
        config: &AppConfig,
        host: impl Into<String>,
    ) -> Result<Self, TableError> {
        Ok(Self {
            state: AppState::Running,
            host: host.into(),
            server: None,
            connection: ConnectionStatus::Connecting,
            scanner: BarcodeScanner::new(inventory.clone()),
            transfer_use_case: TransferItemsUseCase::new(inventory.clone()),
            check_in_use_case: CheckInUseCase::new(inventory.clone()),
            search_use_case: SearchPartsUseCase::new(inventory.clone(), config.part_search_limit),
            inventory,
            active_tab: TabId::Transfer,
            transfer_tab: TransferTab::new(&config.ui)?,
            check_in_tab: CheckInTab::new(&config.ui)?,
            part_search_tab: PartSearchTab::new(&config.ui),
            modals: Vec::new(),
        })
    }

    /// # Errors
    /// Returns error if drawing or reading terminal events fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        self.connect().await;

        let mut terminal_events = EventStream::new();
        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            let Some(event) = terminal_events.next().await else {
                break;
            };
            if self.handle_terminal_event(event?).await == EventResult::Exit {
                self.state = AppState::Exiting;
            }
            terminal.draw(|frame| self.render(frame))?;
        }

        info!("Application exiting normally");
        Ok(())
    }

    async fn connect(&mut self) {
        match self.inventory.server_info().await {
            Ok(server) => {
                info!(
                    host = %self.host,
                    server = %server.label(),
                    api_version = ?server.api_version,
                    "Connected to InvenTree"
                );
                self.server = Some(server.label());
                self.connection = ConnectionStatus::Connected;
            }
            Err(e) => {
                error!(host = %self.host, error = %e, "Failed to reach InvenTree");
                self.connection = ConnectionStatus::Error;
                self.push_error("Connection Error", e.to_string());
            }
        }
    }

    async fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if EventHandler::is_press(&key) => self.handle_key(key).await,
            _ => EventResult::Continue,
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if self.handle_modal_key(key) {
            return EventResult::Consumed;
        }

        if let Some(global) = EventHandler::global_key(&key) {
            match global {
                GlobalKey::Quit => return EventResult::Exit,
                GlobalKey::SwitchTab(tab) => self.active_tab = tab,
                GlobalKey::NextTab => self.active_tab = self.active_tab.next(),
                GlobalKey::PreviousTab => self.active_tab = self.active_tab.previous(),
            }
            debug!(tab = self.active_tab.title(), "Switched tab");
            return EventResult::Consumed;
        }

        let action = match self.active_tab {
            TabId::Transfer => self.transfer_tab.handle_key(key),
            TabId::CheckIn => self.check_in_tab.handle_key(key),
            TabId::PartSearch => self.part_search_tab.handle_key(key),
        };
        self.execute(action).await;
        EventResult::Continue
    }

    /// Routes a key to the top modal. Returns false if no modal is open.
    fn handle_modal_key(&mut self, key: KeyEvent) -> bool {
        let Some(modal) = self.modals.last_mut() else {
            return false;
        };

        match modal {
            Modal::Error(dialog) => {
                if dialog.handle_key(key) {
                    self.modals.pop();
                }
            }
            Modal::RowEdit(dialog) => match dialog.handle_key(key) {
                RowEditAction::None => {}
                RowEditAction::Cancel => {
                    self.modals.pop();
                }
                RowEditAction::Submit(edits) => {
                    let (tab, row) = dialog.target();
                    let result = match tab {
                        TabId::Transfer => self.transfer_tab.apply_edits(row, &edits),
                        TabId::CheckIn => self.check_in_tab.apply_edits(row, &edits),
                        TabId::PartSearch => self.part_search_tab.apply_edits(row, &edits),
                    };
                    match result {
                        Ok(()) => {
                            debug!(tab = tab.title(), %row, "Row edited");
                            self.modals.pop();
                        }
                        Err(e) => {
                            dialog.set_error(&e);
                            debug!(error = dialog.error().unwrap_or_default(), "Row edit rejected");
                        }
                    }
                }
            },
        }
        true
    }

    async fn execute(&mut self, action: TabAction) {
        match action {
            TabAction::None => {}
            TabAction::ScanDestination(payload) => self.scan_destination(&payload).await,
            TabAction::ScanItem(payload) => self.scan_item(&payload).await,
            TabAction::SubmitTransfer => self.submit_transfer().await,
            TabAction::CheckIn(payload) => self.check_in(&payload).await,
            TabAction::SearchParts(query) => self.search_parts(&query).await,
            TabAction::EditRow(row) => self.open_row_editor(row),
        }
    }

    async fn scan_destination(&mut self, payload: &str) {
        match self.scanner.scan_location(payload).await {
            Ok(location) => {
                info!(location = %location.name(), "Destination set");
                self.transfer_tab.set_destination(location);
            }
            Err(e) => self.scan_failed(&e),
        }
    }

    async fn scan_item(&mut self, payload: &str) {
        match self.scanner.scan_stock_item(payload).await {
            Ok(item) => {
                let id = item.id();
                if self.transfer_tab.add_item(item) {
                    debug!(pk = %id, "Stock item scanned");
                } else {
                    self.transfer_tab
                        .set_status(StatusBar::info(format!("Stock #{id} is already listed")));
                }
            }
            Err(e) => self.scan_failed(&e),
        }
    }

    fn scan_failed(&mut self, error: &ApiError) {
        self.note_failure("scan", error);
        self.push_error("Scan Error", error.to_string());
    }

    /// Logs a failed call; network failures mark the server offline.
    fn note_failure(&mut self, context: &str, error: &ApiError) {
        if error.is_network_error() {
            warn!(context, error = %error, "InvenTree unreachable");
            self.connection = ConnectionStatus::Error;
        } else if error.is_scan_miss() {
            debug!(context, error = %error, "Barcode not accepted");
        } else {
            warn!(context, error = %error, "Request failed");
        }
    }

    async fn submit_transfer(&mut self) {
        let items = self.transfer_tab.items();
        let destination = self.transfer_tab.destination().cloned();

        match self
            .transfer_use_case
            .execute(&items, destination.as_ref())
            .await
        {
            Ok(outcome) => {
                self.transfer_tab.complete(&outcome);
            }
            Err(TransferError::Api(e)) => {
                self.note_failure("transfer", &e);
                self.transfer_tab.set_status(StatusBar::error(e.to_string()));
                self.push_error("Transfer Error", e.to_string());
            }
            Err(e) => {
                debug!(error = %e.joined("; "), "Transfer rejected");
                self.transfer_tab.show_validation(&e);
                self.push_error("Submission Error", e.joined("\n"));
            }
        }
    }

    async fn check_in(&mut self, payload: &str) {
        match self.check_in_use_case.execute(payload).await {
            Ok(record) => {
                self.check_in_tab.record(&record);
            }
            Err(e) => {
                self.note_failure("check-in", &e);
                self.check_in_tab.set_status(StatusBar::error(e.to_string()));
                self.push_error("Check-In Error", e.to_string());
            }
        }
    }

    async fn search_parts(&mut self, query: &str) {
        match self.search_use_case.execute(query).await {
            Ok(parts) => {
                debug!(query, count = parts.len(), "Part search finished");
                self.part_search_tab.show_results(parts);
            }
            Err(e) => {
                self.note_failure("part search", &e);
                self.part_search_tab.show_error(&e.to_string());
                self.push_error("Search Error", e.to_string());
            }
        }
    }

    fn open_row_editor(&mut self, row: RowKey) {
        let tab = self.active_tab;
        let dialog = match tab {
            TabId::Transfer => self
                .transfer_tab
                .row(row)
                .map(|r| RowEditDialog::new(tab, r)),
            TabId::CheckIn => self
                .check_in_tab
                .row(row)
                .map(|r| RowEditDialog::new(tab, r)),
            TabId::PartSearch => self
                .part_search_tab
                .row(row)
                .map(|r| RowEditDialog::new(tab, r)),
        };

        match dialog {
            Some(dialog) if dialog.has_fields() => self.modals.push(Modal::RowEdit(dialog)),
            Some(_) => {
                let status = StatusBar::info("Row has no editable fields");
                match tab {
                    TabId::Transfer => self.transfer_tab.set_status(status),
                    TabId::CheckIn => self.check_in_tab.set_status(status),
                    TabId::PartSearch => self.part_search_tab.set_status(status),
                }
            }
            None => debug!(%row, "Row vanished before editing"),
        }
    }

    fn push_error(&mut self, title: &str, message: impl Into<String>) {
        let dialog = ErrorDialog::new(title, message);
        debug!(title = dialog.title(), message = dialog.message(), "Showing error");
        self.modals.push(Modal::Error(dialog));
    }

    fn footer_hints(&self) -> &'static [KeyHint] {
        match self.modals.last() {
            Some(Modal::Error(_)) => ERROR_HINTS,
            Some(Modal::RowEdit(_)) => EDIT_HINTS,
            None => TAB_HINTS,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, tabs_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let server = match &self.server {
            Some(server) => format!("{server} @ {}", self.host),
            None => self.host.clone(),
        };
        frame.render_widget(
            HeaderBar::new(crate::NAME, crate::VERSION)
                .server(Some(server.as_str()))
                .connection_status(self.connection),
            header_area,
        );

        let titles = TabId::ALL
            .iter()
            .map(|tab| Line::from(format!(" F{} {} ", tab.index() + 1, tab.title())));
        frame.render_widget(
            Tabs::new(titles)
                .select(self.active_tab.index())
                .style(Style::default().fg(Color::Gray))
                .highlight_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            tabs_area,
        );

        match self.active_tab {
            TabId::Transfer => frame.render_widget(&mut self.transfer_tab, body_area),
            TabId::CheckIn => frame.render_widget(&mut self.check_in_tab, body_area),
            TabId::PartSearch => frame.render_widget(&mut self.part_search_tab, body_area),
        }

        let rows = match self.active_tab {
            TabId::Transfer => self.transfer_tab.table().len(),
            TabId::CheckIn => self.check_in_tab.table().len(),
            TabId::PartSearch => self.part_search_tab.table().len(),
        };
        let rows = format!("{rows} rows");
        frame.render_widget(
            FooterBar::new(self.footer_hints()).right_info(Some(rows.as_str())),
            footer_area,
        );

        for modal in &self.modals {
            match modal {
                Modal::Error(dialog) => frame.render_widget(dialog, area),
                Modal::RowEdit(dialog) => frame.render_widget(dialog, area),
            }
        }
    }
}
