//! Tab identities and the requests tabs make to the app.

use crate::domain::rows::RowKey;

/// One of the application tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabId {
    /// Stock transfer.
    #[default]
    Transfer,
    /// Check-in.
    CheckIn,
    /// Part search.
    PartSearch,
}

impl TabId {
    /// Tabs in display order.
    pub const ALL: [Self; 3] = [Self::Transfer, Self::CheckIn, Self::PartSearch];

    /// Tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Transfer => "Transfer",
            Self::CheckIn => "Check-In",
            Self::PartSearch => "Part Search",
        }
    }

    /// Position in the tab bar.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Transfer => 0,
            Self::CheckIn => 1,
            Self::PartSearch => 2,
        }
    }

    /// Tab at a tab bar position.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Transfer),
            1 => Some(Self::CheckIn),
            2 => Some(Self::PartSearch),
            _ => None,
        }
    }

    /// Next tab, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Transfer => Self::CheckIn,
            Self::CheckIn => Self::PartSearch,
            Self::PartSearch => Self::Transfer,
        }
    }

    /// Previous tab, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Transfer => Self::PartSearch,
            Self::CheckIn => Self::Transfer,
            Self::PartSearch => Self::CheckIn,
        }
    }
}

/// Work a tab asks the app to carry out after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabAction {
    /// Nothing to do.
    None,
    /// Resolve a destination location barcode.
    ScanDestination(String),
    /// Resolve a stock item barcode for the transfer table.
    ScanItem(String),
    /// Submit the pending transfer.
    SubmitTransfer,
    /// Check in a scanned stock item.
    CheckIn(String),
    /// Search parts by name or IPN.
    SearchParts(String),
    /// Open the edit dialog for a row.
    EditRow(RowKey),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        assert_eq!(TabId::Transfer.next(), TabId::CheckIn);
        assert_eq!(TabId::PartSearch.next(), TabId::Transfer);
        assert_eq!(TabId::Transfer.previous(), TabId::PartSearch);
    }

    #[test]
    fn test_tab_index_round_trip() {
        for tab in TabId::ALL {
            assert_eq!(TabId::from_index(tab.index()), Some(tab));
        }
        assert_eq!(TabId::from_index(3), None);
    }
}
