//! Stock location entity.

use serde::{Deserialize, Serialize};

/// Remote primary key of a stock location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u64);

impl LocationId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for LocationId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A place where stock items reside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLocation {
    id: LocationId,
    name: String,
    pathstring: Option<String>,
}

impl StockLocation {
    /// Creates a new location with the given ID and name.
    #[must_use]
    pub fn new(id: impl Into<LocationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pathstring: None,
        }
    }

    /// Sets the full location path (e.g. `Warehouse/Shelf A/Bin 3`).
    #[must_use]
    pub fn with_pathstring(mut self, pathstring: impl Into<String>) -> Self {
        self.pathstring = Some(pathstring.into());
        self
    }

    /// Returns the location ID.
    #[must_use]
    pub const fn id(&self) -> LocationId {
        self.id
    }

    /// Returns the location name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full path, falling back to the name.
    #[must_use]
    pub fn path(&self) -> &str {
        self.pathstring.as_deref().unwrap_or(&self.name)
    }
}
