//! Stock item entity.

use serde::{Deserialize, Serialize};

use super::{LocationId, PartId, StockLocation};

/// Display text used when the remote service does not name a part.
pub const UNKNOWN_PART_NAME: &str = "UNKNOWN";

/// Display text used for a stock item without a location.
pub const NO_LOCATION_NAME: &str = "None";

/// Remote primary key of a stock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StockItemId(pub u64);

impl StockItemId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for StockItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StockItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A quantity of a part at a location.
///
/// `original_quantity` is what the server reported when the item was fetched;
/// `quantity` is the amount the operator intends to move and is the only field
/// that changes locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    id: StockItemId,
    part: PartId,
    part_name: Option<String>,
    quantity: f64,
    original_quantity: f64,
    location: Option<LocationId>,
    location_name: Option<String>,
    default_location: Option<StockLocation>,
}

impl StockItem {
    /// Creates a stock item as reported by the server.
    #[must_use]
    pub fn new(id: impl Into<StockItemId>, part: impl Into<PartId>, quantity: f64) -> Self {
        Self {
            id: id.into(),
            part: part.into(),
            part_name: None,
            quantity,
            original_quantity: quantity,
            location: None,
            location_name: None,
            default_location: None,
        }
    }

    /// Sets the part name.
    #[must_use]
    pub fn with_part_name(mut self, name: impl Into<String>) -> Self {
        self.part_name = Some(name.into());
        self
    }

    /// Sets the current location.
    #[must_use]
    pub fn with_location(mut self, id: LocationId, name: impl Into<String>) -> Self {
        self.location = Some(id);
        self.location_name = Some(name.into());
        self
    }

    /// Sets the default location of the item's part.
    #[must_use]
    pub fn with_default_location(mut self, location: StockLocation) -> Self {
        self.default_location = Some(location);
        self
    }

    /// Remote primary key.
    #[must_use]
    pub const fn id(&self) -> StockItemId {
        self.id
    }

    /// Part this stock belongs to.
    #[must_use]
    pub const fn part(&self) -> PartId {
        self.part
    }

    /// Returns the part name, or [`UNKNOWN_PART_NAME`].
    #[must_use]
    pub fn part_name(&self) -> &str {
        self.part_name.as_deref().unwrap_or(UNKNOWN_PART_NAME)
    }

    /// Quantity to transfer.
    #[must_use]
    pub const fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Quantity reported by the server.
    #[must_use]
    pub const fn original_quantity(&self) -> f64 {
        self.original_quantity
    }

    /// Returns whether the quantity was changed from the server value.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        (self.quantity - self.original_quantity).abs() > f64::EPSILON
    }

    /// Sets the quantity to transfer.
    pub const fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
    }

    /// Current location, if any.
    #[must_use]
    pub const fn location(&self) -> Option<LocationId> {
        self.location
    }

    /// Returns the current location name, or [`NO_LOCATION_NAME`].
    #[must_use]
    pub fn location_name(&self) -> &str {
        self.location_name.as_deref().unwrap_or(NO_LOCATION_NAME)
    }

    /// Default location of the item's part, if resolved.
    #[must_use]
    pub const fn default_location(&self) -> Option<&StockLocation> {
        self.default_location.as_ref()
    }

    /// Sets the resolved default location.
    pub fn set_default_location(&mut self, location: Option<StockLocation>) {
        self.default_location = location;
    }
}
