//! Part entity.

use serde::{Deserialize, Serialize};

use super::LocationId;

/// Remote primary key of a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartId(pub u64);

impl PartId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PartId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A part definition as tracked by the inventory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    id: PartId,
    name: String,
    ipn: Option<String>,
    description: String,
    default_location: Option<LocationId>,
    in_stock: f64,
}

impl Part {
    /// Creates a new part with the given ID and name.
    #[must_use]
    pub fn new(id: impl Into<PartId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ipn: None,
            description: String::new(),
            default_location: None,
            in_stock: 0.0,
        }
    }

    /// Sets the internal part number.
    #[must_use]
    pub fn with_ipn(mut self, ipn: impl Into<String>) -> Self {
        self.ipn = Some(ipn.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the default stock location.
    #[must_use]
    pub const fn with_default_location(mut self, location: LocationId) -> Self {
        self.default_location = Some(location);
        self
    }

    /// Sets the total quantity in stock.
    #[must_use]
    pub const fn with_in_stock(mut self, in_stock: f64) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Remote primary key.
    #[must_use]
    pub const fn id(&self) -> PartId {
        self.id
    }

    /// Part name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Internal part number, if set.
    #[must_use]
    pub fn ipn(&self) -> Option<&str> {
        self.ipn.as_deref()
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Location stock of this part is returned to.
    #[must_use]
    pub const fn default_location(&self) -> Option<LocationId> {
        self.default_location
    }

    /// Total quantity in stock.
    #[must_use]
    pub const fn in_stock(&self) -> f64 {
        self.in_stock
    }
}
