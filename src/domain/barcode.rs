//! Barcode scan results and entity whitelists.

use serde_json::Value;

use crate::domain::errors::ApiError;

const NO_MATCH_MESSAGE: &str = "No match found for barcode data";

/// Kind of entity a barcode resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarcodeKind {
    /// Stock item.
    StockItem,
    /// Stock location.
    StockLocation,
    /// Part definition.
    Part,
    /// Supplier part.
    SupplierPart,
    /// Manufacturer part.
    ManufacturerPart,
    /// Purchase order.
    PurchaseOrder,
    /// Sales order.
    SalesOrder,
    /// Return order.
    ReturnOrder,
    /// Build order.
    Build,
}

impl BarcodeKind {
    /// Every kind, in the order the scan response is searched.
    pub const ALL: [Self; 9] = [
        Self::StockItem,
        Self::StockLocation,
        Self::Part,
        Self::SupplierPart,
        Self::ManufacturerPart,
        Self::PurchaseOrder,
        Self::SalesOrder,
        Self::ReturnOrder,
        Self::Build,
    ];

    /// Returns the model key used by the barcode endpoint.
    #[must_use]
    pub const fn model_key(self) -> &'static str {
        match self {
            Self::StockItem => "stockitem",
            Self::StockLocation => "stocklocation",
            Self::Part => "part",
            Self::SupplierPart => "supplierpart",
            Self::ManufacturerPart => "manufacturerpart",
            Self::PurchaseOrder => "purchaseorder",
            Self::SalesOrder => "salesorder",
            Self::ReturnOrder => "returnorder",
            Self::Build => "build",
        }
    }

    /// Looks up a kind by model key.
    #[must_use]
    pub fn from_model_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.model_key() == key)
    }
}

impl std::fmt::Display for BarcodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.model_key())
    }
}

/// Entity matched by a scanned barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeMatch {
    /// Matched entity kind.
    pub kind: BarcodeKind,
    /// Remote primary key of the matched entity.
    pub pk: u64,
}

impl BarcodeMatch {
    /// Creates a match.
    #[must_use]
    pub const fn new(kind: BarcodeKind, pk: u64) -> Self {
        Self { kind, pk }
    }

    /// Extracts the match from a barcode endpoint response body.
    ///
    /// # Errors
    /// Returns [`ApiError::NoMatch`] if no known entity key carries a `pk`.
    pub fn from_response(body: &Value) -> Result<Self, ApiError> {
        let Some(object) = body.as_object() else {
            return Err(ApiError::invalid_response("barcode response is not an object"));
        };

        for kind in BarcodeKind::ALL {
            let pk = object
                .get(kind.model_key())
                .and_then(|entry| entry.get("pk"))
                .and_then(Value::as_u64);
            if let Some(pk) = pk {
                return Ok(Self::new(kind, pk));
            }
        }

        let message = object
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or(NO_MATCH_MESSAGE);
        Err(ApiError::NoMatch(message.to_string()))
    }
}

/// Set of entity kinds an input accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Whitelist {
    kinds: Vec<BarcodeKind>,
}

impl Whitelist {
    /// Creates a whitelist, dropping repeated kinds.
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = BarcodeKind>) -> Self {
        let mut unique = Vec::new();
        for kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        Self { kinds: unique }
    }

    /// Accepts only stock items.
    #[must_use]
    pub fn stock_items() -> Self {
        Self::new([BarcodeKind::StockItem])
    }

    /// Accepts only stock locations.
    #[must_use]
    pub fn stock_locations() -> Self {
        Self::new([BarcodeKind::StockLocation])
    }

    /// Returns whether `kind` is accepted.
    #[must_use]
    pub fn contains(&self, kind: BarcodeKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Rejects matches whose kind is not accepted.
    ///
    /// # Errors
    /// Returns [`ApiError::NotWhitelisted`] naming the found and accepted kinds.
    pub fn check(&self, found: &BarcodeMatch) -> Result<(), ApiError> {
        if self.contains(found.kind) {
            return Ok(());
        }

        Err(ApiError::NotWhitelisted {
            found: found.kind.to_string(),
            expected: self
                .kinds
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("stockitem", Some(BarcodeKind::StockItem) ; "stock_item")]
    #[test_case("stocklocation", Some(BarcodeKind::StockLocation) ; "stock_location")]
    #[test_case("build", Some(BarcodeKind::Build) ; "build")]
    #[test_case("widget", None ; "unknown")]
    fn test_from_model_key(key: &str, expected: Option<BarcodeKind>) {
        assert_eq!(BarcodeKind::from_model_key(key), expected);
    }

    #[test]
    fn test_response_with_stock_item() {
        let body = json!({
            "stockitem": {"pk": 338, "api_url": "/api/stock/338/"},
            "plugin": "InvenTreeBarcode",
            "barcode_data": "{\"stockitem\":338}",
            "success": "Match found for barcode data",
        });

        let found = BarcodeMatch::from_response(&body).unwrap();
        assert_eq!(found, BarcodeMatch::new(BarcodeKind::StockItem, 338));
    }

    #[test]
    fn test_response_ignores_keys_without_pk() {
        let body = json!({
            "part": {"api_url": "/api/part/"},
            "stocklocation": {"pk": 4},
        });

        let found = BarcodeMatch::from_response(&body).unwrap();
        assert_eq!(found.kind, BarcodeKind::StockLocation);
    }

    #[test]
    fn test_response_error_message_is_kept() {
        let body = json!({"error": "Barcode plugin failed", "plugin": null});
        let err = BarcodeMatch::from_response(&body).unwrap_err();
        assert_eq!(err, ApiError::NoMatch("Barcode plugin failed".to_string()));
    }

    #[test]
    fn test_response_without_match_or_error() {
        let err = BarcodeMatch::from_response(&json!({})).unwrap_err();
        assert_eq!(err.to_string(), NO_MATCH_MESSAGE);
    }

    #[test]
    fn test_response_not_object() {
        let err = BarcodeMatch::from_response(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
    }

    #[test]
    fn test_whitelist_accepts_listed_kind() {
        let whitelist = Whitelist::stock_items();
        assert!(
            whitelist
                .check(&BarcodeMatch::new(BarcodeKind::StockItem, 1))
                .is_ok()
        );
    }

    #[test]
    fn test_whitelist_rejects_other_kind() {
        let whitelist = Whitelist::new([BarcodeKind::StockItem, BarcodeKind::StockItem, BarcodeKind::Part]);
        let err = whitelist
            .check(&BarcodeMatch::new(BarcodeKind::StockLocation, 1))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Barcode is a stocklocation, expected one of: stockitem, part"
        );
    }
}
