use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    LocationId, Part, ServerInfo, StockItem, StockLocation,
};
use crate::domain::serde_utils::decimal;

/// API root response.
#[derive(Debug, Deserialize)]
pub struct ServerInfoResponse {
    /// Server product name.
    pub server: String,
    /// Server software version.
    pub version: String,
    /// REST API version.
    #[serde(rename = "apiVersion", default)]
    pub api_version: Option<u32>,
}

impl From<ServerInfoResponse> for ServerInfo {
    fn from(response: ServerInfoResponse) -> Self {
        Self {
            server: response.server,
            version: response.version,
            api_version: response.api_version,
        }
    }
}

/// Barcode scan request body.
#[derive(Debug, Serialize)]
pub struct BarcodeRequest<'a> {
    /// Raw scanned data.
    pub barcode: &'a str,
}

/// Stock location detail.
#[derive(Debug, Deserialize)]
pub struct LocationResponse {
    pub pk: u64,
    pub name: String,
    #[serde(default)]
    pub pathstring: Option<String>,
}

impl From<LocationResponse> for StockLocation {
    fn from(response: LocationResponse) -> Self {
        let location = Self::new(response.pk, response.name);
        match response.pathstring {
            Some(path) => location.with_pathstring(path),
            None => location,
        }
    }
}

/// Part detail.
#[derive(Debug, Deserialize)]
pub struct PartResponse {
    pub pk: u64,
    pub name: String,
    #[serde(rename = "IPN", default)]
    pub ipn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_location: Option<u64>,
    #[serde(default, with = "decimal::option")]
    pub in_stock: Option<f64>,
}

impl From<PartResponse> for Part {
    fn from(response: PartResponse) -> Self {
        let mut part = Self::new(response.pk, response.name)
            .with_description(response.description.unwrap_or_default())
            .with_in_stock(response.in_stock.unwrap_or_default());
        if let Some(ipn) = response.ipn.filter(|ipn| !ipn.is_empty()) {
            part = part.with_ipn(ipn);
        }
        if let Some(location) = response.default_location {
            part = part.with_default_location(LocationId(location));
        }
        part
    }
}

/// Stock item detail, requested with part and location details.
#[derive(Debug, Deserialize)]
pub struct StockItemResponse {
    pub pk: u64,
    pub part: u64,
    #[serde(with = "decimal")]
    pub quantity: f64,
    #[serde(default)]
    pub location: Option<u64>,
    #[serde(default)]
    pub part_detail: Option<PartResponse>,
    #[serde(default)]
    pub location_detail: Option<LocationResponse>,
}

impl From<StockItemResponse> for StockItem {
    fn from(response: StockItemResponse) -> Self {
        let mut item = Self::new(response.pk, response.part, response.quantity);
        if let Some(part) = response.part_detail {
            item = item.with_part_name(part.name);
        }
        if let Some(location) = response.location {
            let name = response
                .location_detail
                .map_or_else(|| format!("Location #{location}"), |detail| detail.name);
            item = item.with_location(LocationId(location), name);
        }
        item
    }
}

/// Part list; paginated when `limit` is sent, a plain array otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PartListResponse {
    Paginated { results: Vec<PartResponse> },
    Plain(Vec<PartResponse>),
}

impl PartListResponse {
    pub fn into_parts(self) -> Vec<Part> {
        let results = match self {
            Self::Paginated { results } | Self::Plain(results) => results,
        };
        results.into_iter().map(Part::from).collect()
    }
}

/// One line of a transfer request.
#[derive(Debug, Serialize)]
pub struct TransferItem {
    pub pk: u64,
    pub quantity: f64,
}

/// Stock transfer request body.
#[derive(Debug, Serialize)]
pub struct TransferRequest<'a> {
    pub items: Vec<TransferItem>,
    pub location: u64,
    pub notes: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_item_with_details() {
        let body = r#"{
            "pk": 338,
            "part": 12,
            "quantity": 10.0,
            "location": 3,
            "part_detail": {"pk": 12, "name": "Resistor 10k", "IPN": "", "default_location": 4},
            "location_detail": {"pk": 3, "name": "Shelf A", "pathstring": "Store/Shelf A"}
        }"#;

        let item: StockItem = serde_json::from_str::<StockItemResponse>(body).unwrap().into();

        assert_eq!(item.id().as_u64(), 338);
        assert_eq!(item.part_name(), "Resistor 10k");
        assert_eq!(item.location_name(), "Shelf A");
        assert!((item.original_quantity() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stock_item_without_location() {
        let body = r#"{"pk": 1, "part": 2, "quantity": "3", "location": null}"#;
        let item: StockItem = serde_json::from_str::<StockItemResponse>(body).unwrap().into();

        assert_eq!(item.location_name(), "None");
        assert_eq!(item.part_name(), "UNKNOWN");
    }

    #[test]
    fn test_part_list_paginated_and_plain() {
        let paginated = r#"{"count": 1, "next": null, "previous": null, "results": [{"pk": 1, "name": "A"}]}"#;
        let plain = r#"[{"pk": 1, "name": "A"}, {"pk": 2, "name": "B", "IPN": "B-1"}]"#;

        let parts = serde_json::from_str::<PartListResponse>(paginated)
            .unwrap()
            .into_parts();
        assert_eq!(parts.len(), 1);

        let parts = serde_json::from_str::<PartListResponse>(plain)
            .unwrap()
            .into_parts();
        assert_eq!(parts[1].ipn(), Some("B-1"));
        assert_eq!(parts[0].ipn(), None);
    }

    #[test]
    fn test_transfer_request_shape() {
        let request = TransferRequest {
            items: vec![TransferItem { pk: 1, quantity: 2.0 }],
            location: 4,
            notes: "",
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"items": [{"pk": 1, "quantity": 2.0}], "location": 4, "notes": ""})
        );
    }

    #[test]
    fn test_server_info() {
        let body = r#"{"server": "InvenTree", "version": "0.15.0", "apiVersion": 200, "instance": "x"}"#;
        let info: ServerInfo = serde_json::from_str::<ServerInfoResponse>(body).unwrap().into();
        assert_eq!(info.label(), "InvenTree 0.15.0");
    }
}
