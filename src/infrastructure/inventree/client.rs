//! InvenTree REST API client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::{
    BarcodeRequest, LocationResponse, PartListResponse, PartResponse, ServerInfoResponse,
    StockItemResponse, TransferItem, TransferRequest,
};
use crate::domain::barcode::BarcodeMatch;
use crate::domain::entities::{
    ApiToken, LocationId, Part, PartId, ServerInfo, StockItem, StockItemId, StockLocation,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{InventoryPort, TransferLine};
use crate::infrastructure::config::ApiSettings;

const USER_AGENT: &str = concat!("inventree-tui/", env!("CARGO_PKG_VERSION"));

/// InvenTree API client.
pub struct InvenTreeClient {
    client: Client,
    base_url: String,
    token: ApiToken,
}

impl InvenTreeClient {
    /// Creates a client for the configured server.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.host.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
        })
    }

    /// Returns the server base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(header::AUTHORIZATION, self.token.header_value())
            .header(header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach InvenTree server");
                map_transport_error(&e)
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<Value>().await.ok();
        Err(map_status(status, body.as_ref()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, entity: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET");

        let result = self.send(self.client.get(&url)).await;
        let response = match result {
            Err(ApiError::NotFound { .. }) => return Err(ApiError::not_found(entity)),
            other => other?,
        };

        parse_json(response).await
    }
}

fn map_transport_error(error: &reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::network("request timed out")
    } else if error.is_connect() {
        ApiError::network("failed to connect to InvenTree server")
    } else {
        ApiError::network(error.to_string())
    }
}

fn map_status(status: StatusCode, body: Option<&Value>) -> ApiError {
    let detail = body.and_then(extract_detail);

    match status {
        StatusCode::UNAUTHORIZED => ApiError::rejected("invalid or expired API token"),
        StatusCode::FORBIDDEN => ApiError::rejected(
            detail.unwrap_or_else(|| "permission denied".to_string()),
        ),
        StatusCode::NOT_FOUND => ApiError::not_found("resource"),
        StatusCode::BAD_REQUEST => ApiError::bad_request(detail.unwrap_or_else(|| format!("HTTP {status}"))),
        s if s.is_server_error() => ApiError::network(format!("InvenTree server error: {s}")),
        _ => ApiError::unexpected(format!(
            "unexpected response: {status} - {}",
            detail.unwrap_or_default()
        )),
    }
}

/// Pulls a readable message out of a DRF-style error body.
fn extract_detail(body: &Value) -> Option<String> {
    for key in ["detail", "error", "non_field_errors"] {
        if let Some(message) = body.get(key).and_then(first_message) {
            return Some(message);
        }
    }

    body.as_object()?
        .iter()
        .find_map(|(field, value)| first_message(value).map(|message| format!("{field}: {message}")))
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        Value::Object(map) => map.values().find_map(first_message),
        _ => None,
    }
}

async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| {
        warn!(error = %e, "Failed to parse response");
        ApiError::invalid_response(e.to_string())
    })
}

#[async_trait]
impl InventoryPort for InvenTreeClient {
    async fn server_info(&self) -> Result<ServerInfo, ApiError> {
        let info: ServerInfoResponse = self.get_json("", "API root").await?;
        debug!(server = %info.server, version = %info.version, "Connected to server");
        Ok(info.into())
    }

    async fn scan_barcode(&self, payload: &str) -> Result<BarcodeMatch, ApiError> {
        let url = self.url("barcode/");
        debug!(payload, "Scanning barcode");

        let request = self
            .client
            .post(&url)
            .json(&BarcodeRequest { barcode: payload });

        let body: Value = match self.send(request).await {
            Ok(response) => parse_json(response).await?,
            Err(ApiError::BadRequest { message }) => {
                return Err(ApiError::NoMatch(message));
            }
            Err(e) => return Err(e),
        };

        BarcodeMatch::from_response(&body)
    }

    async fn stock_item(&self, id: StockItemId) -> Result<StockItem, ApiError> {
        let path = format!("stock/{id}/?part_detail=true&location_detail=true");
        let response: StockItemResponse = self.get_json(&path, &format!("stock item {id}")).await?;
        Ok(response.into())
    }

    async fn stock_location(&self, id: LocationId) -> Result<StockLocation, ApiError> {
        let path = format!("stock/location/{id}/");
        let response: LocationResponse = self
            .get_json(&path, &format!("stock location {id}"))
            .await?;
        Ok(response.into())
    }

    async fn part(&self, id: PartId) -> Result<Part, ApiError> {
        let path = format!("part/{id}/");
        let response: PartResponse = self.get_json(&path, &format!("part {id}")).await?;
        Ok(response.into())
    }

    async fn transfer_stock(
        &self,
        lines: &[TransferLine],
        location: LocationId,
        notes: &str,
    ) -> Result<(), ApiError> {
        let url = self.url("stock/transfer/");
        let body = TransferRequest {
            items: lines
                .iter()
                .map(|line| TransferItem {
                    pk: line.item.as_u64(),
                    quantity: line.quantity,
                })
                .collect(),
            location: location.as_u64(),
            notes,
        };

        debug!(count = lines.len(), location = %location, "Posting stock transfer");
        self.send(self.client.post(&url).json(&body)).await?;
        Ok(())
    }

    async fn search_parts(&self, query: &str, limit: usize) -> Result<Vec<Part>, ApiError> {
        let url = self.url("part/");
        let limit = limit.to_string();
        let mut params = vec![("limit", limit.as_str())];
        if !query.is_empty() {
            params.push(("search", query));
        }

        debug!(query, "Searching parts");
        let response = self.send(self.client.get(&url).query(&params)).await?;
        let parts: PartListResponse = parse_json(response).await?;
        Ok(parts.into_parts())
    }
}
