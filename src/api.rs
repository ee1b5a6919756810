//! API client for the kit distribution backend
//!
//! The panel talks to the backend exclusively through the [`Backend`] trait.
//! [`KitClient`] is the HTTP implementation; tests plug in an in-memory one.

use crate::config::PanelConfig;
use crate::kit::{KitCounts, KitItem};
use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Operations the panel needs from the backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/stock`
    async fn list_stock(&self) -> Result<StockListResponse, ApiError>;

    /// `POST /api/stock`
    async fn create_stock_item(&self, item: &NewStockItem) -> Result<Value, ApiError>;

    /// `PUT /api/stock/{item_name}`
    async fn update_stock(&self, item_name: &str, patch: &StockPatch) -> Result<Value, ApiError>;

    /// `DELETE /api/stock/{item_name}`
    async fn delete_stock_item(&self, item_name: &str) -> Result<Value, ApiError>;

    /// `GET /api/employees[?search=term]`
    async fn list_employees(&self, search: Option<&str>) -> Result<Vec<Employee>, ApiError>;

    /// `GET /api/employees/{id}`
    async fn get_employee(&self, employee_id: &str) -> Result<Employee, ApiError>;

    /// `POST /api/employees`
    async fn create_employee(&self, payload: &Map<String, Value>) -> Result<Value, ApiError>;

    /// `PUT /api/employees/{id}`
    async fn update_employee(
        &self,
        employee_id: &str,
        payload: &Map<String, Value>,
    ) -> Result<Value, ApiError>;

    /// `DELETE /api/employees/{id}`
    async fn delete_employee(&self, employee_id: &str) -> Result<Value, ApiError>;

    /// `GET /api/employees/stats`
    async fn employee_stats(&self) -> Result<EmployeeStats, ApiError>;
}

/// HTTP client for the backend
#[derive(Clone)]
pub struct KitClient {
    base_url: String,
    client: reqwest::Client,
}

impl KitClient {
    /// Create a client from panel configuration
    pub fn new(config: &PanelConfig) -> Result<Self, ApiError> {
        Self::with_url(config.api_url.clone(), config.request_timeout)
    }

    /// Create a client for a custom backend origin
    pub fn with_url(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    /// Build `{base}/api/{segments...}`, percent-encoding each segment
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?;
            path.pop_if_empty().push("api").extend(segments);
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<reqwest::Response, ApiError> {
        tracing::debug!(%method, %url, "backend request");
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Option<Value>, ApiError> {
    serde_json::to_value(value)
        .map(Some)
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait]
impl Backend for KitClient {
    async fn list_stock(&self) -> Result<StockListResponse, ApiError> {
        let url = self.endpoint(&["stock"])?;
        read_json(self.send(Method::GET, url, None).await?).await
    }

    async fn create_stock_item(&self, item: &NewStockItem) -> Result<Value, ApiError> {
        let url = self.endpoint(&["stock"])?;
        read_ack(self.send(Method::POST, url, to_body(item)?).await?).await
    }

    async fn update_stock(&self, item_name: &str, patch: &StockPatch) -> Result<Value, ApiError> {
        let url = self.endpoint(&["stock", item_name])?;
        read_ack(self.send(Method::PUT, url, to_body(patch)?).await?).await
    }

    async fn delete_stock_item(&self, item_name: &str) -> Result<Value, ApiError> {
        let url = self.endpoint(&["stock", item_name])?;
        read_ack(self.send(Method::DELETE, url, None).await?).await
    }

    async fn list_employees(&self, search: Option<&str>) -> Result<Vec<Employee>, ApiError> {
        let mut url = self.endpoint(&["employees"])?;
        if let Some(term) = search.filter(|t| !t.is_empty()) {
            url.query_pairs_mut().append_pair("search", term);
        }
        read_json(self.send(Method::GET, url, None).await?).await
    }

    async fn get_employee(&self, employee_id: &str) -> Result<Employee, ApiError> {
        let url = self.endpoint(&["employees", employee_id])?;
        read_json(self.send(Method::GET, url, None).await?).await
    }

    async fn create_employee(&self, payload: &Map<String, Value>) -> Result<Value, ApiError> {
        let url = self.endpoint(&["employees"])?;
        read_ack(self.send(Method::POST, url, to_body(payload)?).await?).await
    }

    async fn update_employee(
        &self,
        employee_id: &str,
        payload: &Map<String, Value>,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(&["employees", employee_id])?;
        read_ack(self.send(Method::PUT, url, to_body(payload)?).await?).await
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<Value, ApiError> {
        let url = self.endpoint(&["employees", employee_id])?;
        read_ack(self.send(Method::DELETE, url, None).await?).await
    }

    async fn employee_stats(&self) -> Result<EmployeeStats, ApiError> {
        let url = self.endpoint(&["employees", "stats"])?;
        read_json(self.send(Method::GET, url, None).await?).await
    }
}

/// Turn a non-2xx response into [`ApiError::Server`]
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    Err(ApiError::Server {
        status: status.as_u16(),
        message: parse_error_body(&body),
    })
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Mutation responses are only acknowledgements; an empty or non-JSON body
/// still counts as success
async fn read_ack(response: reqwest::Response) -> Result<Value, ApiError> {
    let response = check_status(response).await?;
    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    Ok(serde_json::from_slice(&body).unwrap_or(Value::Null))
}

/// Extract the `error` field of a backend error body
pub fn parse_error_body(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

/// API error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Message for the user: the backend's own message when it sent one
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

// Request/Response types

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

fn default_danger_level() -> i64 {
    30
}

/// A tracked stock item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub item_name: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default = "default_danger_level")]
    pub danger_level: i64,
}

impl StockItem {
    pub fn is_low(&self) -> bool {
        self.quantity <= self.danger_level
    }
}

/// Low stock entry as reported alongside the stock list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockItem {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(alias = "item_name")]
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default = "default_danger_level")]
    pub danger_level: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StockListResponse {
    #[serde(default)]
    pub stock_items: Vec<StockItem>,
    #[serde(default)]
    pub low_stock_items: Vec<LowStockItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStockItem {
    pub item_name: String,
    pub quantity: i64,
    pub danger_level: i64,
}

/// Partial stock update; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StockPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger_level: Option<i64>,
}

impl StockPatch {
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    pub fn danger_level(danger_level: i64) -> Self {
        Self {
            danger_level: Some(danger_level),
            ..Default::default()
        }
    }
}

/// Employee record with the kit they received
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub emergency_no: String,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default)]
    pub department_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub kit: KitCounts,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// T-shirts handed out per size
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TshirtSizes {
    #[serde(rename = "S", default)]
    pub s: u64,
    #[serde(rename = "M", default)]
    pub m: u64,
    #[serde(rename = "L", default)]
    pub l: u64,
    #[serde(rename = "XL", default)]
    pub xl: u64,
    #[serde(rename = "XXL", default)]
    pub xxl: u64,
    #[serde(rename = "XXXL", default)]
    pub xxxl: u64,
}

/// Aggregates shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmployeeStats {
    #[serde(default)]
    pub total_employees: u64,
    #[serde(default)]
    pub bags_distributed: u64,
    #[serde(default)]
    pub pens_distributed: u64,
    #[serde(default)]
    pub diaries_distributed: u64,
    #[serde(default)]
    pub bottles_distributed: u64,
    #[serde(default)]
    pub tshirt_sizes_distributed: TshirtSizes,
}

impl EmployeeStats {
    /// Distributed total for one kit item
    pub fn distributed(&self, item: KitItem) -> u64 {
        let sizes = &self.tshirt_sizes_distributed;
        match item {
            KitItem::Bag => self.bags_distributed,
            KitItem::Pen => self.pens_distributed,
            KitItem::Diary => self.diaries_distributed,
            KitItem::Bottle => self.bottles_distributed,
            KitItem::TshirtS => sizes.s,
            KitItem::TshirtM => sizes.m,
            KitItem::TshirtL => sizes.l,
            KitItem::TshirtXl => sizes.xl,
            KitItem::TshirtXxl => sizes.xxl,
            KitItem::TshirtXxxl => sizes.xxxl,
        }
    }
}
