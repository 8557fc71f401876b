//! HTTP client for the product catalog backend.
//!
//! Endpoints (relative to the configured base URL):
//! - `GET /products` list, bounded by the list timeout
//! - `POST /products` create, answers `{ "product": ... }`
//! - `PATCH /products/{id}` update, answers `{ "product": ... }`
//! - `DELETE /products/{id}` delete, body ignored

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::CatalogError;
use crate::models::{Product, ProductEnvelope, ProductId, ProductPayload};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Upper bound on the list request.
pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(5);

const PRODUCTS_ENDPOINT: &str = "/products";

/// Operations the catalog UI needs from a backend.
///
/// `CatalogClient` talks HTTP; tests substitute in-memory fakes.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch every product in backend order.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError>;

    /// Create a product and return the backend's representation of it.
    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, CatalogError>;

    /// Update the product with `id` and return its new representation.
    async fn update_product(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, CatalogError>;

    /// Delete the product with `id`.
    async fn delete_product(&self, id: &ProductId) -> Result<(), CatalogError>;
}

/// reqwest-backed implementation of [`CatalogApi`].
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    list_timeout: Duration,
}

impl CatalogClient {
    /// Create a client for `base_url` with the default list timeout.
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Self::with_list_timeout(base_url, DEFAULT_LIST_TIMEOUT)
    }

    /// Create a client with an explicit list timeout.
    pub fn with_list_timeout(base_url: &str, list_timeout: Duration) -> Result<Self, CatalogError> {
        let parsed =
            Url::parse(base_url).map_err(|e| CatalogError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidUrl(format!(
                "{base_url}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            list_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_timeout(&self) -> Duration {
        self.list_timeout
    }

    fn products_url(&self) -> String {
        format!("{}{}", self.base_url, PRODUCTS_ENDPOINT)
    }

    fn product_url(&self, id: &ProductId) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            PRODUCTS_ENDPOINT,
            urlencoding::encode(id.as_str())
        )
    }
}

/// Fail on non-2xx, otherwise decode the body as `T`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CatalogError> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(CatalogError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.products_url();
        tracing::debug!(%url, timeout_ms = self.list_timeout.as_millis() as u64, "listing products");

        let response = self
            .client
            .get(&url)
            .timeout(self.list_timeout)
            .send()
            .await?;
        let products: Vec<Product> = read_json(response).await?;

        tracing::debug!(count = products.len(), "products listed");
        Ok(products)
    }

    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, CatalogError> {
        let url = self.products_url();
        tracing::debug!(%url, name = %payload.name, "creating product");

        let response = self.client.post(&url).json(payload).send().await?;
        let envelope: ProductEnvelope = read_json(response).await?;
        Ok(envelope.product)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, CatalogError> {
        let url = self.product_url(id);
        tracing::debug!(%url, %id, "updating product");

        let response = self.client.patch(&url).json(payload).send().await?;
        let envelope: ProductEnvelope = read_json(response).await?;
        Ok(envelope.product)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), CatalogError> {
        let url = self.product_url(id);
        tracing::debug!(%url, %id, "deleting product");

        let response = self.client.delete(&url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
