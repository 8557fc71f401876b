//! Client for the product catalog REST API.

mod client;
mod error;
mod models;

pub use client::CatalogApi;
pub use client::CatalogClient;
pub use client::DEFAULT_BASE_URL;
pub use client::DEFAULT_LIST_TIMEOUT;
pub use error::CatalogError;
pub use models::Price;
pub use models::Product;
pub use models::ProductId;
pub use models::ProductPayload;
