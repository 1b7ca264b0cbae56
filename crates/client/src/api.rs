//! Typed access to the JSON API.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_core::{ProductId, SupplierId};
use stockroom_parties::{CreateSupplier, Supplier, UpdateSupplier};
use stockroom_products::{CreateProduct, Product, UpdateProduct};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("API error {status} ({kind}): {message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    kind: String,
}

#[derive(Debug, Deserialize)]
pub struct Deleted {
    pub deleted: u64,
}

/// Client for the inventory API rooted at `base_url` (e.g. `http://localhost:3000`).
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check connectivity by hitting the health endpoint.
    pub async fn check_connectivity(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        matches!(self.http.get(&url).send().await, Ok(resp) if resp.status().is_success())
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        self.send::<(), _>(Method::GET, "/api/products", None).await
    }

    pub async fn list_low_stock(&self) -> Result<Vec<Product>, ClientError> {
        self.send::<(), _>(Method::GET, "/api/products/low-stock", None).await
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, ClientError> {
        self.send::<(), _>(Method::GET, &format!("/api/products/{id}"), None).await
    }

    pub async fn create_product(&self, cmd: &CreateProduct) -> Result<Product, ClientError> {
        self.send(Method::POST, "/api/products", Some(cmd)).await
    }

    pub async fn update_product(&self, id: ProductId, cmd: &UpdateProduct) -> Result<Product, ClientError> {
        self.send(Method::PUT, &format!("/api/products/{id}"), Some(cmd)).await
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<u64, ClientError> {
        let body: Deleted = self
            .send::<(), _>(Method::DELETE, &format!("/api/products/{id}"), None)
            .await?;
        Ok(body.deleted)
    }

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, ClientError> {
        self.send::<(), _>(Method::GET, "/api/suppliers", None).await
    }

    pub async fn get_supplier(&self, id: SupplierId) -> Result<Supplier, ClientError> {
        self.send::<(), _>(Method::GET, &format!("/api/suppliers/{id}"), None).await
    }

    pub async fn create_supplier(&self, cmd: &CreateSupplier) -> Result<Supplier, ClientError> {
        self.send(Method::POST, "/api/suppliers", Some(cmd)).await
    }

    pub async fn update_supplier(&self, id: SupplierId, cmd: &UpdateSupplier) -> Result<Supplier, ClientError> {
        self.send(Method::PUT, &format!("/api/suppliers/{id}"), Some(cmd)).await
    }

    pub async fn delete_supplier(&self, id: SupplierId) -> Result<u64, ClientError> {
        let body: Deleted = self
            .send::<(), _>(Method::DELETE, &format!("/api/suppliers/{id}"), None)
            .await?;
        Ok(body.deleted)
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method.clone(), &url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let text = resp.text().await?;
        let (kind, message) = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => (body.kind, body.error),
            Err(_) => ("unknown".to_string(), text),
        };
        tracing::debug!(%method, path, status = status.as_u16(), %kind, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            kind,
            message,
        })
    }
}
