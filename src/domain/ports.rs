use crate::domain::model::HttpMethod;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Wire-level request handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub cookies: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// `(username, password)` sent as an `Authorization: Basic` header.
    pub basic_auth: Option<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub cookies: HashMap<String, String>,
}

/// Connection-level failure: nothing usable came back from the server.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn max_connections_per_host(&self) -> usize;
    fn max_retries(&self) -> u32;
    fn backoff_unit(&self) -> Duration;
}
