use crate::domain::model::{Credentials, HttpMethod, SessionToken};
use crate::domain::ports::{Transport, TransportRequest};
use crate::utils::error::{ParkingError, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub const SESSION_PATH: &str = "/api/session";
pub const SESSION_COOKIE: &str = "session";

/// Headers every backend call carries, session exchange included.
pub fn standard_headers() -> Vec<(String, String)> {
    vec![
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
        ("X-Requested-With".to_string(), "angular".to_string()),
    ]
}

/// Holds at most one session token and refreshes it through a basic-auth exchange.
///
/// Readers with a cached token only take the read side of `token`. A missing token is fetched
/// under `refresh`, so concurrent callers wait for a single exchange and share its result.
pub struct SessionCache {
    transport: Arc<dyn Transport>,
    session_url: String,
    credentials: Credentials,
    token: RwLock<Option<SessionToken>>,
    refresh: Mutex<()>,
}

impl SessionCache {
    pub fn new(transport: Arc<dyn Transport>, base_url: &str, credentials: Credentials) -> Self {
        Self {
            transport,
            session_url: format!("{}{}", base_url.trim_end_matches('/'), SESSION_PATH),
            credentials,
            token: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub async fn get_token(&self) -> Result<SessionToken> {
        if let Some(token) = self.cached().await {
            return Ok(token);
        }

        let _refresh = self.refresh.lock().await;

        // Another caller may have finished the exchange while we waited for the lock.
        if let Some(token) = self.cached().await {
            tracing::debug!("Reusing session acquired by a concurrent caller");
            return Ok(token);
        }

        let token = self.authenticate().await?;
        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    pub async fn invalidate(&self) {
        if self.token.write().await.take().is_some() {
            tracing::debug!("Cached session dropped");
        }
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    async fn cached(&self) -> Option<SessionToken> {
        self.token.read().await.clone()
    }

    async fn authenticate(&self) -> Result<SessionToken> {
        tracing::info!("Requesting new session from {}", self.session_url);

        let request = TransportRequest {
            method: HttpMethod::Get,
            url: self.session_url.clone(),
            headers: standard_headers(),
            cookies: Vec::new(),
            body: None,
            basic_auth: Some((
                self.credentials.username.clone(),
                self.credentials.password.clone(),
            )),
        };

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::error!("Session request to {} failed: {}", self.session_url, e);
            ParkingError::AuthFailed {
                reason: format!("session request failed: {}", e),
            }
        })?;

        if !(200..300).contains(&response.status) {
            tracing::error!(
                "Session request failed with status {} for URL: {}",
                response.status,
                self.session_url
            );
            return Err(ParkingError::AuthFailed {
                reason: format!("session endpoint returned status {}", response.status),
            });
        }

        match response.cookies.get(SESSION_COOKIE) {
            Some(value) if !value.is_empty() => {
                tracing::info!("New session acquired");
                Ok(SessionToken::new(value.clone()))
            }
            _ => {
                tracing::error!("No session cookie found in response from {}", self.session_url);
                Err(ParkingError::AuthFailed {
                    reason: "no session cookie in response".to_string(),
                })
            }
        }
    }
}
