use crate::core::session::{standard_headers, SessionCache, SESSION_COOKIE};
use crate::domain::model::{RequestIntent, RequestOutcome, SessionToken};
use crate::domain::ports::{ConfigProvider, Transport, TransportRequest, TransportResponse};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const MAX_BACKOFF_EXPONENT: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts spent on transport failures. The single 401 refresh is not counted here.
    pub max_retries: u32,
    /// Scale of the backoff window; one second reproduces `[2^n, 2^(n+1))` seconds.
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            max_retries: config.max_retries(),
            backoff_unit: config.backoff_unit(),
        }
    }

    /// A single attempt; a transport error is reported as-is instead of as exhaustion.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 1,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    /// Uniformly random delay in `[2^attempt, 2^(attempt+1))` backoff units.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(MAX_BACKOFF_EXPONENT) as i32;
        let low = 2f64.powi(exponent);
        let high = 2f64.powi(exponent + 1);
        let factor = rand::thread_rng().gen_range(low..high);
        self.backoff_unit.mul_f64(factor)
    }
}

/// Decodes a response body: `{}` for 204, parsed JSON otherwise, or an error payload when the
/// body is not JSON. Never fails.
pub fn decode_body(response: &TransportResponse) -> serde_json::Value {
    if response.status == 204 {
        return serde_json::json!({});
    }
    match serde_json::from_slice(&response.body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("JSON decode error for status {}: {}", response.status, e);
            serde_json::json!({
                "error": "Invalid JSON response",
                "status": response.status,
            })
        }
    }
}

/// Single entry point for backend calls: session handling, one re-authentication on 401 and
/// bounded retries with jittered exponential backoff on transport failures.
pub struct ResilientRequester {
    session: Arc<SessionCache>,
    transport: Arc<dyn Transport>,
    base_url: String,
    policy: RetryPolicy,
}

impl ResilientRequester {
    pub fn new(
        session: Arc<SessionCache>,
        transport: Arc<dyn Transport>,
        base_url: &str,
        policy: RetryPolicy,
    ) -> Self {
        tracing::debug!(
            "ResilientRequester initialized with max_retries={}",
            policy.max_retries
        );
        Self {
            session,
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            policy,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn session(&self) -> &Arc<SessionCache> {
        &self.session
    }

    pub async fn execute(&self, intent: &RequestIntent) -> RequestOutcome {
        self.execute_with_cancel(intent, &CancellationToken::new())
            .await
    }

    pub async fn execute_with_cancel(
        &self,
        intent: &RequestIntent,
        cancel: &CancellationToken,
    ) -> RequestOutcome {
        let mut attempt: u32 = 0;
        let mut auth_retry_used = false;
        let mut last_cause: Option<String> = None;

        while attempt < self.policy.max_retries {
            if cancel.is_cancelled() {
                return self.cancelled(intent);
            }

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => return self.cancelled(intent),
                fetched = self.session.get_token() => fetched,
            };
            let token = match fetched {
                Ok(token) => token,
                Err(e) => {
                    tracing::error!("No valid session for {}: {}", intent.path, e);
                    return RequestOutcome::NoSession {
                        reason: e.to_string(),
                    };
                }
            };

            tracing::debug!(
                "Attempt {} for {} request to {}",
                attempt + 1,
                intent.method,
                intent.path
            );

            let request = self.build_request(intent, &token);
            let sent = tokio::select! {
                biased;
                _ = cancel.cancelled() => return self.cancelled(intent),
                sent = self.transport.send(request) => sent,
            };

            match sent {
                Ok(response) if response.status == 401 && !auth_retry_used => {
                    auth_retry_used = true;
                    tracing::warn!(
                        "Session expired on {} (attempt {}); refreshing",
                        intent.path,
                        attempt + 1
                    );
                    self.session.invalidate().await;
                }
                Ok(response) => return self.classify(intent, &response),
                Err(e) => {
                    tracing::error!(
                        "Transport error for {} (attempt {}): {}",
                        intent.path,
                        attempt + 1,
                        e
                    );
                    attempt += 1;
                    last_cause = Some(e.0);

                    if attempt < self.policy.max_retries {
                        let delay = self.policy.backoff_delay(attempt);
                        tracing::debug!(
                            "Retrying {} in {:.2?} (attempt {})",
                            intent.path,
                            delay,
                            attempt + 1
                        );
                        tokio::select! {
                            biased;
                            _ = cancel.cancelled() => return self.cancelled(intent),
                            _ = tokio::time::sleep(delay) => {}
                        }
                    }
                }
            }
        }

        if self.policy.max_retries == 1 {
            if let Some(cause) = last_cause {
                return RequestOutcome::TransportFailure { cause };
            }
        }

        tracing::error!("Max retries reached for {}", intent.path);
        RequestOutcome::ExhaustedRetries { last_cause }
    }

    fn build_request(&self, intent: &RequestIntent, token: &SessionToken) -> TransportRequest {
        let mut headers = standard_headers();
        for (name, value) in &intent.extra_headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }

        TransportRequest {
            method: intent.method,
            url: format!("{}{}", self.base_url, intent.path),
            headers,
            cookies: vec![(
                SESSION_COOKIE.to_string(),
                token.cookie_value().to_string(),
            )],
            body: intent.body.clone(),
            basic_auth: None,
        }
    }

    fn classify(&self, intent: &RequestIntent, response: &TransportResponse) -> RequestOutcome {
        let body = decode_body(response);
        tracing::debug!(
            "Received status {} for {} {}",
            response.status,
            intent.method,
            intent.path
        );

        match response.status {
            200 | 204 => {
                tracing::info!("{} {} succeeded", intent.method, intent.path);
                RequestOutcome::Success {
                    status: response.status,
                    body,
                }
            }
            401 => {
                tracing::error!(
                    "{} {} still unauthorized after session refresh",
                    intent.method,
                    intent.path
                );
                RequestOutcome::AuthExpired { body }
            }
            status => {
                tracing::error!(
                    "{} {} failed with status {}: {}",
                    intent.method,
                    intent.path,
                    status,
                    body
                );
                RequestOutcome::Rejected { status, body }
            }
        }
    }

    fn cancelled(&self, intent: &RequestIntent) -> RequestOutcome {
        tracing::warn!("{} {} cancelled", intent.method, intent.path);
        RequestOutcome::Cancelled
    }
}
