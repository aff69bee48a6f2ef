use crate::domain::ports::{Transport, TransportError, TransportRequest, TransportResponse};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

type Reply = std::result::Result<TransportResponse, TransportError>;

/// In-memory transport: `/api/session` calls and every other call are served from separate
/// scripts. An empty session script issues `token-N`; an empty API script answers `200 {}`.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    session_replies: Mutex<VecDeque<Reply>>,
    api_replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<TransportRequest>>,
    session_calls: AtomicUsize,
    api_calls: AtomicUsize,
    session_delay: Option<Duration>,
    api_delay: Option<Duration>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_session_delay(mut self, delay: Duration) -> Self {
        self.session_delay = Some(delay);
        self
    }

    pub(crate) fn with_api_delay(mut self, delay: Duration) -> Self {
        self.api_delay = Some(delay);
        self
    }

    pub(crate) fn session_ok(cookie: &str) -> Reply {
        let mut cookies = HashMap::new();
        cookies.insert("session".to_string(), cookie.to_string());
        Ok(TransportResponse {
            status: 200,
            body: b"{}".to_vec(),
            cookies,
        })
    }

    pub(crate) fn json(status: u16, body: serde_json::Value) -> Reply {
        Ok(TransportResponse {
            status,
            body: body.to_string().into_bytes(),
            cookies: HashMap::new(),
        })
    }

    pub(crate) fn raw(status: u16, body: &str) -> Reply {
        Ok(TransportResponse {
            status,
            body: body.as_bytes().to_vec(),
            cookies: HashMap::new(),
        })
    }

    pub(crate) fn fail(cause: &str) -> Reply {
        Err(TransportError(cause.to_string()))
    }

    pub(crate) async fn push_session(&self, reply: Reply) {
        self.session_replies.lock().await.push_back(reply);
    }

    pub(crate) async fn push_api(&self, reply: Reply) {
        self.api_replies.lock().await.push_back(reply);
    }

    pub(crate) fn session_calls(&self) -> usize {
        self.session_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::SeqCst)
    }

    pub(crate) async fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().await.clone()
    }

    pub(crate) async fn api_requests(&self) -> Vec<TransportRequest> {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|r| !r.url.ends_with("/api/session"))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Reply {
        let is_session = request.url.ends_with("/api/session");
        self.requests.lock().await.push(request);

        if is_session {
            let n = self.session_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(delay) = self.session_delay {
                tokio::time::sleep(delay).await;
            }
            let scripted = self.session_replies.lock().await.pop_front();
            scripted.unwrap_or_else(|| Self::session_ok(&format!("token-{}", n)))
        } else {
            self.api_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.api_delay {
                tokio::time::sleep(delay).await;
            }
            let scripted = self.api_replies.lock().await.pop_front();
            scripted.unwrap_or_else(|| Self::json(200, serde_json::json!({})))
        }
    }
}
