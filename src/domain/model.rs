use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Timestamp = DateTime<FixedOffset>;

/// Login pair exchanged once for a session cookie.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque value of the backend `session` cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub(crate) fn cookie_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical call against the backend, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestIntent {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub extra_headers: Vec<(String, String)>,
}

impl RequestIntent {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            extra_headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(HttpMethod::Patch, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }
}

/// Result of [`crate::core::requester::ResilientRequester::execute`]. Exactly one tag per call.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success {
        status: u16,
        body: serde_json::Value,
    },
    /// 401 observed again after the one re-authentication this call is allowed.
    AuthExpired { body: serde_json::Value },
    /// Any status other than 200/204.
    Rejected {
        status: u16,
        body: serde_json::Value,
    },
    /// Last transport error seen; the attempt budget is not yet spent.
    TransportFailure { cause: String },
    ExhaustedRetries { last_cause: Option<String> },
    NoSession { reason: String },
    Cancelled,
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestOutcome::Success { status, .. } | RequestOutcome::Rejected { status, .. } => {
                Some(*status)
            }
            RequestOutcome::AuthExpired { .. } => Some(401),
            _ => None,
        }
    }

    /// Converts the outcome into the crate error taxonomy; `path` names the endpoint in errors.
    pub fn into_result(self, path: &str) -> crate::utils::error::Result<serde_json::Value> {
        use crate::utils::error::ParkingError;

        match self {
            RequestOutcome::Success { body, .. } => Ok(body),
            RequestOutcome::AuthExpired { body } => Err(ParkingError::AuthExpired {
                path: path.to_string(),
                body,
            }),
            RequestOutcome::Rejected { status, body } => Err(ParkingError::Rejected {
                path: path.to_string(),
                status,
                body,
            }),
            RequestOutcome::TransportFailure { cause } => Err(ParkingError::TransportFailure {
                path: path.to_string(),
                cause,
            }),
            RequestOutcome::ExhaustedRetries { last_cause } => Err(ParkingError::ExhaustedRetries {
                path: path.to_string(),
                last_cause,
            }),
            RequestOutcome::NoSession { .. } => Err(ParkingError::NoSession {
                path: path.to_string(),
            }),
            RequestOutcome::Cancelled => Err(ParkingError::Cancelled {
                path: path.to_string(),
            }),
        }
    }
}

/// Validated `{start, end}` pair with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    /// Returns `None` unless `end` is strictly later than `start`.
    pub fn new(start: Timestamp, end: Timestamp) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Open-interval intersection: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Normalized plate matching `^[A-Z0-9]{1,12}$`; only built by
/// [`crate::core::plate::PlateNormalizer::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LicensePlate(String);

impl LicensePlate {
    pub(crate) fn from_normalized(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicensePlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backend reservation record. Omitted and `null` fields both deserialize as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub license_plate: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}
