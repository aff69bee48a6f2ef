use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParkingError {
    #[error("Malformed timestamp: '{value}'")]
    MalformedTimestamp { value: String },

    #[error("Invalid license plate: '{value}'")]
    InvalidPlate { value: String },

    #[error("Invalid time range: end '{end}' must be after start '{start}'")]
    InvalidTimeRange { start: String, end: String },

    #[error("Start time '{start}' is not in the future")]
    PastStart { start: String },

    #[error("Reservation for {plate} between {start} and {end} overlaps an existing one")]
    OverlappingReservation {
        plate: String,
        start: String,
        end: String,
    },

    #[error("Authentication failed: {reason}")]
    AuthFailed { reason: String },

    #[error("No session available for {path}")]
    NoSession { path: String },

    #[error("Session expired again after re-authentication for {path}")]
    AuthExpired {
        path: String,
        body: serde_json::Value,
    },

    #[error("Transport failure for {path}: {cause}")]
    TransportFailure { path: String, cause: String },

    #[error(
        "Max retries reached for {path}: {}",
        .last_cause.as_deref().unwrap_or("no transport error recorded")
    )]
    ExhaustedRetries {
        path: String,
        last_cause: Option<String>,
    },

    #[error("Request to {path} rejected with status {status}")]
    Rejected {
        path: String,
        status: u16,
        body: serde_json::Value,
    },

    #[error("Request to {path} was cancelled")]
    Cancelled { path: String },

    #[error("Reservation {id} not found")]
    ReservationNotFound { id: String },

    #[error("Field '{field}' missing from response")]
    MissingField { field: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied bad input; never retried.
    Input,
    Session,
    Network,
    Backend,
    Configuration,
    Internal,
}

impl ParkingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ParkingError::MalformedTimestamp { .. }
            | ParkingError::InvalidPlate { .. }
            | ParkingError::InvalidTimeRange { .. }
            | ParkingError::PastStart { .. }
            | ParkingError::OverlappingReservation { .. } => ErrorCategory::Input,
            ParkingError::AuthFailed { .. }
            | ParkingError::NoSession { .. }
            | ParkingError::AuthExpired { .. } => ErrorCategory::Session,
            ParkingError::TransportFailure { .. }
            | ParkingError::ExhaustedRetries { .. }
            | ParkingError::Cancelled { .. }
            | ParkingError::ApiError(_) => ErrorCategory::Network,
            ParkingError::Rejected { .. }
            | ParkingError::ReservationNotFound { .. }
            | ParkingError::MissingField { .. } => ErrorCategory::Backend,
            ParkingError::ConfigError { .. }
            | ParkingError::MissingConfigError { .. }
            | ParkingError::InvalidConfigValueError { .. }
            | ParkingError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ParkingError::IoError(_) | ParkingError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ParkingError::TransportFailure { .. } | ParkingError::ApiError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ParkingError>;
