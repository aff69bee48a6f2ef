pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliArgs, Command};

pub use crate::adapters::ReqwestTransport;
pub use crate::app::ParkingClient;
pub use crate::config::ClientConfig;
pub use crate::core::{
    overlap::OverlapGuard,
    plate::PlateNormalizer,
    requester::{ResilientRequester, RetryPolicy},
    session::SessionCache,
    time::TimeValidator,
    workflow::ReservationWorkflow,
};
pub use crate::domain::model::{
    Credentials, HttpMethod, LicensePlate, RequestIntent, RequestOutcome, Reservation, TimeRange,
    Timestamp,
};
pub use crate::utils::error::{ErrorCategory, ParkingError, Result};
