pub mod overlap;
pub mod plate;
pub mod requester;
pub mod session;
pub mod time;
pub mod workflow;

#[cfg(test)]
pub(crate) mod mock_transport;

pub use crate::domain::model::{RequestIntent, RequestOutcome};
pub use crate::domain::ports::{ConfigProvider, Transport};
pub use crate::utils::error::Result;
