// Application layer: the client facade and thin per-resource managers. Managers only shape
// request bodies and log outcomes; every backend call goes through `ResilientRequester::execute`.

pub mod client;
pub mod managers;

pub use client::ParkingClient;
