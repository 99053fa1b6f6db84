// bridgewatch-api: Async Rust client for the bridget serial-bridge service

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::BridgetClient;
pub use error::Error;
pub use models::{Bridge, SerialPort};
pub use transport::{DEFAULT_TIMEOUT, TransportConfig};
