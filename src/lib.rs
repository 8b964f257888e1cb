pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod shipping;
pub mod upstream;

pub use client::ShippingClient;
pub use config::ProxyConfig;
pub use error::{ProxyError, Result};
pub use logging::SharedLogger;
pub use server::{build_router, AppState};
