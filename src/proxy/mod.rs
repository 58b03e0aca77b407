// proxy module - authenticated subgraph relay

pub mod config;
pub mod handlers; // API endpoint handlers
pub mod middleware; // Axum middleware
pub mod server;
pub mod stats;
pub mod upstream; // Upstream client

pub use config::ProxyConfig;
pub use server::AxumServer;
