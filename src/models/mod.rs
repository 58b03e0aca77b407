pub mod config;
pub mod pool;
pub mod query;

pub use config::AppConfig;
pub use pool::{Bundle, FactoriesData, Factory, PoolData, PoolSnapshot, TokenInfo};
pub use query::{GraphQlError, GraphQlResponse, QueryEnvelope};
