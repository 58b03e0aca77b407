// dashboard module - server-rendered pool and factory views

pub mod client;
pub mod format;
pub mod pages;
pub mod view;

pub use client::SubgraphService;
pub use view::{Factories, PoolDashboard, ViewState};
