// Handlers module - API endpoint handlers

pub mod subgraph;

pub use subgraph::SubgraphTarget;
