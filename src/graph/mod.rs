//! Co-authorship graph representation and algorithms

pub mod network;
pub mod builder;
pub mod algorithms;

pub use network::CoauthorGraph;
