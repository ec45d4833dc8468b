//! Core library for co-authorship network construction and analysis

pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod community;
pub mod centrality;
pub mod report;
pub mod storage;
pub mod viz;

pub use anyhow::{Result, anyhow};
