//! Meguru - Incremental Knowledge Map
//!
//! A knowledge graph grown one focus expansion at a time from untrusted
//! generator proposals, with deterministic incremental layout.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod generator;
pub mod layout;
pub mod models;
pub mod render;
pub mod sanitize;
pub mod services;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
