//! Presswork - a local-first CRM core for print shops.
//!
//! This library provides the core functionality for the `pw` CLI tool:
//! clients, orders, tasks, bids, calendar events, and notes, persisted as
//! JSON records in a local key-value store, with the cross-entity
//! synchronization rules that keep the collections consistent as edits
//! occur (order status fanning out to tasks, task completion rolling up
//! into orders, bid acceptance spawning an order and a kickoff task).

pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod store;

/// Library-level error type for presswork operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not initialized: run `pw system init` first")]
    NotInitialized,

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for presswork operations.
pub type Result<T> = std::result::Result<T, Error>;
