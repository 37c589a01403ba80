//! Linr - a command-line client for Linear issue tracking.
//!
//! This library provides the core functionality for the `lr` CLI tool.
//! The interesting part is the identifier-resolution subsystem in
//! [`resolve`]: users address entities by human-friendly tokens (issue
//! references like `ENG-42`, team keys, plain names) while the Linear
//! API only accepts opaque ids, so every command first resolves its
//! tokens to canonical ids. Everything else (argument parsing, query
//! text, output formatting) is thin glue around that subsystem.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod resolve;

/// Library-level error type for linr operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] api::ApiError),

    #[error(transparent)]
    Resolve(#[from] resolve::ResolveError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for linr operations.
pub type Result<T> = std::result::Result<T, Error>;
