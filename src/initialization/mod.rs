//! Process initialization.
//!
//! Builds the shared resources the service runs on:
//! - Logger (plain or JSON format)
//! - HTTP client with automatic redirects disabled
//! - DNS resolver
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;
mod resolver;

// Re-export public API
pub use client::init_redirect_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
