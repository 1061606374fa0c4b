//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::models::Hop;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error returned by the DNS collaborator.
///
/// The guard treats every lookup error as a potential SSRF vector and fails
/// closed; the message is surfaced for diagnostics only.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct LookupError(pub String);

/// Reasons the hostname guard refuses a target.
///
/// Both variants are fail-closed outcomes: a private address among the
/// resolved set and DNS uncertainty are treated identically as block-worthy.
#[derive(Error, Debug)]
pub enum GuardError {
    /// The host is, or resolves to, a private/reserved address.
    #[error("private or reserved address {address} for host '{host}'")]
    PrivateAddress {
        /// The guarded hostname.
        host: String,
        /// The offending address, as classified.
        address: String,
    },

    /// DNS resolution failed or returned no addresses.
    #[error("DNS resolution failed for '{host}': {reason}")]
    Resolution {
        /// The guarded hostname.
        host: String,
        /// Why the lookup is untrusted (error message or empty result).
        reason: String,
    },
}

/// Terminal failures of a redirect resolution.
///
/// Every failure that occurs after the first hop was attempted carries the
/// partial chain accumulated so far, giving callers full hop-level
/// diagnostics regardless of outcome. No failure is ever retried.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The input was not an absolute http/https URL. No hops were attempted.
    #[error("invalid input URL: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },

    /// The guard refused the current hop's host. The blocked URL is not part
    /// of the chain: the guard runs before hop recording.
    #[error("SSRF blocked: {source}")]
    SsrfBlocked {
        /// The guard's reason for refusing.
        #[source]
        source: GuardError,
        /// Hops completed before the block.
        chain: Vec<Hop>,
    },

    /// The overall wall-clock budget was exhausted before a terminal hop.
    #[error("overall time budget of {budget_ms} ms exceeded")]
    OverallTimeout {
        /// The configured budget in milliseconds.
        budget_ms: u64,
        /// Hops completed within the budget.
        chain: Vec<Hop>,
    },

    /// A single hop's request exceeded the per-request timeout and was
    /// cancelled. The chain ends with an errored hop for the attempt.
    #[error("request to {url} timed out")]
    RequestTimeout {
        /// The URL whose request was cancelled.
        url: String,
        /// Hops up to and including the timed-out attempt.
        chain: Vec<Hop>,
    },

    /// A connection or protocol failure on a single hop. The chain ends with
    /// an errored hop for the attempt.
    #[error("fetch failed for {url}: {reason}")]
    Transport {
        /// The URL whose request failed.
        url: String,
        /// Transport-level error description.
        reason: String,
        /// Hops up to and including the failed attempt.
        chain: Vec<Hop>,
    },
}

impl ResolveError {
    /// HTTP-equivalent status code for this failure.
    pub fn http_status(&self) -> u16 {
        match self {
            // Bad input and fail-closed guard refusals are the client's
            // problem; DNS uncertainty maps here too by policy.
            ResolveError::InvalidInput { .. } | ResolveError::SsrfBlocked { .. } => 400,
            ResolveError::OverallTimeout { .. } => 500,
            ResolveError::Transport { .. } => 502,
            ResolveError::RequestTimeout { .. } => 504,
        }
    }

    /// The partial chain accumulated before the failure (empty for invalid
    /// input, which never attempts a hop).
    pub fn chain_hops(&self) -> &[Hop] {
        match self {
            ResolveError::InvalidInput { .. } => &[],
            ResolveError::SsrfBlocked { chain, .. }
            | ResolveError::OverallTimeout { chain, .. }
            | ResolveError::RequestTimeout { chain, .. }
            | ResolveError::Transport { chain, .. } => chain,
        }
    }
}
