//! The per-hop resolution state machine.

use std::time::{Duration, Instant};

use log::{debug, warn};
use reqwest::Url;
use tokio::time::timeout;

use crate::config::{MAX_REDIRECT_HOPS, MAX_TOTAL_TIME_MS, MAX_URL_LENGTH, REQUEST_TIMEOUT_MS};
use crate::error_handling::ResolveError;
use crate::models::{Hop, Note, Resolution};
use crate::security::HostnameGuard;

/// Hop and time limits for a resolution.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum number of hops attempted per resolution.
    pub max_hops: usize,
    /// Per-request timeout. The in-flight request is cancelled when it fires.
    pub request_timeout: Duration,
    /// Wall-clock budget for the whole chain, checked before each hop.
    pub total_budget: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_hops: MAX_REDIRECT_HOPS,
            request_timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
            total_budget: Duration::from_millis(MAX_TOTAL_TIME_MS),
        }
    }
}

/// Follows a redirect chain one guarded hop at a time.
///
/// The client must have automatic redirects disabled; the resolver records
/// each response itself and consults the guard before every hop, so a chain
/// cannot be used to pivot onto a private address after a public first hop.
pub struct RedirectResolver {
    client: reqwest::Client,
    guard: HostnameGuard,
    limits: Limits,
}

impl RedirectResolver {
    /// Builds a resolver from a redirect-disabled client, a guard, and limits.
    pub fn new(client: reqwest::Client, guard: HostnameGuard, limits: Limits) -> Self {
        Self {
            client,
            guard,
            limits,
        }
    }

    /// Resolves the redirect chain starting at `input`.
    ///
    /// Returns a [`Resolution`] for every run that produced a final answer,
    /// including early stops for loops, malformed redirect targets, and the
    /// hop cap (those carry an advisory [`Note`]). Hard failures are returned
    /// as [`ResolveError`] with the partial chain attached.
    pub async fn resolve(&self, input: &str) -> Result<Resolution, ResolveError> {
        let mut current = validate_input(input)?;
        let mut chain: Vec<Hop> = Vec::new();
        let started = Instant::now();

        debug!("resolving redirect chain for {current}");

        for _ in 0..self.limits.max_hops {
            if started.elapsed() >= self.limits.total_budget {
                warn!("overall budget exhausted after {} hop(s)", chain.len());
                return Err(ResolveError::OverallTimeout {
                    budget_ms: self.limits.total_budget.as_millis() as u64,
                    chain,
                });
            }

            // Guard runs before the hop is recorded, so a blocked target
            // never appears in the chain.
            let host = current
                .host_str()
                .ok_or_else(|| ResolveError::InvalidInput {
                    reason: "URL has no host".to_string(),
                })?
                .to_string();
            if let Err(source) = self.guard.ensure_public(&host).await {
                return Err(ResolveError::SsrfBlocked { source, chain });
            }

            let response =
                match timeout(self.limits.request_timeout, self.client.get(current.as_str()).send())
                    .await
                {
                    Err(_) => {
                        chain.push(Hop::errored(current.as_str(), "request timed out"));
                        return Err(ResolveError::RequestTimeout {
                            url: current.to_string(),
                            chain,
                        });
                    }
                    Ok(Err(e)) if e.is_timeout() => {
                        chain.push(Hop::errored(current.as_str(), "request timed out"));
                        return Err(ResolveError::RequestTimeout {
                            url: current.to_string(),
                            chain,
                        });
                    }
                    Ok(Err(e)) => {
                        let reason = e.to_string();
                        chain.push(Hop::errored(current.as_str(), &reason));
                        return Err(ResolveError::Transport {
                            url: current.to_string(),
                            reason,
                            chain,
                        });
                    }
                    Ok(Ok(response)) => response,
                };

            let status = response.status().as_u16();
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            debug!("hop {}: {current} -> {status}", chain.len() + 1);
            chain.push(Hop {
                url: current.to_string(),
                status: Some(status),
                error: None,
                location: location.clone(),
            });

            let loc = match location {
                Some(loc) if (300..400).contains(&status) => loc,
                // A non-redirect status, or a redirect without Location, is
                // the final answer.
                _ => {
                    return Ok(Resolution {
                        final_url: current.to_string(),
                        final_status: status,
                        chain,
                        note: None,
                    });
                }
            };

            // A target that joined but is not a fetchable http(s) URL
            // (mailto:, file:, missing host) is the same soft stop as one
            // that failed to join.
            let next = match current.join(&loc) {
                Ok(next)
                    if matches!(next.scheme(), "http" | "https")
                        && next.host_str().is_some() =>
                {
                    next
                }
                Ok(next) => {
                    warn!("unfollowable Location '{loc}' from {current}: resolved to {next}");
                    return Ok(Resolution {
                        final_url: current.to_string(),
                        final_status: status,
                        chain,
                        note: Some(Note::MalformedLocation),
                    });
                }
                Err(e) => {
                    warn!("unresolvable Location '{loc}' from {current}: {e}");
                    return Ok(Resolution {
                        final_url: current.to_string(),
                        final_status: status,
                        chain,
                        note: Some(Note::MalformedLocation),
                    });
                }
            };

            // The next target is compared against every URL already visited,
            // not just the previous one, to catch longer cycles.
            if chain.iter().any(|hop| hop.url == next.as_str()) {
                warn!("redirect loop back to {next} detected");
                return Ok(Resolution {
                    final_url: next.to_string(),
                    final_status: status,
                    chain,
                    note: Some(Note::LoopDetected),
                });
            }

            current = next;
        }

        // Still being redirected when the cap ran out; the last response is
        // the best answer available.
        let (final_url, final_status) = match chain.last() {
            Some(last) => (last.url.clone(), last.status.unwrap_or(0)),
            None => {
                return Err(ResolveError::OverallTimeout {
                    budget_ms: self.limits.total_budget.as_millis() as u64,
                    chain,
                });
            }
        };
        warn!("hop cap of {} reached for {final_url}", self.limits.max_hops);
        Ok(Resolution {
            final_url,
            final_status,
            chain,
            note: Some(Note::HopCapReached(self.limits.max_hops)),
        })
    }
}

/// Validates the caller-supplied URL before any network activity.
fn validate_input(input: &str) -> Result<Url, ResolveError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::InvalidInput {
            reason: "URL is empty".to_string(),
        });
    }
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(ResolveError::InvalidInput {
            reason: format!("URL exceeds {MAX_URL_LENGTH} characters"),
        });
    }
    let lower = trimmed.to_ascii_lowercase();
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        return Err(ResolveError::InvalidInput {
            reason: "URL must be absolute with an http or https scheme".to_string(),
        });
    }
    let url = Url::parse(trimmed).map_err(|e| ResolveError::InvalidInput {
        reason: format!("URL failed to parse: {e}"),
    })?;
    if url.host_str().is_none() {
        return Err(ResolveError::InvalidInput {
            reason: "URL has no host".to_string(),
        });
    }
    Ok(url)
}
