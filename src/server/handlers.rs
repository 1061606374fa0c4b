//! Request handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error_handling::ResolveError;
use crate::fetch::RedirectResolver;
use crate::models::{Hop, Note, Resolution};

#[derive(Debug, Deserialize)]
pub(super) struct ResolveParams {
    url: Option<String>,
}

/// Body for a resolution that produced a final answer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveOk<'a> {
    ok: bool,
    final_url: &'a str,
    final_status: u16,
    chain: &'a [Hop],
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a Note>,
}

/// Body for a hard failure; the partial chain is included when hops were
/// attempted.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveFail<'a> {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    chain: Option<&'a [Hop]>,
}

pub(super) async fn resolve_handler(
    State(resolver): State<Arc<RedirectResolver>>,
    Query(params): Query<ResolveParams>,
) -> Response {
    let Some(url) = params.url else {
        let body = ResolveFail {
            ok: false,
            error: "missing required query parameter 'url'".to_string(),
            chain: None,
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    match resolver.resolve(&url).await {
        Ok(resolution) => success_response(&resolution),
        Err(err) => failure_response(&err),
    }
}

fn success_response(resolution: &Resolution) -> Response {
    info!(
        "resolved to {} ({}) in {} hop(s)",
        resolution.final_url,
        resolution.final_status,
        resolution.chain.len()
    );
    let body = ResolveOk {
        ok: true,
        final_url: &resolution.final_url,
        final_status: resolution.final_status,
        chain: &resolution.chain,
        note: resolution.note.as_ref(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

fn failure_response(err: &ResolveError) -> Response {
    let status = StatusCode::from_u16(err.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let hops = err.chain_hops();
    let body = ResolveFail {
        ok: false,
        error: err.to_string(),
        chain: if hops.is_empty() { None } else { Some(hops) },
    };
    (status, Json(body)).into_response()
}

pub(super) async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
