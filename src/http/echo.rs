//! The echo handler.
//!
//! # Responsibilities
//! - Reflect inbound request fields back to the caller as JSON
//! - Decode query string and form-encoded bodies
//! - Parse JSON bodies permissively (malformed JSON yields null)
//! - Pass through the authenticated user injected by a fronting proxy
//!
//! # Design Decisions
//! - The handler never fails: any well-formed GET/POST gets 200
//! - Header names are echoed in HTTP title case, matching what clients
//!   typically sent on the wire
//! - Duplicate headers are collapsed by joining values with ", "

use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Request},
    response::{IntoResponse, Json},
};
use serde::Serialize;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;

const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Structured reflection of a single inbound request.
///
/// Built fresh per request and discarded once the response is sent.
#[derive(Debug, Serialize)]
pub struct EchoResponse {
    /// Request headers, title-cased, duplicates collapsed.
    pub headers: Map<String, Value>,

    /// Query-string arguments in parse order; a repeated key keeps the
    /// last value.
    pub args: Map<String, Value>,

    /// Form fields when the body is form-encoded; empty otherwise.
    pub form: Map<String, Value>,

    /// Body parsed as JSON when the content type indicates JSON and the
    /// body parses; null otherwise.
    pub json: Value,

    /// Authenticated principal injected by upstream infrastructure, if
    /// any.
    pub remote_user: Option<String>,
}

/// Handle `GET /` and `POST /`: reflect the request as JSON.
pub async fn echo_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> impl IntoResponse {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();

    let request_id = request_id(&parts.extensions).to_string();
    let method = parts.method.to_string();

    let args = decode_pairs(parts.uri.query().unwrap_or("").as_bytes());
    let headers = collect_headers(&parts.headers);
    let remote_user = parts
        .headers
        .get(state.config.auth.remote_user_header.as_str())
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    // The limit layer rejects oversized bodies before the handler runs;
    // a read failure here (client disconnect mid-body) echoes as empty.
    let body_bytes = axum::body::to_bytes(body, state.config.limits.max_body_bytes)
        .await
        .unwrap_or_else(|_| Bytes::new());

    let media_type = media_type(&parts.headers);
    let form = match media_type.as_deref() {
        Some(FORM_MEDIA_TYPE) => decode_pairs(&body_bytes),
        _ => Map::new(),
    };
    let json = if is_json_media_type(media_type.as_deref()) {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    } else {
        Value::Null
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        args = args.len(),
        form = form.len(),
        has_json = !json.is_null(),
        "Echoing request"
    );

    metrics::record_request(&method, 200, start_time);

    Json(EchoResponse {
        headers,
        args,
        form,
        json,
        remote_user,
    })
}

/// Decode `key=value&...` pairs into a JSON object, percent-decoding
/// keys and values. Insertion order is preserved; a repeated key keeps
/// the last value.
fn decode_pairs(input: &[u8]) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in form_urlencoded::parse(input) {
        map.insert(key.into_owned(), Value::String(value.into_owned()));
    }
    map
}

/// Collect request headers into a JSON object with title-cased names.
/// Duplicate headers are joined with ", "; non-UTF-8 values are replaced
/// lossily.
fn collect_headers(headers: &HeaderMap) -> Map<String, Value> {
    let mut map = Map::new();
    for (name, value) in headers.iter() {
        let name = title_case(name.as_str());
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match map.entry(name) {
            serde_json::map::Entry::Occupied(mut entry) => {
                if let Value::String(existing) = entry.get_mut() {
                    existing.push_str(", ");
                    existing.push_str(&value);
                }
            }
            serde_json::map::Entry::Vacant(entry) => {
                entry.insert(Value::String(value));
            }
        }
    }
    map
}

/// Render a lowercase header name in HTTP title case:
/// `x-request-id` → `X-Request-Id`.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_segment_start = true;
    for c in name.chars() {
        if at_segment_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_segment_start = c == '-';
    }
    out
}

/// Extract the media type from the Content-Type header, lowercased and
/// stripped of parameters.
fn media_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| {
            v.split(';')
                .next()
                .unwrap_or("")
                .trim()
                .to_ascii_lowercase()
        })
}

/// JSON media types: `application/json` and any `*/*+json` suffix
/// (e.g., `application/problem+json`).
fn is_json_media_type(media_type: Option<&str>) -> bool {
    match media_type {
        Some(mt) => mt == JSON_MEDIA_TYPE || mt.ends_with("+json"),
        None => false,
    }
}
