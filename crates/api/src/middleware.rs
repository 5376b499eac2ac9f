use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, Uri},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const X_FUNCTIONS_KEY: &str = "x-functions-key";
pub const X_REQUEST_ID: &str = "x-request-id";

/// Query parameter that may carry the key instead of the header.
pub const CODE_PARAM: &str = "code";

#[derive(Clone)]
pub struct AuthState {
    /// `None` disables the check.
    pub function_key: Option<Arc<str>>,
}

impl AuthState {
    pub fn new(function_key: Option<String>) -> Self {
        Self {
            function_key: function_key.map(Arc::from),
        }
    }
}

/// Reject requests that do not present the configured invocation key.
pub async fn function_key_middleware(
    State(state): State<AuthState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(expected) = state.function_key.as_deref() {
        let presented = extract_key(req.headers(), req.uri());
        if presented.as_deref() != Some(expected) {
            tracing::warn!(path = %req.uri().path(), "rejected request without valid function key");
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    Ok(next.run(req).await)
}

fn extract_key(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    if let Some(value) = headers.get(X_FUNCTIONS_KEY) {
        let key = value.to_str().ok()?.trim();
        return (!key.is_empty()).then(|| key.to_string());
    }

    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == CODE_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Attach a request id and log one line per completed request.
///
/// A caller-supplied `x-request-id` is reused; otherwise a UUIDv7 is minted.
pub async fn request_tracing_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::now_v7().to_string());

    let header = HeaderValue::from_str(&request_id)
        .unwrap_or_else(|_| HeaderValue::from_static("invalid"));
    req.headers_mut().insert(X_REQUEST_ID, header.clone());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        let started = Instant::now();
        let mut res = next.run(req).await;
        tracing::info!(
            status = res.status().as_u16(),
            latency_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        res.headers_mut().insert(X_REQUEST_ID, header);
        res
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn key_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FUNCTIONS_KEY, HeaderValue::from_static(" abc "));
        assert_eq!(extract_key(&headers, &uri("/coaches")).as_deref(), Some("abc"));
    }

    #[test]
    fn key_from_code_query_is_url_decoded() {
        let headers = HeaderMap::new();
        let got = extract_key(&headers, &uri("/coaches?x=1&code=a%2Bb%3D%3D"));
        assert_eq!(got.as_deref(), Some("a+b=="));
    }

    #[test]
    fn header_takes_precedence_over_query() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FUNCTIONS_KEY, HeaderValue::from_static("from-header"));
        let got = extract_key(&headers, &uri("/coaches?code=from-query"));
        assert_eq!(got.as_deref(), Some("from-header"));
    }

    #[test]
    fn no_key_anywhere() {
        assert!(extract_key(&HeaderMap::new(), &uri("/coaches")).is_none());
        assert!(extract_key(&HeaderMap::new(), &uri("/coaches?code=")).is_none());
    }
}
