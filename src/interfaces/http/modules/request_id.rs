//! `X-Request-Id` correlation
//!
//! An incoming id is reused, otherwise a UUID v4 is minted. The id is put in
//! request extensions, wraps the handler in a tracing span and is echoed on
//! the response.

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied id that is accepted as-is
const MAX_INCOMING_LEN: usize = 128;

#[derive(Clone, Debug)]
pub struct RequestId(pub String);

pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= MAX_INCOMING_LEN)
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %request.method(),
        uri = %request.uri(),
    );
    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Extension, Router};
    use tower::Service;

    async fn echo(Extension(RequestId(id)): Extension<RequestId>) -> String {
        id
    }

    async fn call(header: Option<&str>) -> Response {
        let mut svc = Router::new()
            .route("/", get(echo))
            .layer(middleware::from_fn(request_id_middleware))
            .into_service();
        let mut req = Request::builder().uri("/");
        if let Some(h) = header {
            req = req.header(REQUEST_ID_HEADER, h);
        }
        svc.call(req.body(Body::empty()).unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn reuses_incoming_id() {
        let resp = call(Some("abc-123")).await;
        assert_eq!(resp.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn mints_uuid_when_absent() {
        let resp = call(None).await;
        let id = resp.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
