//! JSON body extractor that also runs `validator` rules
//!
//! Malformed JSON is a 400; a well-formed body that breaks a field rule is a
//! 422 whose error message lists every failing field.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// `Json<T>` plus `T::validate()`
pub struct ValidatedJson<T>(pub T);

pub enum BodyRejection {
    Malformed(JsonRejection),
    Invalid(ValidationErrors),
}

/// `field: message` pairs joined with `; `, sorted by field name
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let parts: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();

    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Malformed(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {}", rejection.body_text()),
            ),
            Self::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, describe(&errors)),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(BodyRejection::Malformed)?;
        body.validate().map_err(BodyRejection::Invalid)?;
        Ok(Self(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::Service;

    #[derive(Debug, Deserialize, Validate)]
    struct NewCustomer {
        #[validate(length(min = 1, max = 20))]
        name: String,
        #[validate(range(min = 0))]
        deposit: i64,
    }

    async fn accept(ValidatedJson(body): ValidatedJson<NewCustomer>) -> String {
        body.name
    }

    async fn post_json(raw: &str) -> (StatusCode, serde_json::Value) {
        let mut svc = Router::new().route("/c", post(accept)).into_service();
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/c")
            .header("content-type", "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn passes_valid_body_through() {
        let (status, _) = post_json(r#"{"name":"Lan","deposit":0}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let (status, body) = post_json("{name:").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn rule_violations_list_every_field() {
        let (status, body) = post_json(r#"{"name":"","deposit":-5}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("deposit: "));
        assert!(message.contains("name: "));
    }
}
