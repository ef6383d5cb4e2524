//! JSON body extractor with field validation
//!
//! Bodies that do not parse are a 400; bodies that parse but break a
//! `#[validate(..)]` rule are a 422. Both reply with `{"message"}`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiError;

/// `axum::Json<T>` followed by `T::validate()`.
///
/// ```ignore
/// async fn register(ValidatedJson(body): ValidatedJson<RegisterRequest>) { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("Invalid JSON: {}", rejection.body_text()),
        )
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, describe(&errors))
    }
}

/// `field: reason` pairs joined by `; `, ordered by field name so the
/// message is stable across runs.
fn describe(errors: &ValidationErrors) -> String {
    let mut reasons: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    reasons.sort();

    if reasons.is_empty() {
        "Validation failed".to_string()
    } else {
        reasons.join("; ")
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde_json::{json, Value};
    use tower::Service;

    use super::*;
    use crate::interfaces::http::common::MessageResponse;
    use crate::interfaces::http::modules::fundings::CreateFundingRequest;
    use crate::interfaces::http::modules::users::RegisterRequest;

    async fn accept_registration(ValidatedJson(body): ValidatedJson<RegisterRequest>) -> String {
        body.email
    }

    async fn accept_funding(ValidatedJson(body): ValidatedJson<CreateFundingRequest>) -> String {
        body.amount.to_string()
    }

    async fn post_json(uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
        let app = Router::new()
            .route("/users", post(accept_registration))
            .route("/fundings", post(accept_funding));
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let resp = app.into_service().call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn body_of(value: Value) -> Body {
        Body::from(serde_json::to_vec(&value).unwrap())
    }

    #[tokio::test]
    async fn valid_registration_passes_through() {
        let (status, bytes) = post_json(
            "/users",
            body_of(json!({"name": "Rahim", "email": "rahim@example.com", "bloodGroup": "O+"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"rahim@example.com");
    }

    #[tokio::test]
    async fn unparseable_body_is_400() {
        let (status, bytes) = post_json("/users", Body::from("{name: Rahim")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: MessageResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(body.message.starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn missing_required_field_is_400() {
        let (status, _) = post_json("/users", body_of(json!({"name": "Rahim"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn broken_rules_are_422_with_sorted_fields() {
        let (status, bytes) = post_json(
            "/users",
            body_of(json!({"name": "", "email": "not-an-email"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let body: MessageResponse = serde_json::from_slice(&bytes).unwrap();
        let email_at = body.message.find("email: ").unwrap();
        let name_at = body.message.find("name: ").unwrap();
        assert!(email_at < name_at);
    }

    #[tokio::test]
    async fn funding_amount_range_is_enforced() {
        let funding = |amount: i64| {
            body_of(json!({
                "funderName": "Nadia",
                "funderEmail": "nadia@example.com",
                "amount": amount
            }))
        };

        let (status, _) = post_json("/fundings", funding(0)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let (status, _) = post_json("/fundings", funding(i64::MAX)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let (status, bytes) = post_json("/fundings", funding(2500)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"2500");
    }
}
