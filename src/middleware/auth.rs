//! Credential capture middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the `Authorization` header
//! 2. Reject the request with HTTP 401 when it is missing or blank
//! 3. Inject it into the request as an opaque `Credential`
//!
//! Token validation belongs to the identity service. This service only
//! forwards the header to the account service, which authorizes each
//! balance mutation itself.

use axum::{extract::Request, http::header, middleware::Next, response::Response};

use crate::{error::AppError, models::credential::Credential};

/// Credential capture middleware function.
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer abc123xyz
/// ```
///
/// The whole header value (scheme included) becomes the `Credential`. Its
/// bytes are kept as received, including non-ASCII ones.
pub async fn require_credential(mut request: Request, next: Next) -> Result<Response, AppError> {
    let credential = request
        .headers()
        .get(header::AUTHORIZATION)
        .filter(|value| !value.as_bytes().iter().all(u8::is_ascii_whitespace))
        .cloned()
        .map(Credential::new)
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    // Route handlers can now extract this using Extension<Credential>
    request.extensions_mut().insert(credential);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Extension, Router,
        body::{Body, to_bytes},
        http::{self, HeaderValue, StatusCode},
        middleware::from_fn,
        routing::get,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/",
                get(|Extension(credential): Extension<Credential>| async move {
                    credential.as_bytes().to_vec()
                }),
            )
            .route_layer(from_fn(require_credential))
    }

    async fn call(authorization: Option<HeaderValue>) -> (StatusCode, Vec<u8>) {
        let mut request = http::Request::builder().uri("/");
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        let response = app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn header_is_captured_unchanged() {
        let (status, body) = call(Some(HeaderValue::from_static(" Bearer abc123 "))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b" Bearer abc123 ");
    }

    #[tokio::test]
    async fn non_ascii_header_is_forwarded_as_bytes() {
        let raw = b"Bearer caf\xe9";
        let (status, body) = call(Some(HeaderValue::from_bytes(raw).unwrap())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, raw);
    }

    #[tokio::test]
    async fn missing_or_blank_header_is_unauthorized() {
        assert_eq!(call(None).await.0, StatusCode::UNAUTHORIZED);
        assert_eq!(
            call(Some(HeaderValue::from_static("   "))).await.0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            call(Some(HeaderValue::from_static(""))).await.0,
            StatusCode::UNAUTHORIZED
        );
    }
}
