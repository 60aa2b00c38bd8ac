//! Error interception
//!
//! [`setup`] wraps a router so that every value raised by a handler is
//! rendered exactly once, with the installed [`ApiOptions`].

use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::Raised;
use crate::{Api, ApiError, ApiOptions, UnexpectedError};

/// Install the envelope on a router
///
/// Handlers on `router` can then extract [`Api`] and return
/// [`ApiResult`](crate::ApiResult). Routes added after this call are not
/// covered. Panics in handlers are reported as unexpected errors.
pub fn setup<S>(router: Router<S>, options: ApiOptions) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    tracing::debug!(?options, "api envelope installed");

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(Arc::new(options), intercept))
}

async fn intercept(State(options): State<Arc<ApiOptions>>, mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(Api::new(Arc::clone(&options)));

    let mut response = next.run(request).await;

    let Some(Raised(error)) = response.extensions_mut().remove::<Raised>() else {
        return response;
    };

    match error.as_ref() {
        ApiError::Fail(fail) => {
            tracing::debug!(status = %fail.status(), code = ?fail.code(), message = ?fail.message(), "request failed");
        }
        ApiError::Unexpected(unexpected) => {
            tracing::error!(name = unexpected.name(), error = ?unexpected.inner(), "unexpected error in handler");
        }
    }

    render(&options, &error)
}

/// Turn a raised value into its final response
pub(crate) fn render(options: &ApiOptions, error: &ApiError) -> Response {
    match error {
        ApiError::Fail(fail) => json_response(fail.status(), &options.fail_envelope(fail)),
        ApiError::Unexpected(unexpected) if options.diagnostics() => {
            json_response(StatusCode::INTERNAL_SERVER_ERROR, &unexpected.diagnostic())
        }
        ApiError::Unexpected(unexpected) => options.fallback_response(unexpected),
    }
}

/// Complete JSON response with an exact `Content-Length`
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let bytes = match serde_json::to_vec(body) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize error envelope");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
    };

    let length = HeaderValue::from(bytes.len());
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::CONTENT_LENGTH, length);

    response
}

#[allow(clippy::needless_pass_by_value)]
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else {
        "handler panicked".to_owned()
    };

    ApiError::Unexpected(UnexpectedError::new("Panic", anyhow::anyhow!(message))).into_response()
}
