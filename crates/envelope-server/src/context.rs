use std::sync::Arc;

use axum::Json;
use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use envelope_core::FailDetail;
use http::StatusCode;
use http::request::Parts;
use serde::Serialize;
use serde_json::Value;

use crate::{ApiError, ApiOptions, ApiResult};

/// Per-request handle to the envelope helpers
///
/// Extract it in a handler to call [`Api::fail`] or [`Api::success`]:
///
/// ```ignore
/// async fn show(api: Api, Path(id): Path<u64>) -> ApiResult<Success> {
///     let Some(order) = find_order(id) else {
///         return api.fail("order not found");
///     };
///     api.success(order)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Api {
    options: Arc<ApiOptions>,
}

impl Api {
    pub const fn new(options: Arc<ApiOptions>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ApiOptions {
        &self.options
    }

    /// Raise a failure
    ///
    /// Missing code and status come from the configuration. Only ever
    /// returns `Err`, so `return api.fail(..)` or `api.fail(..)?` always
    /// leaves the handler.
    ///
    /// # Errors
    ///
    /// Always returns [`ApiError::Fail`]
    pub fn fail<T>(&self, detail: impl Into<FailDetail>) -> ApiResult<T> {
        let fail = detail
            .into()
            .resolve(self.options.fail_code(), self.options.fail_status());
        Err(ApiError::Fail(fail))
    }

    /// Wrap `data` in the success envelope
    ///
    /// # Errors
    ///
    /// Returns an unexpected error if `data` cannot be serialized to JSON
    pub fn success<T: Serialize>(&self, data: T) -> ApiResult<Success> {
        let data = serde_json::to_value(data).map_err(ApiError::internal)?;
        Ok(Success(self.options.success_envelope(Some(data))))
    }

    /// Success envelope without any data
    pub fn success_empty(&self) -> Success {
        Success(self.options.success_envelope(None))
    }
}

impl<S> FromRequestParts<S> for Api
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Self>().cloned().ok_or_else(|| {
            tracing::error!("Api extractor used on a route without the envelope installed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        })
    }
}

/// Successful JSON response holding the envelope
///
/// Status is left to the framework default (200).
#[derive(Debug, Clone, PartialEq)]
pub struct Success(Value);

impl Success {
    pub const fn envelope(&self) -> &Value {
        &self.0
    }

    pub fn into_envelope(self) -> Value {
        self.0
    }
}

impl IntoResponse for Success {
    fn into_response(self) -> Response {
        Json(self.0).into_response()
    }
}
