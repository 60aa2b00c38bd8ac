use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use axum::response::{IntoResponse, Response};
use envelope_core::ApiFail;
use serde::Serialize;
use thiserror::Error;

use crate::ApiOptions;
use crate::intercept::render;

/// Result type for handlers using the envelope
pub type ApiResult<T> = Result<T, ApiError>;

/// Value raised out of a handler
///
/// Turned into a response by the interceptor installed with
/// [`setup`](crate::setup).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Expected failure, always rendered for the client
    #[error(transparent)]
    Fail(#[from] ApiFail),
    /// Anything else; details stay server-side unless diagnostics are on
    #[error(transparent)]
    Unexpected(#[from] UnexpectedError),
}

impl ApiError {
    /// Wrap an arbitrary error, remembering its type name
    pub fn internal<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unexpected(UnexpectedError::from_error(error))
    }

    pub const fn as_fail(&self) -> Option<&ApiFail> {
        match self {
            Self::Fail(fail) => Some(fail),
            Self::Unexpected(_) => None,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unexpected(error.into())
    }
}

/// Error that is not an [`ApiFail`]
#[derive(Debug, Error)]
#[error("{error}")]
pub struct UnexpectedError {
    name: Cow<'static, str>,
    error: anyhow::Error,
}

impl UnexpectedError {
    pub fn new(name: impl Into<Cow<'static, str>>, error: anyhow::Error) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }

    pub fn from_error<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::new(short_type_name::<E>(), error.into())
    }

    /// Short type name of the original error, `Error` when unknown
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// Error, cause chain and backtrace (when captured)
    pub fn stack(&self) -> String {
        format!("{:?}", self.error)
    }

    pub const fn inner(&self) -> &anyhow::Error {
        &self.error
    }

    /// Payload exposed in diagnostic mode
    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic {
            name: self.name.to_string(),
            message: self.message(),
            stack: self.stack(),
        }
    }
}

impl From<anyhow::Error> for UnexpectedError {
    fn from(error: anyhow::Error) -> Self {
        Self::new("Error", error)
    }
}

/// Diagnostic body for unexpected errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub name: String,
    pub message: String,
    pub stack: String,
}

/// Marker carrying a raised value from the handler to the interceptor
#[derive(Clone)]
pub(crate) struct Raised(pub(crate) Arc<ApiError>);

static UNINSTALLED: LazyLock<ApiOptions> = LazyLock::new(ApiOptions::default);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Rendered with defaults here; the interceptor re-renders with the
        // installed options and drops the marker.
        let raised = Arc::new(self);
        let mut response = render(&UNINSTALLED, &raised);
        response.extensions_mut().insert(Raised(raised));
        response
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}
