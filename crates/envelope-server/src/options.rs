use std::fmt;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use envelope_config::ApiConfig;
use envelope_core::{ApiFail, DEFAULT_FAIL_STATUS, default_fail_envelope, default_success_envelope};
use http::StatusCode;
use serde_json::Value;

use crate::error::UnexpectedError;

/// Builds the success envelope from response data
pub type SuccessFn = dyn Fn(Option<Value>) -> Value + Send + Sync;

/// Builds the failure envelope from a failure value
pub type FailFn = dyn Fn(&ApiFail) -> Value + Send + Sync;

/// Renders an unexpected error when diagnostics are off
pub type FallbackFn = dyn Fn(&UnexpectedError) -> Response + Send + Sync;

/// Envelope settings shared read-only by every request
#[derive(Clone)]
pub struct ApiOptions {
    fail_code: Option<i64>,
    fail_status: StatusCode,
    diagnostics: bool,
    success: Arc<SuccessFn>,
    fail: Arc<FailFn>,
    fallback: Arc<FallbackFn>,
}

impl ApiOptions {
    pub fn builder() -> ApiOptionsBuilder {
        ApiOptionsBuilder::default()
    }

    pub const fn fail_code(&self) -> Option<i64> {
        self.fail_code
    }

    pub const fn fail_status(&self) -> StatusCode {
        self.fail_status
    }

    pub const fn diagnostics(&self) -> bool {
        self.diagnostics
    }

    pub fn success_envelope(&self, data: Option<Value>) -> Value {
        (self.success)(data)
    }

    pub fn fail_envelope(&self, fail: &ApiFail) -> Value {
        (self.fail)(fail)
    }

    pub fn fallback_response(&self, error: &UnexpectedError) -> Response {
        (self.fallback)(error)
    }
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for ApiOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiOptions")
            .field("fail_code", &self.fail_code)
            .field("fail_status", &self.fail_status)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl TryFrom<&ApiConfig> for ApiOptions {
    type Error = InvalidFailStatus;

    fn try_from(config: &ApiConfig) -> Result<Self, Self::Error> {
        ApiOptionsBuilder::try_from(config).map(ApiOptionsBuilder::build)
    }
}

/// Configured failure status that is not an HTTP error status
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("fail status must be an HTTP error status (400-599), got {0}")]
pub struct InvalidFailStatus(pub u16);

/// Builder for [`ApiOptions`]
///
/// Each field is defaulted on its own: leaving one unset never resets
/// another.
#[derive(Default)]
pub struct ApiOptionsBuilder {
    fail_code: Option<i64>,
    fail_status: Option<StatusCode>,
    diagnostics: bool,
    success: Option<Arc<SuccessFn>>,
    fail: Option<Arc<FailFn>>,
    fallback: Option<Arc<FallbackFn>>,
}

impl ApiOptionsBuilder {
    /// Code applied to failures that do not carry one
    #[must_use]
    pub const fn fail_code(mut self, code: i64) -> Self {
        self.fail_code = Some(code);
        self
    }

    /// Status applied to failures that do not carry one (422 by default)
    #[must_use]
    pub const fn fail_status(mut self, status: StatusCode) -> Self {
        self.fail_status = Some(status);
        self
    }

    /// Render name, message and stack of unexpected errors
    #[must_use]
    pub const fn diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Replace the success envelope
    #[must_use]
    pub fn success<F>(mut self, envelope: F) -> Self
    where
        F: Fn(Option<Value>) -> Value + Send + Sync + 'static,
    {
        self.success = Some(Arc::new(envelope));
        self
    }

    /// Replace the failure envelope
    #[must_use]
    pub fn fail<F>(mut self, envelope: F) -> Self
    where
        F: Fn(&ApiFail) -> Value + Send + Sync + 'static,
    {
        self.fail = Some(Arc::new(envelope));
        self
    }

    /// Replace the response used for unexpected errors outside diagnostic mode
    #[must_use]
    pub fn fallback<F>(mut self, handler: F) -> Self
    where
        F: Fn(&UnexpectedError) -> Response + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> ApiOptions {
        ApiOptions {
            fail_code: self.fail_code,
            fail_status: self.fail_status.unwrap_or(DEFAULT_FAIL_STATUS),
            diagnostics: self.diagnostics,
            success: match self.success {
                Some(success) => success,
                None => Arc::new(default_success_envelope),
            },
            fail: match self.fail {
                Some(fail) => fail,
                None => Arc::new(default_fail_envelope),
            },
            fallback: match self.fallback {
                Some(fallback) => fallback,
                None => Arc::new(default_error_response),
            },
        }
    }
}

impl TryFrom<&ApiConfig> for ApiOptionsBuilder {
    type Error = InvalidFailStatus;

    fn try_from(config: &ApiConfig) -> Result<Self, Self::Error> {
        let status = StatusCode::from_u16(config.fail_status)
            .ok()
            .filter(|status| status.is_client_error() || status.is_server_error())
            .ok_or(InvalidFailStatus(config.fail_status))?;

        Ok(Self {
            fail_code: config.fail_code,
            fail_status: Some(status),
            diagnostics: config.diagnostics,
            ..Self::default()
        })
    }
}

/// Response the host framework gives unexpected errors: a bare 500
pub fn default_error_response(_error: &UnexpectedError) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
