use http::StatusCode;
use serde_json::Value;

/// HTTP status used for failures when neither the handler nor the
/// configuration picks one
pub const DEFAULT_FAIL_STATUS: StatusCode = StatusCode::UNPROCESSABLE_ENTITY;

/// Application failure raised by a request handler
///
/// Always safe to reveal to the client: the message, code and data end up
/// in the response body. Fields are fixed once the value is built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or_default())]
pub struct ApiFail {
    message: Option<String>,
    code: Option<i64>,
    data: Option<Value>,
    status: StatusCode,
}

impl ApiFail {
    /// Create a failure with a message and the default 422 status
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            code: None,
            data: None,
            status: DEFAULT_FAIL_STATUS,
        }
    }

    /// Attach an application-defined error code
    #[must_use]
    pub const fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach payload data echoed back to the client
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Override the HTTP status
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub const fn code(&self) -> Option<i64> {
        self.code
    }

    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the failure may be shown to the client (always true)
    #[allow(clippy::unused_self)]
    pub const fn expose(&self) -> bool {
        true
    }
}

/// What a handler passes to `fail`
///
/// Every absent field is filled from configuration on its own, so a detail
/// carrying only a message still gets the configured code and status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailDetail {
    pub message: Option<String>,
    pub code: Option<i64>,
    pub status: Option<StatusCode>,
    pub data: Option<Value>,
}

impl FailDetail {
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub const fn code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Build the failure, taking each missing field from the defaults
    pub fn resolve(self, default_code: Option<i64>, default_status: StatusCode) -> ApiFail {
        ApiFail {
            message: self.message,
            code: self.code.or(default_code),
            data: self.data,
            status: self.status.unwrap_or(default_status),
        }
    }
}

impl From<&str> for FailDetail {
    fn from(message: &str) -> Self {
        Self::default().message(message)
    }
}

impl From<String> for FailDetail {
    fn from(message: String) -> Self {
        Self::default().message(message)
    }
}
