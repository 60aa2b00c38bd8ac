use serde::Deserialize;

/// Default HTTP status for failures
pub const DEFAULT_FAIL_STATUS: u16 = 422;

/// Success/failure envelope settings
///
/// The envelope shapes themselves are code, not configuration; only the
/// defaults applied to `fail` calls and the diagnostic toggle live here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Code applied when a `fail` call omits one
    #[serde(default)]
    pub fail_code: Option<i64>,
    /// HTTP status applied when a `fail` call omits one
    #[serde(default = "default_fail_status")]
    pub fail_status: u16,
    /// Expose name, message and stack of unexpected errors to clients.
    /// Development only.
    #[serde(default)]
    pub diagnostics: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            fail_code: None,
            fail_status: DEFAULT_FAIL_STATUS,
            diagnostics: false,
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_fail_status() -> u16 {
    DEFAULT_FAIL_STATUS
}
