use serde_json::json;

use crate::{Api, ApiResult, Success};

/// Health check handler
pub async fn health_handler(api: Api) -> ApiResult<Success> {
    api.success(json!({ "status": "ok" }))
}
