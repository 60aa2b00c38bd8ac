//! Sample routes showing each response path
//!
//! Mounted under `/demo` when `server.demo = true`.

use axum::Router;
use axum::extract::{Json, Query};
use axum::routing::get;
use envelope_core::FailDetail;
use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::{Api, ApiError, ApiResult, Success};

pub fn demo_router() -> Router {
    Router::new()
        .route("/demo/echo", get(echo_query).post(echo_body))
        .route("/demo/empty", get(empty))
        .route("/demo/fail", get(fail_message).post(fail_detail))
        .route("/demo/error", get(unexpected))
        .route("/demo/panic", get(explode))
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    message: Option<String>,
}

async fn echo_query(api: Api, Query(query): Query<MessageQuery>) -> ApiResult<Success> {
    api.success(query.message)
}

async fn echo_body(api: Api, Json(body): Json<Value>) -> ApiResult<Success> {
    api.success(body)
}

async fn empty(api: Api) -> Success {
    api.success_empty()
}

async fn fail_message(api: Api, Query(query): Query<MessageQuery>) -> ApiResult<Success> {
    api.fail(query.message.unwrap_or_else(|| "demo failure".to_owned()))
}

/// Body for `POST /demo/fail`, mirroring [`FailDetail`]
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FailRequest {
    message: Option<String>,
    code: Option<i64>,
    status: Option<u16>,
    data: Option<Value>,
}

async fn fail_detail(api: Api, Json(request): Json<FailRequest>) -> ApiResult<Success> {
    let status = match request.status.map(StatusCode::from_u16).transpose() {
        Ok(status) => status,
        Err(_) => {
            return api.fail(
                FailDetail::default()
                    .message("status must be a valid HTTP status code")
                    .status(StatusCode::BAD_REQUEST),
            );
        }
    };

    api.fail(FailDetail {
        message: request.message,
        code: request.code,
        status,
        data: request.data,
    })
}

async fn unexpected() -> ApiResult<Success> {
    Err(ApiError::from(anyhow::anyhow!("demo error")))
}

async fn explode() -> ApiResult<Success> {
    panic!("demo panic")
}
