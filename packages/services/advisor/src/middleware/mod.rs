//! Advisor 미들웨어
//!
//! 바깥쪽부터 request id → trace → auth gate → principal 요구 순서로 적용됩니다.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use opr_core::auth::Principal;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::state::AppState;

tokio::task_local! {
    static REQUEST_ID: String;
}

pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

pub async fn request_id(req: Request, next: Next) -> Response {
    let id = Uuid::new_v4().to_string();
    let mut resp = REQUEST_ID.scope(id.clone(), async move { next.run(req).await }).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert("x-request-id", value);
    }
    resp
}

/// Bearer 토큰이 유효하면 요청 extension에 [`Principal`]을 부착
///
/// 실패해도 요청을 막지 않습니다. 거부는 [`require_principal`]이 합니다.
pub async fn auth_gate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let outcome = state.gate.evaluate(req.uri().path(), header);

    if let Some(principal) = outcome.into_principal() {
        req.extensions_mut().insert(principal);
    }
    next.run(req).await
}

/// 공개 경로가 아닌데 principal이 없으면 403
pub async fn require_principal(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Result<Response> {
    if state.gate.is_public(req.uri().path()) || req.extensions().get::<Principal>().is_some() {
        return Ok(next.run(req).await);
    }

    Err(ApiError::Forbidden {
        message: "Authentication required".to_string(),
    })
}
