//! /auth 핸들러

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// 로그인 요청 본문
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// 로그인 응답 본문
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,

    #[serde(rename = "type")]
    pub token_type: &'static str,

    /// 토큰 수명 (밀리초)
    pub expires_in: i64,

    pub username: String,
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(request) = payload?;
    if request.username.trim().is_empty() || request.password.trim().is_empty() {
        return Err(ApiError::BadRequest {
            message: "username and password are required".to_string(),
        });
    }

    // 비밀번호 해시 검증은 CPU 바운드
    let authenticator = state.authenticator.clone();
    let username = request.username.clone();
    let issued = tokio::task::spawn_blocking(move || {
        authenticator.authenticate(&username, &request.password)
    })
    .await
    .map_err(|e| ApiError::Internal {
        message: format!("login task failed: {}", e),
    })??;

    let expires_in = (issued.claims.exp - issued.claims.iat).num_milliseconds();
    Ok(Json(LoginResponse {
        username: issued.subject().to_string(),
        token: issued.token,
        token_type: "Bearer",
        expires_in,
    }))
}
