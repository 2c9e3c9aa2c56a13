//! 현재 principal 조회

use axum::{Extension, Json};
use opr_core::auth::Principal;

/// GET /me
pub async fn me(Extension(principal): Extension<Principal>) -> Json<Principal> {
    Json(principal)
}
