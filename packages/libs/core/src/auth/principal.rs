//! 인증된 주체
//!
//! 검증된 토큰과 credential store 조회 결과로 만들어지며, 한 요청 범위에서만 존재합니다.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::claims::TokenClaims;

/// 요청을 보낸 주체
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Subject (credential identity)
    pub subject: String,

    /// 요청 시점의 role 목록
    pub roles: Vec<String>,

    /// 토큰 만료 시각
    pub expires_at: DateTime<Utc>,
}

impl Principal {
    pub fn from_claims(claims: TokenClaims, roles: Vec<String>) -> Self {
        Self {
            subject: claims.sub,
            roles,
            expires_at: claims.exp,
        }
    }

    /// 특정 role 보유 확인
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
