//! 토큰 발급 및 검증
//!
//! 서버 측 세션 없이 스스로 검증 가능한 HS256 JWT(compact)를 다룹니다.
//!
//! ```text
//! base64url(header) . base64url(claims) . base64url(HMAC-SHA256(key, header.claims))
//! ```
//!
//! 폐기 목록은 없습니다. 서명 키가 바뀌지 않는 한 토큰은 서버 재시작과 무관하게
//! 명시된 수명 동안 정확히 유효합니다.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::{Error, Result, TokenError};
use crate::keys::SigningKey;

use super::claims::TokenClaims;

/// `Authorization` 헤더에서 Bearer 토큰 추출
///
/// 헤더가 없거나 `Bearer ` 접두사가 없거나 토큰이 비어 있으면 `None`입니다.
pub fn bearer_token(auth_header: Option<&str>) -> Option<&str> {
    let token = auth_header?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// 발급된 토큰
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// compact 토큰 문자열
    pub token: String,

    /// 토큰에 담긴 claims
    pub claims: TokenClaims,
}

impl IssuedToken {
    pub fn subject(&self) -> &str {
        &self.claims.sub
    }
}

/// 토큰 서비스
///
/// 불변 서명 키만 보유합니다. 모든 연산은 순수 함수이며 재진입 가능합니다.
#[derive(Debug, Clone)]
pub struct TokenService {
    key: SigningKey,
    ttl: chrono::Duration,
    validation: Validation,
}

impl TokenService {
    pub fn new(key: SigningKey, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);

        // 만료는 주입된 시각으로 직접 판정 (leeway 없음)
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            key,
            ttl,
            validation,
        }
    }

    /// 설정된 토큰 수명
    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// 현재 시각 기준으로 토큰 발급
    pub fn issue(&self, subject: &str) -> Result<IssuedToken> {
        self.issue_at(subject, Utc::now())
    }

    /// 주어진 시각 기준으로 토큰 발급
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken> {
        let claims = TokenClaims::new(subject, now, self.ttl);

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.key.as_bytes()),
        )
        .map_err(|e| Error::TokenEncoding {
            message: e.to_string(),
        })?;

        Ok(IssuedToken { token, claims })
    }

    /// 현재 시각 기준으로 토큰 검증
    pub fn validate(&self, token: &str) -> std::result::Result<TokenClaims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// 주어진 시각 기준으로 토큰 검증
    ///
    /// # 검증 순서
    /// 1. segment 구조와 헤더 (`HS256`만 허용)
    /// 2. 서명 (상수 시간 비교)
    /// 3. claims 디코딩
    /// 4. `now < exp`
    pub fn validate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<TokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(
            token.trim(),
            &DecodingKey::from_secret(self.key.as_bytes()),
            &self.validation,
        )
        .map_err(|e| token_error(e.kind()))?;

        if data.claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

fn token_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidToken => TokenError::malformed("expected three segments"),
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::malformed("unsupported algorithm")
        }
        ErrorKind::Base64(_) => TokenError::malformed("undecodable segment"),
        ErrorKind::Json(_) | ErrorKind::Utf8(_) => TokenError::malformed("undecodable json"),
        ErrorKind::MissingRequiredClaim(_) => TokenError::malformed("missing required claim"),
        _ => TokenError::malformed("invalid token"),
    }
}
