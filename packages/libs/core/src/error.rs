//! 공통 에러 타입
//!
//! 신뢰 경계(키, 필드 암호화, 토큰, 인증) 전체에서 사용되는 에러 타입을 정의합니다.
//! 어떤 variant의 메시지에도 키 값, 평문 필드, 비밀번호, 원본 토큰이 포함되지 않습니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 토큰 검증 실패 사유
///
/// 진단용으로만 구분되며, Request Gate에서는 모두 "principal 없음"으로 흡수됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// 구조/인코딩/헤더가 잘못된 토큰
    #[error("malformed token: {reason}")]
    Malformed { reason: &'static str },

    /// 서명이 현재 서명 키로 검증되지 않음
    #[error("token signature does not verify")]
    BadSignature,

    /// 서명은 유효하지만 만료 시각이 지남
    #[error("token expired")]
    Expired,
}

impl TokenError {
    pub(crate) fn malformed(reason: &'static str) -> Self {
        TokenError::Malformed { reason }
    }
}

/// Operum 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("configuration error: {message}")]
    Configuration { message: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Token Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("token encoding failed: {message}")]
    TokenEncoding { message: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Crypto Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("field encryption failed")]
    Encryption,

    #[error("field decryption failed: ciphertext is malformed, tampered with, or sealed under another key")]
    Decryption,

    // ─────────────────────────────────────────────────────────────────────────────
    // Auth Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("identity is not registered in the credential store")]
    UnknownIdentity,

    #[error("credential store error: {message}")]
    CredentialStore { message: String },

    #[error("password hash error: {message}")]
    PasswordHash { message: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Error::Token(_) | Error::AuthenticationFailed => 401,

            // 500 Internal Server Error
            Error::Configuration { .. }
            | Error::TokenEncoding { .. }
            | Error::Encryption
            | Error::Decryption
            | Error::UnknownIdentity
            | Error::CredentialStore { .. }
            | Error::PasswordHash { .. }
            | Error::Json(_) => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::Configuration { .. } => "CONFIGURATION_ERROR",
            Error::Token(TokenError::Malformed { .. }) => "INVALID_TOKEN",
            Error::Token(TokenError::BadSignature) => "BAD_SIGNATURE",
            Error::Token(TokenError::Expired) => "TOKEN_EXPIRED",
            Error::TokenEncoding { .. } => "TOKEN_ENCODING_ERROR",
            Error::Encryption => "ENCRYPTION_ERROR",
            Error::Decryption => "DECRYPTION_ERROR",
            Error::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Error::UnknownIdentity => "UNKNOWN_IDENTITY",
            Error::CredentialStore { .. } => "CREDENTIAL_STORE_ERROR",
            Error::PasswordHash { .. } => "PASSWORD_HASH_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }
    }

    /// 요청 처리 중 흡수해도 되는(공격자 입력으로 인한) 실패인지 여부
    ///
    /// `false`이면 내부 장애로 분류되어 더 높은 로그 레벨로 기록됩니다.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            Error::Token(_) | Error::AuthenticationFailed | Error::UnknownIdentity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        for err in [
            TokenError::malformed("segments"),
            TokenError::BadSignature,
            TokenError::Expired,
        ] {
            assert_eq!(Error::from(err).status_code(), 401);
        }
    }

    #[test]
    fn test_codes_are_distinct_per_token_reason() {
        assert_eq!(Error::from(TokenError::Expired).code(), "TOKEN_EXPIRED");
        assert_eq!(Error::from(TokenError::BadSignature).code(), "BAD_SIGNATURE");
        assert_eq!(
            Error::from(TokenError::malformed("segments")).code(),
            "INVALID_TOKEN"
        );
    }

    #[test]
    fn test_decryption_is_internal_fault() {
        assert_eq!(Error::Decryption.status_code(), 500);
        assert!(!Error::Decryption.is_client_fault());
        assert!(!Error::CredentialStore {
            message: "timeout".into()
        }
        .is_client_fault());
        assert!(Error::from(TokenError::Expired).is_client_fault());
    }

    #[test]
    fn test_authentication_error_is_undifferentiated() {
        assert_eq!(Error::AuthenticationFailed.to_string(), "authentication failed");
    }
}
