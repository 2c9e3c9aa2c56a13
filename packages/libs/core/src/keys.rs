//! Key Manager
//!
//! 설정 시크릿에서 토큰 서명 키와 필드 암호화 키를 한 번 도출하고 프로세스 수명 동안 보관합니다.
//!
//! # 운영 제약
//!
//! 키 로테이션 경로는 없습니다. 서명 시크릿을 바꾸면 기존 토큰이 모두 무효화되고,
//! 암호화 시크릿을 바꾸면 기존에 암호화된 필드를 더 이상 읽을 수 없습니다.

use std::fmt;
use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// HS256 서명 키 최소 길이 (디코딩 후 바이트)
pub const MIN_SIGNING_KEY_BYTES: usize = 32;

/// 암호화 시크릿 최소 길이 (문자)
pub const MIN_ENCRYPTION_SECRET_CHARS: usize = 16;

/// 기본 토큰 TTL (24시간)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const FIELD_KEY_SALT: &[u8] = b"operum.field-cipher.salt.v1";
const FIELD_KEY_INFO: &[u8] = b"operum.field-cipher.aes-256-gcm";

/// 보안 설정 입력
///
/// 서비스/CLI 설정에서 채워져 [`KeyMaterial::load`]로 전달됩니다.
#[derive(Clone)]
pub struct SecuritySettings {
    /// Base64 인코딩된 서명 시크릿
    pub signing_secret: String,

    /// 필드 암호화 시크릿 (최소 16자)
    pub encryption_secret: String,

    /// 토큰 수명
    pub token_ttl: Duration,
}

impl fmt::Debug for SecuritySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecuritySettings")
            .field("signing_secret", &"<redacted>")
            .field("encryption_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

/// 토큰 서명 키 (HMAC-SHA256)
#[derive(Clone)]
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    /// Base64(standard 또는 url-safe) 시크릿에서 서명 키 생성
    pub fn from_secret(secret: &str) -> Result<Self> {
        let trimmed = secret.trim();
        if trimmed.is_empty() {
            return Err(Error::configuration("signing secret is not set"));
        }

        let bytes = general_purpose::STANDARD
            .decode(trimmed)
            .or_else(|_| general_purpose::URL_SAFE_NO_PAD.decode(trimmed))
            .map_err(|_| Error::configuration("signing secret is not valid Base64"))?;

        if bytes.len() < MIN_SIGNING_KEY_BYTES {
            return Err(Error::configuration(format!(
                "signing secret must decode to at least {} bytes",
                MIN_SIGNING_KEY_BYTES
            )));
        }

        Ok(Self(Zeroizing::new(bytes)))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// 필드 암호화 키 (AES-256-GCM)
#[derive(Clone)]
pub struct EncryptionKey(Zeroizing<[u8; 32]>);

impl EncryptionKey {
    /// 시크릿 전체를 HKDF-SHA256으로 256비트 키로 확장
    pub fn from_secret(secret: &str) -> Result<Self> {
        if secret.chars().count() < MIN_ENCRYPTION_SECRET_CHARS {
            return Err(Error::configuration(format!(
                "encryption secret must have at least {} characters",
                MIN_ENCRYPTION_SECRET_CHARS
            )));
        }

        let hk = Hkdf::<Sha256>::new(Some(FIELD_KEY_SALT), secret.as_bytes());
        let mut okm = Zeroizing::new([0u8; 32]);
        hk.expand(FIELD_KEY_INFO, okm.as_mut())
            .map_err(|_| Error::configuration("encryption key derivation failed"))?;

        Ok(Self(okm))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(<redacted>)")
    }
}

/// 프로세스 전역 키 묶음
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    pub signing: SigningKey,
    pub encryption: EncryptionKey,
}

impl KeyMaterial {
    /// 설정에서 두 키를 모두 로드
    ///
    /// 어느 한쪽이라도 없거나 약하면 `Error::Configuration`을 반환하며, 프로세스는 시작하면 안 됩니다.
    pub fn load(settings: &SecuritySettings) -> Result<Self> {
        let signing = SigningKey::from_secret(&settings.signing_secret)?;
        let encryption = EncryptionKey::from_secret(&settings.encryption_secret)?;
        tracing::debug!("key material loaded");
        Ok(Self {
            signing,
            encryption,
        })
    }
}
