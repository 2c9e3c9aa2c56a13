//! Field Cipher
//!
//! 보호 대상 문자열 필드를 AES-256-GCM으로 암호화/복호화합니다.
//!
//! # 저장 형식
//!
//! `Base64(nonce(12) || ciphertext || tag(16))` 하나의 텍스트 값으로 저장됩니다.
//! nonce는 호출마다 새로 생성되므로 같은 평문도 매번 다른 blob이 됩니다.
//!
//! 빈 문자열(공백만 있는 값 포함)은 암호화하지 않고 그대로 통과시킵니다.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;

use crate::error::{Error, Result};
use crate::keys::EncryptionKey;

/// GCM nonce 길이 (96비트)
pub const NONCE_LEN: usize = 12;

/// GCM 인증 태그 길이 (128비트)
pub const TAG_LEN: usize = 16;

/// 필드 암호기
///
/// 불변 키만 보유하므로 스레드 간 공유(`Arc`)해도 잠금이 필요 없습니다.
#[derive(Clone)]
pub struct FieldCipher {
    cipher: Aes256Gcm,
}

impl FieldCipher {
    pub fn new(key: &EncryptionKey) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
        Self { cipher }
    }

    /// 평문을 blob으로 암호화
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        if is_blank(plaintext) {
            return Ok(plaintext.to_string());
        }

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        // 반환값 끝에 태그가 붙어 있음
        let sealed = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| Error::Encryption)?;

        let mut payload = Vec::with_capacity(NONCE_LEN + sealed.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&sealed);

        Ok(general_purpose::STANDARD.encode(payload))
    }

    /// blob을 평문으로 복호화
    ///
    /// 태그가 검증되지 않으면 부분 결과 없이 `Error::Decryption`을 반환합니다.
    pub fn decrypt(&self, blob: &str) -> Result<String> {
        if is_blank(blob) {
            return Ok(blob.to_string());
        }

        let payload = general_purpose::STANDARD
            .decode(blob.trim())
            .map_err(|_| Error::Decryption)?;

        if payload.len() < NONCE_LEN + TAG_LEN {
            return Err(Error::Decryption);
        }

        let (nonce_bytes, sealed) = payload.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce_bytes), sealed)
            .map_err(|_| Error::Decryption)?;

        String::from_utf8(plaintext).map_err(|_| Error::Decryption)
    }
}

impl fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCipher").finish_non_exhaustive()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
