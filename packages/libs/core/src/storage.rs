//! 영속 계층 어댑터
//!
//! 영속 계층은 보호 필드를 쓰고 읽을 때마다 [`FieldCodec`]을 거칩니다.
//! 코덱은 생성 시 `FieldCipher`를 직접 주입받으며, 전역 조회는 하지 않습니다.

use std::sync::Arc;

use crate::crypto::FieldCipher;
use crate::error::Result;

/// 보호 필드 변환기
#[derive(Debug, Clone)]
pub struct FieldCodec {
    cipher: Arc<FieldCipher>,
}

impl FieldCodec {
    pub fn new(cipher: Arc<FieldCipher>) -> Self {
        Self { cipher }
    }

    /// 메모리 표현(평문) → 저장 표현(blob)
    pub fn to_storage(&self, plaintext: Option<&str>) -> Result<Option<String>> {
        plaintext.map(|value| self.cipher.encrypt(value)).transpose()
    }

    /// 저장 표현(blob) → 메모리 표현(평문)
    pub fn from_storage(&self, stored: Option<&str>) -> Result<Option<String>> {
        stored.map(|value| self.cipher.decrypt(value)).transpose()
    }
}
