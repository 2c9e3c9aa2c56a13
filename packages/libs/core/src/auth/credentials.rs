//! Credential 저장소 계약과 비밀번호 해시
//!
//! Credential store 자체는 이 크레이트 바깥의 협력자입니다. 여기서는 계약(trait)과
//! 설정에서 시드되는 메모리 구현, Argon2id 해시 헬퍼만 제공합니다.

use std::collections::HashMap;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{Error, Result};

/// 저장된 credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// 로그인 identity
    pub identity: String,

    /// Argon2id PHC 문자열
    pub password_hash: String,

    /// 부여된 role 목록
    pub roles: Vec<String>,
}

impl Credential {
    /// 평문 비밀번호를 해시하여 credential 생성
    pub fn with_password(
        identity: impl Into<String>,
        password: &str,
        roles: Vec<String>,
    ) -> Result<Self> {
        Ok(Self {
            identity: identity.into(),
            password_hash: hash_password(password)?,
            roles,
        })
    }
}

/// Credential store 계약
///
/// 동시성 제어는 구현체의 책임입니다.
pub trait CredentialStore: Send + Sync {
    /// identity로 credential 조회 (없으면 `None`)
    fn find_by_identity(&self, identity: &str) -> Result<Option<Credential>>;

    /// identity의 현재 role 목록 (없는 identity면 `Error::UnknownIdentity`)
    fn find_roles_for(&self, identity: &str) -> Result<Vec<String>>;
}

/// 메모리 credential store
///
/// 설정에서 부트스트랩 사용자를 시드할 때 사용합니다. 생성 후에는 읽기 전용입니다.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: HashMap<String, Credential>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// credential 추가 (같은 identity는 덮어씀)
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credentials
            .insert(credential.identity.clone(), credential);
        self
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn find_by_identity(&self, identity: &str) -> Result<Option<Credential>> {
        Ok(self.credentials.get(identity).cloned())
    }

    fn find_roles_for(&self, identity: &str) -> Result<Vec<String>> {
        self.credentials
            .get(identity)
            .map(|c| c.roles.clone())
            .ok_or(Error::UnknownIdentity)
    }
}

/// 비밀번호를 Argon2id PHC 문자열로 해시
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| Error::PasswordHash {
        message: e.to_string(),
    })?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| Error::PasswordHash {
        message: e.to_string(),
    })?;

    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash {
            message: e.to_string(),
        })?
        .to_string();
    Ok(phc)
}

/// PHC 해시와 비밀번호 비교
///
/// 해시 형식이 잘못된 경우에도 `false`를 반환합니다.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("operum123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&hash, "operum123"));
        assert!(!verify_password(&hash, "operum124"));
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("operum123").unwrap();
        let b = hash_password("operum123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("plaintext-password", "plaintext-password"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn test_in_memory_store_lookups() {
        let store = InMemoryCredentialStore::new().with_credential(Credential {
            identity: "operum".to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            roles: vec!["user".to_string()],
        });

        assert_eq!(store.len(), 1);
        assert!(store.find_by_identity("operum").unwrap().is_some());
        assert!(store.find_by_identity("ghost").unwrap().is_none());
        assert_eq!(store.find_roles_for("operum").unwrap(), vec!["user"]);
        assert!(matches!(
            store.find_roles_for("ghost"),
            Err(Error::UnknownIdentity)
        ));
    }
}
