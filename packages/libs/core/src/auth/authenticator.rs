//! Credential Authenticator
//!
//! identity/비밀번호를 credential store와 대조하고, 성공하면 Token Service에 발급을 위임합니다.

use std::sync::{Arc, OnceLock};

use crate::error::{Error, Result};

use super::credentials::{hash_password, verify_password, CredentialStore};
use super::token::{IssuedToken, TokenService};

/// 미등록 identity도 해시 검증 비용을 동일하게 치르도록 하는 더미 해시
fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| hash_password("operum-unknown-identity").unwrap_or_default())
}

/// 로그인 처리기
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// 자격 증명 검증 후 토큰 발급
    ///
    /// 알 수 없는 identity와 틀린 비밀번호는 구분 없이 `Error::AuthenticationFailed`입니다.
    /// store 조회 자체의 장애는 그대로 전파됩니다.
    pub fn authenticate(&self, identity: &str, password: &str) -> Result<IssuedToken> {
        let credential = self.store.find_by_identity(identity)?;

        let verified = match &credential {
            Some(credential) => verify_password(&credential.password_hash, password),
            None => {
                let _ = verify_password(dummy_hash(), password);
                false
            }
        };

        if !verified {
            tracing::info!("login rejected");
            return Err(Error::AuthenticationFailed);
        }

        let issued = self.tokens.issue(identity)?;
        tracing::info!(subject = %issued.subject(), exp = %issued.claims.exp, "token issued");
        Ok(issued)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
