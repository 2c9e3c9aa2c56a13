//! Advisor 앱 상태

use std::sync::Arc;

use anyhow::Context;
use opr_core::auth::{
    Authenticator, Credential, CredentialStore, InMemoryCredentialStore, PublicPaths,
    RequestGate, TokenService,
};
use opr_core::keys::KeyMaterial;

use crate::config::Config;

/// 부트스트랩 사용자 role
pub const DEFAULT_ROLE: &str = "user";

/// 앱 상태
///
/// 모든 핸들러와 미들웨어가 공유합니다. 생성 후 불변입니다.
pub struct AppState {
    /// 요청 게이트
    pub gate: RequestGate,

    /// 로그인 처리기
    pub authenticator: Authenticator,
}

impl AppState {
    /// 새 상태 생성
    ///
    /// 시크릿이 없거나 약하면 실패하며, 서비스는 기동하지 않습니다.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let keys = KeyMaterial::load(&config.security).context("invalid security configuration")?;
        let tokens = Arc::new(TokenService::new(keys.signing, config.security.token_ttl));

        let bootstrap = Credential::with_password(
            config.bootstrap_username.clone(),
            &config.bootstrap_password,
            vec![DEFAULT_ROLE.to_string()],
        )?;
        let store: Arc<dyn CredentialStore> =
            Arc::new(InMemoryCredentialStore::new().with_credential(bootstrap));

        tracing::info!(
            username = %config.bootstrap_username,
            ttl_secs = tokens.ttl().num_seconds(),
            "security initialized"
        );

        Ok(Self {
            gate: RequestGate::new(
                PublicPaths::new(config.public_paths.iter().cloned()),
                tokens.clone(),
                store.clone(),
            ),
            authenticator: Authenticator::new(store, tokens),
        })
    }
}
