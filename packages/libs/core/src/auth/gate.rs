//! Request Gate
//!
//! 요청마다 한 번 실행되어 Bearer 토큰으로부터 principal을 "채우기만" 합니다.
//! 접근 허용/거부는 이 게이트가 아니라 뒤따르는 인가 정책이 결정합니다.
//!
//! # 판정 순서
//!
//! 1. 공개 경로(prefix allowlist)면 인증 시도 없이 통과
//! 2. `Authorization: Bearer <token>`이 없거나 형식이 틀리면 principal 없이 통과
//! 3. 토큰 검증 → credential store에서 role 조회 → principal 부착
//! 4. 어떤 실패든 삼키고 principal 없이 통과

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Error, TokenError};

use super::credentials::CredentialStore;
use super::principal::Principal;
use super::token::{bearer_token, TokenService};

/// 기본 공개 경로 prefix (로그인, API 문서, 헬스체크)
pub const DEFAULT_PUBLIC_PATHS: &[&str] = &[
    "/auth/",
    "/v3/api-docs",
    "/swagger-ui",
    "/swagger-resources",
    "/webjars/",
    "/health",
];

/// 공개 경로 allowlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPaths(Vec<String>);

impl PublicPaths {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        )
    }

    pub fn matches(&self, path: &str) -> bool {
        self.0.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.0
    }
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_PATHS.iter().copied())
    }
}

/// principal을 붙이지 못한 사유 (로그 전용)
#[derive(Debug)]
pub enum GateRejection {
    /// 공격자 입력일 수 있는 토큰 실패
    Token(TokenError),

    /// credential store 조회 실패 (내부 장애 가능)
    CredentialLookup(Error),
}

impl fmt::Display for GateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateRejection::Token(e) => write!(f, "{}", e),
            GateRejection::CredentialLookup(e) => write!(f, "{}", e),
        }
    }
}

/// 게이트 판정 결과
#[derive(Debug)]
pub enum GateOutcome {
    /// 공개 경로, 인증 시도 안 함
    Public,

    /// Bearer 헤더 없음/형식 오류
    Anonymous,

    /// 토큰 또는 조회 실패
    Rejected(GateRejection),

    /// principal 확정
    Authenticated(Principal),
}

impl GateOutcome {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            GateOutcome::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }

    pub fn into_principal(self) -> Option<Principal> {
        match self {
            GateOutcome::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }
}

/// 요청 게이트
#[derive(Clone)]
pub struct RequestGate {
    public_paths: PublicPaths,
    tokens: Arc<TokenService>,
    store: Arc<dyn CredentialStore>,
}

impl RequestGate {
    pub fn new(
        public_paths: PublicPaths,
        tokens: Arc<TokenService>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            public_paths,
            tokens,
            store,
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.matches(path)
    }

    /// 현재 시각 기준 판정
    pub fn evaluate(&self, path: &str, auth_header: Option<&str>) -> GateOutcome {
        self.evaluate_at(path, auth_header, Utc::now())
    }

    /// 주어진 시각 기준 판정
    pub fn evaluate_at(
        &self,
        path: &str,
        auth_header: Option<&str>,
        now: DateTime<Utc>,
    ) -> GateOutcome {
        if self.is_public(path) {
            return GateOutcome::Public;
        }

        let Some(token) = bearer_token(auth_header) else {
            return GateOutcome::Anonymous;
        };

        let claims = match self.tokens.validate_at(token, now) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(path, reason = %e, "bearer token rejected");
                return GateOutcome::Rejected(GateRejection::Token(e));
            }
        };

        match self.store.find_roles_for(&claims.sub) {
            Ok(roles) => GateOutcome::Authenticated(Principal::from_claims(claims, roles)),
            Err(e) => {
                if e.is_client_fault() {
                    tracing::debug!(path, reason = %e, "token subject no longer resolvable");
                } else {
                    tracing::warn!(path, error = %e, code = e.code(), "credential lookup failed in request gate");
                }
                GateOutcome::Rejected(GateRejection::CredentialLookup(e))
            }
        }
    }
}

impl fmt::Debug for RequestGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestGate")
            .field("public_paths", &self.public_paths)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::{Credential, InMemoryCredentialStore};
    use crate::error::Result;
    use crate::keys::test_support::keys;
    use crate::keys::DEFAULT_TOKEN_TTL;

    struct FailingStore;

    impl CredentialStore for FailingStore {
        fn find_by_identity(&self, _identity: &str) -> Result<Option<Credential>> {
            Ok(None)
        }

        fn find_roles_for(&self, _identity: &str) -> Result<Vec<String>> {
            Err(Error::CredentialStore {
                message: "pool exhausted".to_string(),
            })
        }
    }

    fn store() -> Arc<dyn CredentialStore> {
        Arc::new(InMemoryCredentialStore::new().with_credential(Credential {
            identity: "operum".to_string(),
            password_hash: String::new(),
            roles: vec!["user".to_string()],
        }))
    }

    fn gate_with(store: Arc<dyn CredentialStore>) -> (RequestGate, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(keys().signing, DEFAULT_TOKEN_TTL));
        (
            RequestGate::new(PublicPaths::default(), tokens.clone(), store),
            tokens,
        )
    }

    #[test]
    fn test_public_paths_prefix_match() {
        let paths = PublicPaths::default();
        assert!(paths.matches("/auth/login"));
        assert!(paths.matches("/swagger-ui/index.html"));
        assert!(paths.matches("/v3/api-docs"));
        assert!(paths.matches("/health"));
        assert!(!paths.matches("/clientes"));
        assert!(!paths.matches("/authx"));

        let custom = PublicPaths::new(["/public", ""]);
        assert_eq!(custom.prefixes(), &["/public".to_string()]);
    }

    #[test]
    fn test_login_path_without_header_is_public() {
        let (gate, _) = gate_with(store());
        let outcome = gate.evaluate("/auth/login", None);
        assert!(matches!(outcome, GateOutcome::Public));
        assert!(outcome.principal().is_none());
    }

    #[test]
    fn test_public_path_ignores_even_valid_token() {
        let (gate, tokens) = gate_with(store());
        let token = tokens.issue("operum").unwrap().token;
        let header = format!("Bearer {}", token);
        assert!(matches!(
            gate.evaluate("/auth/login", Some(&header)),
            GateOutcome::Public
        ));
    }

    #[test]
    fn test_valid_token_attaches_principal() {
        let (gate, tokens) = gate_with(store());
        let token = tokens.issue("operum").unwrap().token;
        let header = format!("Bearer {}", token);

        let principal = gate
            .evaluate("/clientes", Some(&header))
            .into_principal()
            .unwrap();
        assert_eq!(principal.subject, "operum");
        assert_eq!(principal.roles, vec!["user"]);
    }

    #[test]
    fn test_altered_token_attaches_nothing() {
        let (gate, tokens) = gate_with(store());
        let mut token = tokens.issue("operum").unwrap().token;
        let last = token.pop().unwrap();
        token.push(if last == 'Q' { 'R' } else { 'Q' });
        let header = format!("Bearer {}", token);

        let outcome = gate.evaluate("/clientes", Some(&header));
        assert!(matches!(outcome, GateOutcome::Rejected(GateRejection::Token(_))));
        assert!(outcome.into_principal().is_none());
    }

    #[test]
    fn test_missing_or_malformed_header_is_anonymous() {
        let (gate, _) = gate_with(store());
        assert!(matches!(gate.evaluate("/clientes", None), GateOutcome::Anonymous));
        assert!(matches!(
            gate.evaluate("/clientes", Some("Token abc")),
            GateOutcome::Anonymous
        ));
        assert!(matches!(
            gate.evaluate("/clientes", Some("Bearer ")),
            GateOutcome::Anonymous
        ));
    }

    #[test]
    fn test_expired_token_attaches_nothing() {
        let (gate, tokens) = gate_with(store());
        let issued = tokens.issue("operum").unwrap();
        let header = format!("Bearer {}", issued.token);

        let outcome = gate.evaluate_at("/clientes", Some(&header), issued.claims.exp);
        assert!(matches!(
            outcome,
            GateOutcome::Rejected(GateRejection::Token(TokenError::Expired))
        ));
    }

    #[test]
    fn test_deleted_subject_attaches_nothing() {
        let (gate, tokens) = gate_with(Arc::new(InMemoryCredentialStore::new()));
        let header = format!("Bearer {}", tokens.issue("operum").unwrap().token);
        assert!(matches!(
            gate.evaluate("/clientes", Some(&header)),
            GateOutcome::Rejected(GateRejection::CredentialLookup(Error::UnknownIdentity))
        ));
    }

    #[test]
    fn test_store_failure_is_swallowed_but_distinguished() {
        let (gate, tokens) = gate_with(Arc::new(FailingStore));
        let header = format!("Bearer {}", tokens.issue("operum").unwrap().token);

        let outcome = gate.evaluate("/clientes", Some(&header));
        match &outcome {
            GateOutcome::Rejected(GateRejection::CredentialLookup(e)) => {
                assert!(!e.is_client_fault());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(outcome.principal().is_none());
    }
}
