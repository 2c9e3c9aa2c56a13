//! 인증 관련 타입 및 로직
//!
//! # 개요
//!
//! - **Token Service**: HS256 서명 토큰 발급/검증 (서버 세션 없음)
//! - **Credential Authenticator**: identity/비밀번호 확인 후 토큰 발급
//! - **Request Gate**: 요청마다 Bearer 토큰을 principal로 변환
//!
//! # 흐름
//!
//! ```text
//! POST /auth/login → Authenticator → TokenService::issue → 토큰
//! 이후 요청       → RequestGate → TokenService::validate → CredentialStore → Principal
//! ```

mod authenticator;
mod claims;
mod credentials;
mod gate;
mod principal;
mod token;

pub use authenticator::Authenticator;
pub use claims::TokenClaims;
pub use credentials::{
    hash_password, verify_password, Credential, CredentialStore, InMemoryCredentialStore,
};
pub use gate::{GateOutcome, GateRejection, PublicPaths, RequestGate, DEFAULT_PUBLIC_PATHS};
pub use principal::Principal;
pub use token::{bearer_token, IssuedToken, TokenService};
