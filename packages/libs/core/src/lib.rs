//! opr-core: Operum 보안 핵심 라이브러리
//!
//! 이 크레이트는 Advisor 서비스와 CLI가 공유하는 키 관리, 필드 암호화,
//! 토큰 발급/검증, 요청 인증 로직을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `keys`: 서명 키/암호화 키 로드 및 검증
//! - `crypto`: AES-256-GCM 필드 암호화
//! - `storage`: 영속 계층 경계에서의 투명한 필드 변환
//! - `auth`: 토큰, 자격 증명, 요청 게이트
//! - `error`: 공통 에러 타입

pub mod auth;
pub mod crypto;
pub mod error;
pub mod keys;
pub mod storage;

pub use error::{Error, Result, TokenError};
