//! CLI 명령어 구현

pub mod auth;
pub mod field;
pub mod http;
pub mod keys;
pub mod password;
pub mod token;
