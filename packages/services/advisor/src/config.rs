//! Advisor 설정

use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::Context;
use opr_core::auth::DEFAULT_PUBLIC_PATHS;
use opr_core::keys::{SecuritySettings, DEFAULT_TOKEN_TTL};

/// Advisor 설정
#[derive(Clone)]
pub struct Config {
    /// 서버 포트
    pub port: u16,

    /// 서명/암호화 시크릿과 토큰 수명
    pub security: SecuritySettings,

    /// 인증 없이 통과하는 경로 prefix
    pub public_paths: Vec<String>,

    /// 부트스트랩 사용자 이름
    pub bootstrap_username: String,

    /// 부트스트랩 사용자 비밀번호 (평문, 기동 시 해시됨)
    pub bootstrap_password: String,
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{} must be set", name))
        };

        let token_ttl = match lookup("OPR_TOKEN_TTL_SECS") {
            Some(v) => Duration::from_secs(
                v.trim()
                    .parse()
                    .context("OPR_TOKEN_TTL_SECS must be a number of seconds")?,
            ),
            None => DEFAULT_TOKEN_TTL,
        };

        Ok(Self {
            port: lookup("OPR_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("OPR_PORT must be a port number")?,

            security: SecuritySettings {
                signing_secret: required("OPR_JWT_SECRET")?,
                encryption_secret: required("OPR_ENCRYPTION_SECRET")?,
                token_ttl,
            },

            public_paths: lookup("OPR_PUBLIC_PATHS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_else(|| DEFAULT_PUBLIC_PATHS.iter().map(|s| s.to_string()).collect()),

            bootstrap_username: lookup("OPR_SECURITY_USERNAME")
                .unwrap_or_else(|| "operum".to_string()),

            bootstrap_password: required("OPR_SECURITY_PASSWORD")?,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("security", &self.security)
            .field("public_paths", &self.public_paths)
            .field("bootstrap_username", &self.bootstrap_username)
            .field("bootstrap_password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("OPR_JWT_SECRET", "c2lnbmluZy1zZWNyZXQ="),
        ("OPR_ENCRYPTION_SECRET", "field-secret-value"),
        ("OPR_SECURITY_PASSWORD", "operum123"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.security.token_ttl, DEFAULT_TOKEN_TTL);
        assert_eq!(config.bootstrap_username, "operum");
        assert!(config.public_paths.iter().any(|p| p == "/auth/"));
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("OPR_PORT", "9090"),
            ("OPR_TOKEN_TTL_SECS", "60"),
            ("OPR_PUBLIC_PATHS", "/auth/, /status ,"),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.security.token_ttl, Duration::from_secs(60));
        assert_eq!(config.public_paths, vec!["/auth/", "/status"]);
    }

    #[test]
    fn test_missing_secret_is_error() {
        let vars: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != "OPR_JWT_SECRET")
            .collect();
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("OPR_JWT_SECRET"));
    }

    #[test]
    fn test_blank_secret_is_error_before_key_loading() {
        let vars: Vec<_> = REQUIRED
            .iter()
            .map(|&(k, v)| if k == "OPR_ENCRYPTION_SECRET" { (k, "   ") } else { (k, v) })
            .collect();
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("OPR_ENCRYPTION_SECRET must be set"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("operum123"));
        assert!(!printed.contains("field-secret-value"));
        assert!(!printed.contains("c2lnbmluZy1zZWNyZXQ="));
    }
}
