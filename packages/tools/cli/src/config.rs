//! CLI 설정

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// CLI 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// 저장된 Bearer 토큰
    pub auth_token: Option<String>,

    /// 로그인한 사용자
    pub username: Option<String>,

    /// 기본 Advisor URL
    pub advisor_url: Option<String>,
}

impl CliConfig {
    /// 설정 파일 경로
    fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?;
        Ok(home.join(".opr").join("config.json"))
    }

    /// 설정 로드
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: CliConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 설정 저장
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Advisor URL 결정 (CLI 옵션 > 저장된 설정 > OPR_ADVISOR_URL)
    pub fn advisor_url(&self, override_url: Option<&str>) -> anyhow::Result<String> {
        override_url
            .map(str::to_string)
            .or_else(|| self.advisor_url.clone())
            .or_else(|| std::env::var("OPR_ADVISOR_URL").ok())
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| anyhow::anyhow!("Advisor URL not configured. Use '--url <url>' or set OPR_ADVISOR_URL"))
    }

    /// 인증 토큰 결정
    pub fn get_auth_token(&self) -> anyhow::Result<String> {
        self.auth_token
            .clone()
            .or_else(|| std::env::var("OPR_AUTH_TOKEN").ok())
            .ok_or_else(|| anyhow::anyhow!("Not logged in. Use 'opr login' first."))
    }
}
