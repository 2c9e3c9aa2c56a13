//! 토큰 발급/검사
//!
//! Advisor와 같은 서명 시크릿을 사용해야 서로의 토큰을 인정합니다.

use std::time::Duration;

use opr_core::auth::{TokenClaims, TokenService};
use opr_core::keys::SigningKey;

fn service(secret: &str, ttl: Duration) -> anyhow::Result<TokenService> {
    Ok(TokenService::new(SigningKey::from_secret(secret)?, ttl))
}

pub fn issue(secret: &str, subject: &str, ttl_secs: u64) -> anyhow::Result<()> {
    if subject.trim().is_empty() {
        anyhow::bail!("subject must not be empty");
    }

    let issued = service(secret, Duration::from_secs(ttl_secs))?.issue(subject)?;
    println!("{}", issued.token);
    eprintln!("Expires: {}", issued.claims.exp);
    Ok(())
}

fn inspect_claims(secret: &str, token: &str) -> anyhow::Result<TokenClaims> {
    // 검증에는 TTL이 쓰이지 않음
    let claims = service(secret, Duration::ZERO)?.validate(token)?;
    Ok(claims)
}

pub fn inspect(secret: &str, token: &str) -> anyhow::Result<()> {
    let claims = inspect_claims(secret, token)?;
    println!("Subject: {}", claims.sub);
    println!("Issued:  {}", claims.iat);
    println!("Expires: {}", claims.exp);
    Ok(())
}
