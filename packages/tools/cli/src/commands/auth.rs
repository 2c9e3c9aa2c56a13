//! 인증 명령어

use serde::{Deserialize, Serialize};

use crate::commands::http;
use crate::config::CliConfig;

pub async fn login(
    config: &mut CliConfig,
    url: Option<&str>,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let advisor_url = config.advisor_url(url)?;
    let client = http::client();

    #[derive(Serialize)]
    struct Req<'a> {
        username: &'a str,
        password: &'a str,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Resp {
        token: String,
        expires_in: i64,
        username: String,
    }

    let resp: Resp = http::send_json(
        client
            .post(format!("{}/auth/login", advisor_url))
            .json(&Req { username, password }),
    )
    .await?;

    config.auth_token = Some(resp.token);
    config.username = Some(resp.username.clone());
    config.advisor_url = Some(advisor_url.clone());
    config.save()?;

    println!("Logged in to {} as {}", advisor_url, resp.username);
    println!("Token expires in {}s", resp.expires_in / 1000);
    Ok(())
}

pub fn logout(config: &mut CliConfig) -> anyhow::Result<()> {
    if config.auth_token.is_none() {
        println!("Not logged in");
        return Ok(());
    }

    config.auth_token = None;
    config.username = None;
    config.save()?;
    println!("Logged out");
    Ok(())
}

pub async fn whoami(config: &CliConfig, url: Option<&str>) -> anyhow::Result<()> {
    let advisor_url = config.advisor_url(url)?;
    let client = http::client();

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Me {
        subject: String,
        roles: Vec<String>,
        expires_at: String,
    }

    let me: Me = http::send_json(http::with_auth(
        config,
        client.get(format!("{}/me", advisor_url)),
    )?)
    .await?;

    println!("Subject: {}", me.subject);
    println!("Roles: {}", me.roles.join(", "));
    println!("Expires: {}", me.expires_at);
    Ok(())
}
