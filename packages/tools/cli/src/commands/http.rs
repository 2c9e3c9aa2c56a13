use anyhow::Context as _;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::CliConfig;

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

pub fn client() -> Client {
    Client::new()
}

pub fn with_auth(config: &CliConfig, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
    let token = config.get_auth_token()?;
    Ok(req.bearer_auth(token))
}

pub async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> anyhow::Result<T> {
    let resp = req.send().await.context("request failed")?;
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(body) => anyhow::anyhow!(
                "request failed ({}): {} - {}",
                status,
                body.error.code,
                body.error.message
            ),
            Err(_) => anyhow::anyhow!("request failed ({}): {}", status, text),
        });
    }
    let body = resp.json::<T>().await.context("invalid json response")?;
    Ok(body)
}
