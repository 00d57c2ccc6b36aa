use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use super::oauth::{self, OAuthCredentials};
use super::PostingService;

pub const DEFAULT_X_BASE: &str = "https://api.twitter.com";

/// Posts to X through `POST /2/tweets` with OAuth 1.0a user-context auth.
pub struct XPoster {
    http: reqwest::Client,
    base_url: String,
    creds: OAuthCredentials,
}

impl XPoster {
    pub fn new(base_url: impl Into<String>, creds: OAuthCredentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("news-digest-bot/0.1")
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .context("building x http client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            creds,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/2/tweets", self.base_url)
    }
}

#[derive(Serialize)]
struct CreatePost<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct CreatePostResp {
    data: CreatedPost,
}

#[derive(Deserialize)]
struct CreatedPost {
    id: String,
}

#[async_trait::async_trait]
impl PostingService for XPoster {
    async fn create_post(&self, text: &str) -> Result<String> {
        let url = self.endpoint();
        let auth = oauth::authorization_header(
            &self.creds,
            "POST",
            &url,
            chrono::Utc::now().timestamp(),
            &oauth::nonce(),
        )?;

        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, auth)
            .json(&CreatePost { text })
            .send()
            .await
            .context("x post request")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("x post failed with {status}: {body}");
        }

        let created: CreatePostResp = resp.json().await.context("decoding x post response")?;
        Ok(created.data.id)
    }

    fn name(&self) -> &'static str {
        "x"
    }
}
