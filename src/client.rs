use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use reqwest::{Client, Response};
use tracing::debug;

use crate::models::Activity;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

pub struct ActivitiesClient {
    client: Client,
    base_url: String,
}

impl ActivitiesClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn activity_url(&self, activity: &str, action: &str) -> String {
        format!(
            "{}/activities/{}/{}",
            self.base_url,
            urlencoding::encode(activity),
            action
        )
    }

    pub async fn list(&self) -> Result<IndexMap<String, Activity>> {
        let url = format!("{}/activities", self.base_url);
        debug!("GET {}", url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?;
        let resp = check(resp).await?;
        resp.json().await.context("Failed to parse activities")
    }

    /// Returns the server's confirmation message.
    pub async fn signup(&self, activity: &str, email: &str) -> Result<String> {
        let url = self.activity_url(activity, "signup");
        debug!("POST {} email={}", url, email);
        let resp = self
            .client
            .post(&url)
            .query(&[("email", email)])
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?;
        message(check(resp).await?).await
    }

    /// Returns the server's confirmation message.
    pub async fn unregister(&self, activity: &str, email: &str) -> Result<String> {
        let url = self.activity_url(activity, "participants");
        debug!("DELETE {} email={}", url, email);
        let resp = self
            .client
            .delete(&url)
            .query(&[("email", email)])
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base_url))?;
        message(check(resp).await?).await
    }
}

/// Turn a non-2xx response into an error carrying the server's `detail`.
async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body: serde_json::Value = resp.json().await.unwrap_or_default();
    let detail = body
        .get("detail")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown error");
    bail!("{} ({})", detail, status)
}

async fn message(resp: Response) -> Result<String> {
    let body: serde_json::Value = resp.json().await.context("Failed to parse response")?;
    Ok(body
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("OK")
        .to_string())
}
