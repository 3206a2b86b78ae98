use crate::config::ReleaseConfig;
use crate::error::{LauncherError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Latest release metadata. Only the asset list is relied upon.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

pub struct ReleaseClient {
    http_client: Client,
    api_base: String,
}

impl ReleaseClient {
    pub fn new(config: &ReleaseConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers);

        // No timeout unless configured; a hung request blocks the update.
        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http_client: builder.build()?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// The underlying HTTP client, shared with the asset download
    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub fn latest_release_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/releases/latest", self.api_base, repo)
    }

    /// Fetch the latest release of `repo` (`owner/name`). Single attempt.
    pub async fn fetch_latest_release(&self, repo: &str) -> Result<Release> {
        let url = self.latest_release_url(repo);
        tracing::info!("Fetching latest release for {}", repo);

        let release = self.get_json(&url).await.map_err(|source| {
            tracing::error!("Fetching latest release for {}: {}", repo, source);
            LauncherError::ReleaseFetch {
                repo: repo.to_string(),
                source,
            }
        })?;

        tracing::debug!(
            "Release {} has {} assets",
            release.tag_name.as_deref().unwrap_or("<untagged>"),
            release.assets.len()
        );
        Ok(release)
    }

    async fn get_json(&self, url: &str) -> reqwest::Result<Release> {
        self.http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Release>()
            .await
    }
}
