use anyhow::{bail, Context, Result};
use reqwest::{header, Client};
use tracing::{debug, info};

use crate::{config::SourceConfig, domain::Region};

/// Downloads the schedule page as served to a regular browser.
pub struct PageFetcher {
    client: Client,
    config: SourceConfig,
}

impl PageFetcher {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("uk-UA,uk;q=0.9,en;q=0.5"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    pub async fn fetch(&self, region: &Region) -> Result<String> {
        let url = self.config.url.clone();
        if let Some(selector) = &region.selector {
            debug!(target: "fetch", region = %region.id, %selector, "region selector is not applied by plain HTTP fetch");
        }

        info!(target: "fetch", %url, "loading page");
        let response = self
            .client
            .get(url.clone())
            .timeout(self.config.fetch_timeout)
            .send()
            .await
            .with_context(|| format!("failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {} for {}", status, url);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read body of {}", url))?;
        debug!(target: "fetch", bytes = body.len(), "page loaded");
        Ok(body)
    }
}
