use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::ImageSearch;
use crate::config::UnsplashConfig;

#[derive(Clone)]
pub struct UnsplashClient {
    http: reqwest::Client,
    config: UnsplashConfig,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

impl UnsplashClient {
    pub fn new(config: UnsplashConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ImageSearch for UnsplashClient {
    async fn first_image(&self, query: &str) -> anyhow::Result<Option<String>> {
        let Some(key) = self.config.access_key.as_deref() else {
            debug!("UNSPLASH_ACCESS_KEY not set; skipping image search");
            return Ok(None);
        };

        let url = format!("{}/search/photos", self.config.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Client-ID {key}"))
            .query(&[("page", "1"), ("query", query), ("orientation", "landscape")])
            .send()
            .await
            .context("unsplash search")?
            .error_for_status()?
            .json()
            .await
            .context("decode unsplash response")?;

        Ok(first_regular_url(resp))
    }
}

fn first_regular_url(resp: SearchResponse) -> Option<String> {
    resp.results.into_iter().next().map(|p| p.urls.regular)
}
