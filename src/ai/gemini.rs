use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::TextGenerator;
use crate::config::GeminiConfig;

/// Client for the Gemini `generateContent` REST API.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// A model as reported by the models listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn api_key(&self) -> anyhow::Result<&str> {
        self.config
            .api_key
            .as_deref()
            .context("GEMINI_API_KEY is not configured")
    }

    pub async fn list_models(&self) -> anyhow::Result<Vec<ModelInfo>> {
        let key = self.api_key()?;
        let url = format!("{}/models", self.config.base_url.trim_end_matches('/'));
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self
                .http
                .get(&url)
                .header("x-goog-api-key", key)
                .query(&[("pageSize", "1000")]);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token.as_str())]);
            }
            let page: ListModelsResponse = req
                .send()
                .await
                .context("gemini list models")?
                .error_for_status()?
                .json()
                .await
                .context("decode gemini models")?;

            models.extend(page.models);
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(t) => page_token = Some(t),
                None => break,
            }
        }
        Ok(models)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let key = self.api_key()?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp: GenerateResponse = self
            .http
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await
            .context("gemini generateContent")?
            .error_for_status()?
            .json()
            .await
            .context("decode gemini response")?;

        let text = first_candidate_text(resp).context("gemini returned no text")?;
        debug!(chars = text.len(), "gemini responded");
        Ok(text)
    }
}

fn first_candidate_text(resp: GenerateResponse) -> Option<String> {
    let parts = resp.candidates.into_iter().next()?.content?.parts;
    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_from_first_candidate() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#;
        let resp: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(first_candidate_text(resp).as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn empty_candidates_yield_none() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(first_candidate_text(resp).is_none());
    }

    #[test]
    fn model_info_detects_generate_content() {
        let raw = r#"{"models":[
            {"name":"models/a","supportedGenerationMethods":["generateContent","countTokens"]},
            {"name":"models/b","supportedGenerationMethods":["embedContent"]}
        ]}"#;
        let page: ListModelsResponse = serde_json::from_str(raw).unwrap();
        let names: Vec<_> = page
            .models
            .iter()
            .filter(|m| m.supports_generate_content())
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["models/a"]);
        assert!(page.next_page_token.is_none());
    }

    #[tokio::test]
    async fn generate_without_key_fails() {
        let client = GeminiClient::new(GeminiConfig {
            api_key: None,
            model: "m".into(),
            base_url: "http://127.0.0.1:9".into(),
        });
        let err = client.generate("hi").await.unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
