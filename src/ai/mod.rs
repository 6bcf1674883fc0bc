use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

mod gemini;

pub use gemini::{GeminiClient, ModelInfo};

/// Prompt in, free-form text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Remove markdown code-fence markers the model wraps around its JSON.
pub fn strip_code_fences(text: &str) -> String {
    lazy_static! {
        static ref FENCE_RE: Regex = Regex::new(r"```(?:json)?").unwrap();
    }
    FENCE_RE.replace_all(text.trim(), "").trim().to_string()
}
