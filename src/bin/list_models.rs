//! Prints the Gemini models that support `generateContent`.

use tripwise::{ai::GeminiClient, config::GeminiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tripwise::init_tracing("list_models=info,tripwise=info");

    let api_key = std::env::var("GEMINI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    if api_key.is_none() {
        anyhow::bail!("GEMINI_API_KEY not found in environment or .env file");
    }

    let client = GeminiClient::new(GeminiConfig {
        api_key,
        model: String::new(),
        base_url: std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into()),
    });

    println!("Available models that support 'generateContent':");
    println!("---------------------------------------------");
    for model in client.list_models().await? {
        if model.supports_generate_content() {
            println!("{}", model.name);
        }
    }
    Ok(())
}
