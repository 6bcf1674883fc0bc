use serde::Deserialize;
use tracing::warn;

const DEFAULT_SECRET_KEY: &str = "your_super_secret_key";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnsplashConfig {
    pub access_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
    /// Shared admin password, compared as plaintext.
    pub admin_password: String,
    pub gemini: GeminiConfig,
    pub unsplash: UnsplashConfig,
    pub pdf_engine: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;

        let secret = std::env::var("SECRET_KEY").unwrap_or_else(|_| {
            warn!("SECRET_KEY not set; using the insecure development default");
            DEFAULT_SECRET_KEY.into()
        });
        let session = SessionConfig {
            secret,
            issuer: "tripwise".into(),
            audience: "tripwise-session".into(),
            ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24 * 7),
        };

        let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            warn!("ADMIN_PASSWORD not set; using the insecure development default");
            DEFAULT_ADMIN_PASSWORD.into()
        });

        let gemini = GeminiConfig {
            api_key: non_empty_var("GEMINI_API_KEY"),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash-lite".into()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into()),
        };
        if gemini.api_key.is_none() {
            warn!("GEMINI_API_KEY not set; AI features are disabled until provided");
        }

        let unsplash = UnsplashConfig {
            access_key: non_empty_var("UNSPLASH_ACCESS_KEY"),
            base_url: std::env::var("UNSPLASH_BASE_URL")
                .unwrap_or_else(|_| "https://api.unsplash.com".into()),
        };

        let pdf_engine = std::env::var("PDF_ENGINE").unwrap_or_else(|_| "weasyprint".into());

        Ok(Self {
            database_url,
            session,
            admin_password,
            gemini,
            unsplash,
            pdf_engine,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
