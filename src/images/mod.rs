use async_trait::async_trait;
use tracing::warn;

mod unsplash;

pub use unsplash::UnsplashClient;

/// Stock photo used when a trip or destination image cannot be found.
pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1476514525535-07fb3b4ae5f1";

/// Placeholder used for explore category tiles.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://placehold.co/800x600/00b4d8/FFFFFF?text=Image+Not+Found";

/// Keyword photo search.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// URL of the first matching photo, `None` when nothing matched or search
    /// is not configured.
    async fn first_image(&self, query: &str) -> anyhow::Result<Option<String>>;
}

/// Best-effort lookup: any error or empty result falls back to `fallback`.
pub async fn image_or_fallback(search: &dyn ImageSearch, query: &str, fallback: &str) -> String {
    match search.first_image(query).await {
        Ok(Some(url)) => url,
        Ok(None) => fallback.to_string(),
        Err(e) => {
            warn!(error = %e, %query, "could not fetch image");
            fallback.to_string()
        }
    }
}

#[cfg(test)]
mod image_tests {
    use super::*;

    struct Fixed(anyhow::Result<Option<String>>);

    #[async_trait]
    impl ImageSearch for Fixed {
        async fn first_image(&self, _query: &str) -> anyhow::Result<Option<String>> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(e) => Err(anyhow::anyhow!(e.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn uses_found_image() {
        let search = Fixed(Ok(Some("https://img/1.jpg".into())));
        let url = image_or_fallback(&search, "goa", DEFAULT_IMAGE_URL).await;
        assert_eq!(url, "https://img/1.jpg");
    }

    #[tokio::test]
    async fn falls_back_when_nothing_found() {
        let search = Fixed(Ok(None));
        let url = image_or_fallback(&search, "goa", PLACEHOLDER_IMAGE_URL).await;
        assert_eq!(url, PLACEHOLDER_IMAGE_URL);
    }

    #[tokio::test]
    async fn falls_back_on_error() {
        let search = Fixed(Err(anyhow::anyhow!("503")));
        let url = image_or_fallback(&search, "goa", DEFAULT_IMAGE_URL).await;
        assert_eq!(url, DEFAULT_IMAGE_URL);
    }
}
