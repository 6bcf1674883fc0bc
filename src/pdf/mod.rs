use std::process::Stdio;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF engine `{engine}` is not available: {reason}")]
    Unavailable { engine: String, reason: String },

    #[error("PDF engine failed: {0}")]
    Failed(String),
}

/// HTML in, PDF bytes out.
#[async_trait]
pub trait PdfEngine: Send + Sync {
    async fn render(&self, html: &str) -> Result<Bytes, PdfError>;
}

/// Pipes HTML through an external converter that reads stdin and writes the
/// PDF to stdout (`weasyprint - -`, `wkhtmltopdf - -`).
#[derive(Debug, Clone)]
pub struct CommandPdfEngine {
    program: String,
}

impl CommandPdfEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl PdfEngine for CommandPdfEngine {
    #[instrument(skip(self, html), fields(engine = %self.program))]
    async fn render(&self, html: &str) -> Result<Bytes, PdfError> {
        let mut child = tokio::process::Command::new(&self.program)
            .args(["-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PdfError::Unavailable {
                engine: self.program.clone(),
                reason: e.to_string(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(html.as_bytes())
                .await
                .map_err(|e| PdfError::Failed(format!("write to engine stdin: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| PdfError::Failed(format!("wait for engine: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PdfError::Failed(format!(
                "exit {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(PdfError::Failed("engine produced no output".into()));
        }

        debug!(bytes = output.stdout.len(), "pdf rendered");
        Ok(Bytes::from(output.stdout))
    }
}

/// Filename-safe form of a destination for `Content-Disposition`.
pub fn attachment_filename(destination: &str) -> String {
    let slug: String = destination
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "itinerary.pdf".to_string()
    } else {
        format!("itinerary-{slug}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let engine = CommandPdfEngine::new("definitely-not-a-pdf-engine-4f2a");
        let err = engine.render("<p>hi</p>").await.unwrap_err();
        assert!(matches!(err, PdfError::Unavailable { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn pipes_html_through_program() {
        // `cat - -` copies stdin to stdout once, standing in for a converter.
        let engine = CommandPdfEngine::new("cat");
        let out = engine.render("%PDF-fake").await.expect("render");
        assert_eq!(&out[..], b"%PDF-fake");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_program_is_an_error() {
        let engine = CommandPdfEngine::new("false");
        let err = engine.render("<p>hi</p>").await.unwrap_err();
        assert!(matches!(err, PdfError::Failed(_)));
    }

    #[test]
    fn filename_is_sanitized() {
        assert_eq!(attachment_filename("Goa"), "itinerary-Goa.pdf");
        assert_eq!(attachment_filename("New York, USA"), "itinerary-New-York--USA.pdf");
        assert_eq!(attachment_filename("\"; rm"), "itinerary-rm.pdf");
        assert_eq!(attachment_filename("東京"), "itinerary.pdf");
    }
}
