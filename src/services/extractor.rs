use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Why an extractor could not produce text for a document.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to load PDF: {0}")]
    Load(String),

    #[error("failed to extract text: {0}")]
    Text(String),

    #[error("extraction task failed: {0}")]
    Join(String),
}

/// Turns a PDF on disk into its flattened raw text.
///
/// Implementations resolve exactly once: either the document text or an
/// [`ExtractError`]. They must not block the async executor.
#[async_trait::async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the raw text content of every page, in page order
    async fn extract(&self, path: &Path) -> Result<String, ExtractError>;

    /// Short backend name, reported by the health endpoint
    fn name(&self) -> &'static str;
}

/// `lopdf`-backed extractor.
///
/// `lopdf` is synchronous, so loading and text extraction run on tokio's
/// blocking pool.
pub struct LopdfExtractor;

impl LopdfExtractor {
    fn extract_blocking(path: &Path) -> Result<String, ExtractError> {
        let doc = lopdf::Document::load(path).map_err(|e| ExtractError::Load(e.to_string()))?;

        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        if pages.is_empty() {
            return Ok(String::new());
        }

        doc.extract_text(&pages)
            .map_err(|e| ExtractError::Text(e.to_string()))
    }
}

#[async_trait::async_trait]
impl TextExtractor for LopdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::extract_blocking(&path))
            .await
            .map_err(|e| ExtractError::Join(e.to_string()))?
    }

    fn name(&self) -> &'static str {
        "lopdf"
    }
}

/// Factory function to create the extractor named in config
pub fn create_extractor(kind: &str) -> Arc<dyn TextExtractor> {
    match kind.to_lowercase().as_str() {
        "lopdf" => Arc::new(LopdfExtractor),
        _ => {
            tracing::warn!("Unknown extractor '{}', using lopdf", kind);
            Arc::new(LopdfExtractor)
        }
    }
}
