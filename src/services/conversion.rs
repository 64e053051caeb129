use crate::config::ConverterConfig;
use crate::services::extractor::{ExtractError, TextExtractor};
use crate::services::staging::StagedFile;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single conversion. Every variant is terminal for its request.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("failed to stage upload: {0}")]
    Staging(#[source] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ExtractError),

    #[error("parser did not finish within {0:?}")]
    Timeout(Duration),

    #[error("failed to remove staged file: {0}")]
    Cleanup(#[source] std::io::Error),
}

/// Stages an upload, runs the extractor over it and removes it again.
pub struct ConversionService {
    config: ConverterConfig,
    extractor: Arc<dyn TextExtractor>,
}

impl ConversionService {
    pub fn new(config: ConverterConfig, extractor: Arc<dyn TextExtractor>) -> Self {
        Self { config, extractor }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.config.scratch_dir
    }

    pub fn extractor_name(&self) -> &'static str {
        self.extractor.name()
    }

    /// Converts one uploaded PDF to text.
    ///
    /// Write, parse and delete run strictly in that order. The staged file is
    /// removed whatever the parse outcome; a failed removal fails the whole
    /// conversion unless the parse had already failed, in which case the
    /// parse error wins and the removal error is only logged.
    pub async fn convert(&self, bytes: &[u8]) -> Result<String, ConversionError> {
        let staged = StagedFile::create(&self.config.scratch_dir, bytes)
            .await
            .map_err(ConversionError::Staging)?;

        let parsed = self.parse(staged.path()).await;
        let removed = staged.remove().await;

        match (parsed, removed) {
            (Ok(text), Ok(())) => Ok(text),
            (Ok(_), Err(e)) => Err(ConversionError::Cleanup(e)),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup)) => {
                tracing::error!("Failed to remove staged file after parse error: {}", cleanup);
                Err(e)
            }
        }
    }

    async fn parse(&self, path: &Path) -> Result<String, ConversionError> {
        let extraction = self.extractor.extract(path);

        match self.config.parse_timeout {
            Some(limit) => tokio::time::timeout(limit, extraction)
                .await
                .map_err(|_| ConversionError::Timeout(limit))?
                .map_err(ConversionError::from),
            None => extraction.await.map_err(ConversionError::from),
        }
    }
}
