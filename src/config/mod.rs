use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime configuration for the conversion service
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Directory where uploads are staged for the parser (default: OS temp dir)
    pub scratch_dir: PathBuf,

    /// Address the HTTP server binds to (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,

    /// Request body limit in bytes; `None` disables the limit (default: None)
    pub max_upload_size: Option<usize>,

    /// Upper bound on a single parse; `None` waits indefinitely (default: None)
    pub parse_timeout: Option<Duration>,

    /// Extractor backend name (default: "lopdf")
    pub extractor: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            scratch_dir: env::temp_dir(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_upload_size: None,
            parse_timeout: None,
            extractor: "lopdf".to_string(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            scratch_dir: env::var("SCRATCH_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default.scratch_dir),

            bind_addr: env::var("BIND_ADDR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.bind_addr),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .or(default.max_upload_size),

            parse_timeout: env::var("PARSE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&secs: &u64| secs > 0)
                .map(Duration::from_secs)
                .or(default.parse_timeout),

            extractor: env::var("PDF_EXTRACTOR").unwrap_or(default.extractor),
        }
    }

    /// Config rooted at an explicit scratch directory, everything else default.
    /// Used by tests to keep staged files isolated.
    pub fn for_scratch_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            scratch_dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Create config for development (stages under ./tmp, 60s parse bound)
    pub fn development() -> Self {
        Self {
            scratch_dir: PathBuf::from("./tmp"),
            parse_timeout: Some(Duration::from_secs(60)),
            ..Self::default()
        }
    }
}
