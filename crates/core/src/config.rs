//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Core
//! code never reads environment variables while handling a request.

use std::path::PathBuf;
use std::time::Duration;

use notetaker_types::NonEmptyText;

use crate::constants::{
    DEFAULT_SENTIMENT_MODEL_DIR, DEFAULT_SENTIMENT_TIMEOUT_SECS, DEFAULT_SENTIMENT_URL,
};
use crate::{NotetakerError, NotetakerResult};

/// Environment variable selecting the fallback sentiment model.
pub const SENTIMENT_BACKEND_ENV: &str = "NOTETAKER_SENTIMENT_BACKEND";
/// Environment variable holding the remote model endpoint.
pub const SENTIMENT_URL_ENV: &str = "NOTETAKER_SENTIMENT_URL";
/// Environment variable holding the remote model bearer token.
pub const SENTIMENT_TOKEN_ENV: &str = "NOTETAKER_SENTIMENT_TOKEN";
/// Environment variable holding the remote request timeout in seconds.
pub const SENTIMENT_TIMEOUT_ENV: &str = "NOTETAKER_SENTIMENT_TIMEOUT_SECS";
/// Environment variable holding the directory of the local ONNX model.
pub const SENTIMENT_MODEL_DIR_ENV: &str = "NOTETAKER_SENTIMENT_MODEL_DIR";

/// Backend used when none is configured.
///
/// Builds with the `onnx` feature default to the local pretrained classifier. Other builds fall
/// back to the lexicon, which needs no model files.
pub const DEFAULT_SENTIMENT_BACKEND: &str = if cfg!(feature = "onnx") {
    "onnx"
} else {
    "lexicon"
};

/// Connection settings for a remote classifier.
#[derive(Clone)]
pub struct RemoteModelConfig {
    pub endpoint: NonEmptyText,
    pub api_token: Option<NonEmptyText>,
    pub timeout: Duration,
}

impl std::fmt::Debug for RemoteModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteModelConfig")
            .field("endpoint", &self.endpoint)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Location of a local ONNX text-classification model.
#[derive(Clone, Debug)]
pub struct OnnxModelConfig {
    /// Directory holding `model.onnx`, `tokenizer.json` and optionally `config.json`.
    pub model_dir: PathBuf,
}

/// Which fallback sentiment model to load.
#[derive(Clone, Debug)]
pub enum SentimentBackend {
    /// Built-in polarity lexicon. Works offline.
    Lexicon,
    /// Remote text-classification endpoint.
    Remote(RemoteModelConfig),
    /// Pretrained classifier run in-process with ONNX Runtime. Needs the `onnx` feature.
    Onnx(OnnxModelConfig),
}

impl SentimentBackend {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Lexicon => "lexicon",
            Self::Remote(_) => "remote",
            Self::Onnx(_) => "onnx",
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    sentiment_backend: SentimentBackend,
}

impl CoreConfig {
    pub fn new(sentiment_backend: SentimentBackend) -> Self {
        Self { sentiment_backend }
    }

    /// Reads the sentiment settings from the process environment.
    ///
    /// Intended for binaries at startup only.
    ///
    /// # Errors
    ///
    /// Returns `NotetakerError::InvalidInput` if any value is malformed.
    pub fn from_env() -> NotetakerResult<Self> {
        let backend = sentiment_backend_from_env_values(SentimentEnv {
            backend: std::env::var(SENTIMENT_BACKEND_ENV).ok(),
            url: std::env::var(SENTIMENT_URL_ENV).ok(),
            token: std::env::var(SENTIMENT_TOKEN_ENV).ok(),
            timeout_secs: std::env::var(SENTIMENT_TIMEOUT_ENV).ok(),
            model_dir: std::env::var(SENTIMENT_MODEL_DIR_ENV).ok(),
        })?;
        Ok(Self::new(backend))
    }

    pub fn sentiment_backend(&self) -> &SentimentBackend {
        &self.sentiment_backend
    }
}

/// Defaults to the lexicon backend whatever the build features, so a default config never needs
/// model files or network access.
impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(SentimentBackend::Lexicon)
    }
}

/// Raw sentiment settings as read from the environment.
#[derive(Debug, Default)]
pub struct SentimentEnv {
    pub backend: Option<String>,
    pub url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<String>,
    pub model_dir: Option<String>,
}

/// Parse the sentiment backend from optional raw values.
///
/// Missing or blank values take their defaults: [`DEFAULT_SENTIMENT_BACKEND`], the SST-2
/// DistilBERT endpoint, no token, a 30 second timeout and the bundled model directory. URL,
/// token and timeout are only read for the remote backend, the model directory only for the
/// onnx backend.
///
/// # Errors
///
/// Returns `NotetakerError::InvalidInput` if:
/// - the backend name is not `lexicon`, `remote` or `onnx`,
/// - the timeout is not a positive whole number of seconds.
pub fn sentiment_backend_from_env_values(env: SentimentEnv) -> NotetakerResult<SentimentBackend> {
    let backend = NonEmptyText::from_optional(env.backend);
    let name = backend
        .as_ref()
        .map(|b| b.as_str().to_ascii_lowercase())
        .unwrap_or_else(|| DEFAULT_SENTIMENT_BACKEND.into());

    match name.as_str() {
        "lexicon" => Ok(SentimentBackend::Lexicon),
        "remote" => {
            let endpoint = match NonEmptyText::from_optional(env.url) {
                Some(url) => url,
                None => NonEmptyText::new(DEFAULT_SENTIMENT_URL)?,
            };
            let timeout = timeout_from_env_value(env.timeout_secs)?;
            Ok(SentimentBackend::Remote(RemoteModelConfig {
                endpoint,
                api_token: NonEmptyText::from_optional(env.token),
                timeout,
            }))
        }
        "onnx" => {
            let model_dir = NonEmptyText::from_optional(env.model_dir)
                .map(|dir| PathBuf::from(dir.as_str()))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SENTIMENT_MODEL_DIR));
            Ok(SentimentBackend::Onnx(OnnxModelConfig { model_dir }))
        }
        other => Err(NotetakerError::InvalidInput(format!(
            "{} must be 'lexicon', 'remote' or 'onnx', got '{}'",
            SENTIMENT_BACKEND_ENV, other
        ))),
    }
}

fn timeout_from_env_value(value: Option<String>) -> NotetakerResult<Duration> {
    let Some(value) = NonEmptyText::from_optional(value) else {
        return Ok(Duration::from_secs(DEFAULT_SENTIMENT_TIMEOUT_SECS));
    };

    match value.as_str().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(NotetakerError::InvalidInput(format!(
            "{} must be a positive number of seconds, got '{}'",
            SENTIMENT_TIMEOUT_ENV, value
        ))),
    }
}
