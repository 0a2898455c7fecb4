use std::sync::Arc;

use crate::config::{OnnxModelConfig, SentimentBackend};
use crate::constants::MODEL_LOAD_ATTEMPTS;
use crate::error::{NotetakerError, NotetakerResult};

use super::{LexiconModel, RemoteModel};

/// Raw verdict of a binary sentiment classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelLabel {
    Positive,
    Negative,
    /// Any label other than positive or negative, kept verbatim.
    Other(String),
}

impl ModelLabel {
    /// Parses a classifier label; `POSITIVE` and `NEGATIVE` are matched case-insensitively.
    pub fn from_raw(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("POSITIVE") {
            Self::Positive
        } else if label.eq_ignore_ascii_case("NEGATIVE") {
            Self::Negative
        } else {
            Self::Other(label.to_string())
        }
    }
}

/// Fallback classifier consulted when no vocabulary rule decides the sentiment.
///
/// Implementations are loaded once at startup and shared read-only between requests, so they
/// must be `Send + Sync`. `classify` may block (network I/O).
pub trait SentimentModel: Send + Sync {
    /// Human-readable identifier used in logs.
    fn name(&self) -> &str;

    fn classify(&self, text: &str) -> NotetakerResult<ModelLabel>;
}

/// Runs `load` up to `attempts` times, returning the first success.
///
/// # Errors
///
/// Returns `NotetakerError::ModelLoad` wrapping the last failure once every attempt has failed.
pub fn load_with_retry<T, F>(model: &str, attempts: u32, mut load: F) -> NotetakerResult<T>
where
    F: FnMut() -> NotetakerResult<T>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match load() {
            Ok(loaded) => {
                tracing::info!(model, attempt, "sentiment model loaded");
                return Ok(loaded);
            }
            Err(e) if attempt < attempts => {
                tracing::warn!(model, attempt, "sentiment model load failed, retrying: {}", e);
                attempt += 1;
            }
            Err(e) => {
                return Err(NotetakerError::ModelLoad {
                    model: model.to_string(),
                    attempts,
                    source: Box::new(e),
                });
            }
        }
    }
}

/// Builds the configured fallback model.
///
/// The lexicon model cannot fail. The remote and onnx models are warmed up with one
/// classification and the load is retried once before giving up.
///
/// # Errors
///
/// - `NotetakerError::ModelLoad` if the remote or onnx model could not be loaded.
/// - `NotetakerError::InvalidInput` if the onnx backend is selected in a build without the
///   `onnx` feature.
pub fn load_model(backend: &SentimentBackend) -> NotetakerResult<Arc<dyn SentimentModel>> {
    match backend {
        SentimentBackend::Lexicon => Ok(Arc::new(LexiconModel::new())),
        SentimentBackend::Remote(cfg) => {
            let model = load_with_retry(cfg.endpoint.as_str(), MODEL_LOAD_ATTEMPTS, || {
                RemoteModel::load(cfg)
            })?;
            Ok(Arc::new(model))
        }
        SentimentBackend::Onnx(cfg) => load_onnx(cfg),
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(cfg: &OnnxModelConfig) -> NotetakerResult<Arc<dyn SentimentModel>> {
    let name = cfg.model_dir.display().to_string();
    let model = load_with_retry(&name, MODEL_LOAD_ATTEMPTS, || {
        super::OnnxModel::load(&cfg.model_dir)
    })?;
    Ok(Arc::new(model))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(cfg: &OnnxModelConfig) -> NotetakerResult<Arc<dyn SentimentModel>> {
    Err(NotetakerError::InvalidInput(format!(
        "cannot load ONNX model from {}: built without the `onnx` feature",
        cfg.model_dir.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteModelConfig;
    use notetaker_types::NonEmptyText;
    use std::time::Duration;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!(ModelLabel::from_raw("POSITIVE"), ModelLabel::Positive);
        assert_eq!(ModelLabel::from_raw("negative"), ModelLabel::Negative);
        assert_eq!(
            ModelLabel::from_raw("LABEL_2"),
            ModelLabel::Other("LABEL_2".into())
        );
    }

    #[test]
    fn retry_recovers_from_one_failure() {
        let mut calls = 0;
        let loaded = load_with_retry("flaky", 2, || {
            calls += 1;
            if calls == 1 {
                Err(NotetakerError::ModelResponse("warming up".into()))
            } else {
                Ok(calls)
            }
        })
        .expect("second attempt succeeds");
        assert_eq!(loaded, 2);
    }

    #[test]
    fn retry_gives_up_after_all_attempts() {
        let mut calls = 0;
        let err = load_with_retry::<(), _>("down", 2, || {
            calls += 1;
            Err(NotetakerError::ModelResponse(format!("attempt {calls}")))
        })
        .expect_err("both attempts fail");

        assert_eq!(calls, 2);
        match err {
            NotetakerError::ModelLoad {
                model,
                attempts,
                source,
            } => {
                assert_eq!(model, "down");
                assert_eq!(attempts, 2);
                assert!(source.to_string().contains("attempt 2"));
            }
            other => panic!("expected ModelLoad error, got {other:?}"),
        }
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let mut calls = 0;
        let _ = load_with_retry::<(), _>("once", 0, || {
            calls += 1;
            Err(NotetakerError::ModelResponse("no".into()))
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn unreachable_remote_model_fails_after_retry() {
        let backend = SentimentBackend::Remote(RemoteModelConfig {
            endpoint: NonEmptyText::new("http://127.0.0.1:9/classify").expect("valid"),
            api_token: None,
            timeout: Duration::from_secs(2),
        });

        let err = load_model(&backend).err().expect("nothing listens on port 9");
        match err {
            NotetakerError::ModelLoad {
                model,
                attempts,
                source,
            } => {
                assert_eq!(model, "http://127.0.0.1:9/classify");
                assert_eq!(attempts, MODEL_LOAD_ATTEMPTS);
                assert!(matches!(*source, NotetakerError::ModelRequest(_)), "{source:?}");
            }
            other => panic!("expected ModelLoad error, got {other:?}"),
        }
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn onnx_backend_needs_feature() {
        let backend = SentimentBackend::Onnx(OnnxModelConfig {
            model_dir: "models/sst2".into(),
        });
        let err = load_model(&backend).err().expect("feature disabled");
        assert!(matches!(err, NotetakerError::InvalidInput(msg) if msg.contains("`onnx` feature")));
    }

    #[cfg(feature = "onnx")]
    #[test]
    fn missing_onnx_model_fails_after_retry() {
        let dir = tempfile::tempdir().expect("temp dir");
        let backend = SentimentBackend::Onnx(OnnxModelConfig {
            model_dir: dir.path().to_path_buf(),
        });
        let err = load_model(&backend).err().expect("no model files");
        assert!(
            matches!(
                &err,
                NotetakerError::ModelLoad { attempts: 2, source, .. }
                    if matches!(**source, NotetakerError::ModelNotFound(_))
            ),
            "{err:?}"
        );
    }

    #[test]
    fn lexicon_backend_always_loads() {
        let model = load_model(&SentimentBackend::Lexicon).expect("lexicon loads");
        assert_eq!(model.name(), "lexicon");
    }
}
