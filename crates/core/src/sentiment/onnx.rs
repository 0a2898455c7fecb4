//! Pretrained sentiment classifier run in-process with ONNX Runtime.
//!
//! Expects a Hugging Face text-classification export, such as
//! `distilbert-base-uncased-finetuned-sst-2-english`, in one directory:
//! - `model.onnx` taking `input_ids` and `attention_mask`, returning logits `[1, labels]`
//! - `tokenizer.json`
//! - `config.json` (optional), whose `id2label` names the logits; SST-2 order otherwise

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use serde::Deserialize;
use tokenizers::{Tokenizer, TruncationParams};

use crate::constants::{MAX_SEQUENCE_LENGTH, MODEL_WARM_UP_TEXT, SST2_LABELS};
use crate::error::{NotetakerError, NotetakerResult};

use super::{ModelLabel, SentimentModel};

#[derive(Debug, Deserialize)]
struct ModelConfigFile {
    #[serde(default)]
    id2label: BTreeMap<String, String>,
}

/// Binary sentiment classifier backed by an ONNX model on disk.
///
/// The session sits behind a `Mutex` because `Session::run` needs `&mut self`, while
/// `SentimentModel` is shared read-only between requests.
pub struct OnnxModel {
    name: String,
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    labels: Vec<String>,
}

impl OnnxModel {
    /// Loads the model and tokenizer from `model_dir` and runs one warm-up classification.
    ///
    /// # Errors
    ///
    /// - `NotetakerError::ModelNotFound` if `model.onnx` or `tokenizer.json` is missing.
    /// - `NotetakerError::ModelInit` if a file cannot be parsed or the session cannot be built.
    /// - Any classification error raised by the warm-up call.
    pub fn load(model_dir: &Path) -> NotetakerResult<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        for path in [&model_path, &tokenizer_path] {
            if !path.exists() {
                return Err(NotetakerError::ModelNotFound(path.clone()));
            }
        }

        let labels = read_labels(model_dir)?;

        let session = Session::builder()
            .map_err(|e: ort::Error| NotetakerError::ModelInit(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e: ort::Error| NotetakerError::ModelInit(e.to_string()))?
            .commit_from_file(&model_path)
            .map_err(|e: ort::Error| {
                NotetakerError::ModelInit(format!("ONNX load failed: {e}"))
            })?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| NotetakerError::ModelInit(format!("tokenizer load failed: {e}")))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| NotetakerError::ModelInit(format!("tokenizer truncation: {e}")))?;

        let model = Self {
            name: model_dir.display().to_string(),
            session: Mutex::new(session),
            tokenizer,
            labels,
        };

        let label = model.classify(MODEL_WARM_UP_TEXT)?;
        tracing::debug!(model = model.name(), label = ?label, "warm-up classification");

        Ok(model)
    }

    fn logits(&self, text: &str) -> NotetakerResult<Vec<f32>> {
        use ort::value::TensorRef;

        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| NotetakerError::ModelResponse(format!("tokenization failed: {e}")))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| i64::from(m))
            .collect();
        let seq_len = input_ids.len();

        let ids_array =
            ndarray::Array2::from_shape_vec((1, seq_len), input_ids).map_err(inference_error)?;
        let mask_array = ndarray::Array2::from_shape_vec((1, seq_len), attention_mask)
            .map_err(inference_error)?;

        let ids_tensor = TensorRef::from_array_view(&ids_array).map_err(inference_error)?;
        let mask_tensor = TensorRef::from_array_view(&mask_array).map_err(inference_error)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| NotetakerError::ModelResponse("session lock poisoned".into()))?;

        let outputs = session
            .run(ort::inputs![ids_tensor, mask_tensor])
            .map_err(inference_error)?;

        let (_shape, logits) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(inference_error)?;

        Ok(logits.to_vec())
    }
}

impl SentimentModel for OnnxModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn classify(&self, text: &str) -> NotetakerResult<ModelLabel> {
        let logits = self.logits(text)?;
        label_for_logits(&logits, &self.labels)
    }
}

fn inference_error(e: impl std::fmt::Display) -> NotetakerError {
    NotetakerError::ModelResponse(format!("ONNX inference failed: {e}"))
}

/// Names the highest logit. SST-2 has no neutral class, so the answer is always one of the
/// configured labels.
fn label_for_logits(logits: &[f32], labels: &[String]) -> NotetakerResult<ModelLabel> {
    if logits.len() != labels.len() {
        return Err(NotetakerError::ModelResponse(format!(
            "expected {} logits, got {}",
            labels.len(),
            logits.len()
        )));
    }

    logits
        .iter()
        .zip(labels)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, label)| ModelLabel::from_raw(label))
        .ok_or_else(|| NotetakerError::ModelResponse("model returned no logits".into()))
}

fn read_labels(model_dir: &Path) -> NotetakerResult<Vec<String>> {
    let path = model_dir.join("config.json");
    if !path.exists() {
        return Ok(default_labels());
    }

    let raw = std::fs::read_to_string(&path).map_err(|e| {
        NotetakerError::ModelInit(format!("failed to read {}: {e}", path.display()))
    })?;
    labels_from_config(&raw)
}

fn default_labels() -> Vec<String> {
    SST2_LABELS.iter().map(|label| label.to_string()).collect()
}

/// Orders the `id2label` entries of a model `config.json` by index.
fn labels_from_config(raw: &str) -> NotetakerResult<Vec<String>> {
    let parsed: ModelConfigFile = serde_json::from_str(raw)
        .map_err(|e| NotetakerError::ModelInit(format!("invalid model config: {e}")))?;

    if parsed.id2label.is_empty() {
        return Ok(default_labels());
    }

    let mut labels = vec![None; parsed.id2label.len()];
    for (id, label) in parsed.id2label {
        let slot = id
            .parse::<usize>()
            .ok()
            .and_then(|index| labels.get_mut(index))
            .ok_or_else(|| NotetakerError::ModelInit(format!("invalid id2label index '{id}'")))?;
        *slot = Some(label);
    }

    labels
        .into_iter()
        .collect::<Option<Vec<String>>>()
        .ok_or_else(|| NotetakerError::ModelInit("id2label indices are not contiguous".into()))
}
