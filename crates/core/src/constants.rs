//! Constants used throughout the notetaker core crate.
//!
//! Vocabularies, name patterns and model defaults. Canonical output labels are declared on
//! their enums.

/// Literal, case-sensitive name patterns that all resolve to "Janet Jones".
pub const PATIENT_NAME_PATTERNS: &[&str] = &["Ms. Jones", "Mrs. Jones", "Mr. Jones", "Janet Jones"];

/// Dialogue vocabulary that marks the patient as anxious. Checked first.
pub const ANXIETY_VOCABULARY: &[&str] = &["worried", "concerned", "anxious", "nervous"];

/// Dialogue vocabulary that marks the patient as reassured.
pub const GRATITUDE_VOCABULARY: &[&str] = &["relief", "thankful", "grateful", "appreciate"];

/// Phrases that mark a routine visit.
pub const ROUTINE_PHRASES: &[&str] = &["no complaints", "nothing to report"];

/// Label the lexicon model reports when positive and negative cues balance out.
pub const NEUTRAL_MODEL_LABEL: &str = "NEUTRAL";

/// Default remote text-classification endpoint (SST-2 fine-tuned DistilBERT).
pub const DEFAULT_SENTIMENT_URL: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";

/// Default directory of the local SST-2 DistilBERT ONNX export (`model.onnx`, `tokenizer.json`).
pub const DEFAULT_SENTIMENT_MODEL_DIR: &str =
    "models/distilbert-base-uncased-finetuned-sst-2-english";

/// Labels of the SST-2 classification head, by output index.
pub const SST2_LABELS: [&str; 2] = ["NEGATIVE", "POSITIVE"];

/// Longest token sequence DistilBERT accepts.
pub const MAX_SEQUENCE_LENGTH: usize = 512;

/// Default timeout for a single remote classification request.
pub const DEFAULT_SENTIMENT_TIMEOUT_SECS: u64 = 30;

/// Number of times a model load is attempted before startup is abandoned.
pub const MODEL_LOAD_ATTEMPTS: u32 = 2;

/// Text used to warm up a remote model during loading.
pub const MODEL_WARM_UP_TEXT: &str = "The patient is doing well.";
