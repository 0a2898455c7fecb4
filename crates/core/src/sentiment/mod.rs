//! Patient sentiment and intent classification.
//!
//! Classification is a cascade evaluated top to bottom, stopping at the first hit:
//! anxiety vocabulary, gratitude vocabulary, routine-visit phrases, and finally the fallback
//! [`SentimentModel`]. Vocabulary rules are plain substring tests on the lowercased text.

mod lexicon;
mod model;
#[cfg(feature = "onnx")]
mod onnx;
mod remote;

pub use lexicon::LexiconModel;
pub use model::{load_model, load_with_retry, ModelLabel, SentimentModel};
#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;
pub use remote::RemoteModel;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{ANXIETY_VOCABULARY, GRATITUDE_VOCABULARY, ROUTINE_PHRASES};
use crate::rules::canonical_labels;

canonical_labels! {
    pub enum Sentiment {
        Anxious => "Anxious",
        Reassured => "Reassured",
        Neutral => "Neutral",
    }
}

canonical_labels! {
    pub enum Intent {
        SeekingReassurance => "Seeking reassurance",
        ExpressingGratitude => "Expressing gratitude",
        RoutineVisit => "Routine visit/checkup",
        ReportingSymptoms => "Reporting symptoms",
    }
}

/// Sentiment of a piece of patient dialogue and the intent it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SentimentResult {
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    #[serde(rename = "Intent")]
    pub intent: Intent,
}

impl SentimentResult {
    pub const ANXIOUS: Self = Self {
        sentiment: Sentiment::Anxious,
        intent: Intent::SeekingReassurance,
    };
    pub const REASSURED: Self = Self {
        sentiment: Sentiment::Reassured,
        intent: Intent::ExpressingGratitude,
    };
    pub const ROUTINE: Self = Self {
        sentiment: Sentiment::Neutral,
        intent: Intent::RoutineVisit,
    };
    pub const REPORTING_SYMPTOMS: Self = Self {
        sentiment: Sentiment::Neutral,
        intent: Intent::ReportingSymptoms,
    };

    /// Maps a fallback model label to a result.
    pub fn from_model_label(label: &ModelLabel) -> Self {
        match label {
            ModelLabel::Negative => Self::ANXIOUS,
            ModelLabel::Positive => Self::REASSURED,
            ModelLabel::Other(_) => Self::REPORTING_SYMPTOMS,
        }
    }
}

/// Applies the vocabulary rules only. `None` means the fallback model must decide.
pub fn classify_by_vocabulary(text: &str) -> Option<SentimentResult> {
    let lowered = text.to_lowercase();
    let contains_any = |words: &[&str]| words.iter().any(|word| lowered.contains(word));

    if contains_any(ANXIETY_VOCABULARY) {
        tracing::debug!(rule = "anxiety_vocabulary", "sentiment decided");
        Some(SentimentResult::ANXIOUS)
    } else if contains_any(GRATITUDE_VOCABULARY) {
        tracing::debug!(rule = "gratitude_vocabulary", "sentiment decided");
        Some(SentimentResult::REASSURED)
    } else if contains_any(ROUTINE_PHRASES) {
        tracing::debug!(rule = "routine_phrase", "sentiment decided");
        Some(SentimentResult::ROUTINE)
    } else {
        None
    }
}

/// Classifies `text`, asking `model` only when no vocabulary rule fires.
///
/// Never fails: a model error is logged and treated like an unrecognised label.
pub fn classify_sentiment(text: &str, model: &dyn SentimentModel) -> SentimentResult {
    if let Some(result) = classify_by_vocabulary(text) {
        return result;
    }

    match model.classify(text) {
        Ok(label) => {
            tracing::debug!(rule = "fallback_model", model = model.name(), label = ?label, "sentiment decided");
            SentimentResult::from_model_label(&label)
        }
        Err(e) => {
            tracing::warn!(model = model.name(), "sentiment model failed, reporting neutral: {}", e);
            SentimentResult::REPORTING_SYMPTOMS
        }
    }
}
