//! # Notetaker Core
//!
//! Clinical information extraction from free-text consultation transcripts.
//!
//! This crate contains the rule-based extractors and the sentiment classifier:
//! - entity extraction (symptoms, diagnosis, treatment, current status, prognosis)
//! - structured summary with the patient name
//! - keyword extraction
//! - SOAP note generation
//! - patient sentiment and intent, with a pluggable fallback model
//!
//! Every extractor is a pure function of the transcript. The only state is the
//! [`AppContext`], built once at startup, which owns the loaded sentiment model.
//!
//! **No API concerns**: HTTP servers and CLI parsing belong in `api-rest` and `notetaker-cli`.

pub mod analysis;
pub mod config;
pub mod constants;
pub mod context;
pub mod entities;
pub mod error;
pub mod keywords;
mod rules;
pub mod sentiment;
pub mod soap;
pub mod summary;

pub use analysis::{analyse_transcript, TranscriptAnalysis};
pub use config::{CoreConfig, OnnxModelConfig, RemoteModelConfig, SentimentBackend};
pub use context::AppContext;
pub use entities::{
    extract_entities, CurrentStatus, Diagnosis, ExtractionResult, Prognosis, Symptom, Treatment,
};
pub use error::{NotetakerError, NotetakerResult};
pub use keywords::extract_keywords;
pub use sentiment::{Intent, Sentiment, SentimentResult};
pub use soap::{generate_soap_note, SoapNote};
pub use summary::{summarise, PatientName, SummaryRecord};
