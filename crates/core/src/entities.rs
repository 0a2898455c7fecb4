//! Rule-based clinical entity extraction.
//!
//! Every field of an [`ExtractionResult`] comes from its own ordered table of case-insensitive
//! keyword rules. Rules are independent of each other: overlapping rules (for example "occasional
//! backache" feeding both a symptom and the current status) all fire and are not reconciled.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::rules::{canonical_labels, fired_labels, first_label, Rule};

canonical_labels! {
    /// Symptom reported in a transcript.
    pub enum Symptom {
        NeckPain => "Neck pain",
        BackPain => "Back pain",
        HeadImpact => "Head impact",
        TroubleSleeping => "Trouble sleeping",
        Discomfort => "Discomfort",
        OccasionalBackache => "Occasional backache",
    }
}

canonical_labels! {
    pub enum Diagnosis {
        WhiplashInjury => "Whiplash injury",
        NotSpecified => "Not specified",
    }
}

canonical_labels! {
    /// Treatment mentioned in a transcript.
    pub enum Treatment {
        PhysiotherapySessions => "10 physiotherapy sessions",
        Painkillers => "Painkillers",
        Advice => "Advice",
        FollowUp => "Follow-up",
    }
}

canonical_labels! {
    pub enum CurrentStatus {
        OccasionalBackache => "Occasional backache",
        DoingBetter => "Doing better",
        NotSpecified => "Not specified",
    }
}

canonical_labels! {
    pub enum Prognosis {
        FullRecovery => "Full recovery expected within six months",
        NotSpecified => "Not specified",
    }
}

impl Default for Diagnosis {
    fn default() -> Self {
        Self::NotSpecified
    }
}

impl Default for CurrentStatus {
    fn default() -> Self {
        Self::NotSpecified
    }
}

impl Default for Prognosis {
    fn default() -> Self {
        Self::NotSpecified
    }
}

/// Structured fields extracted from one transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractionResult {
    /// In rule order; each symptom appears at most once.
    #[serde(rename = "Symptoms")]
    pub symptoms: Vec<Symptom>,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: Diagnosis,
    /// In rule order; each treatment appears at most once.
    #[serde(rename = "Treatment")]
    pub treatment: Vec<Treatment>,
    #[serde(rename = "Current_Status")]
    pub current_status: CurrentStatus,
    #[serde(rename = "Prognosis")]
    pub prognosis: Prognosis,
}

static SYMPTOM_RULES: LazyLock<Vec<Rule<Symptom>>> = LazyLock::new(|| {
    vec![
        Rule::new(r"neck pain|pain in my neck", Symptom::NeckPain),
        Rule::new(r"back pain|pain in my back", Symptom::BackPain),
        Rule::new(r"head (impact|hit my head)", Symptom::HeadImpact),
        Rule::new(r"trouble sleeping", Symptom::TroubleSleeping),
        Rule::new(r"discomfort", Symptom::Discomfort),
        Rule::new(r"occasional backaches?|backaches?", Symptom::OccasionalBackache),
    ]
});

static DIAGNOSIS_RULES: LazyLock<Vec<Rule<Diagnosis>>> =
    LazyLock::new(|| vec![Rule::new(r"whiplash injury", Diagnosis::WhiplashInjury)]);

static TREATMENT_RULES: LazyLock<Vec<Rule<Treatment>>> = LazyLock::new(|| {
    vec![
        Rule::new(
            r"ten sessions|10 sessions|physiotherapy",
            Treatment::PhysiotherapySessions,
        ),
        Rule::new(r"painkillers", Treatment::Painkillers),
        Rule::new(r"advice", Treatment::Advice),
        Rule::new(r"follow[- ]?up", Treatment::FollowUp),
    ]
});

// First match wins.
static CURRENT_STATUS_RULES: LazyLock<Vec<Rule<CurrentStatus>>> = LazyLock::new(|| {
    vec![
        Rule::new(r"occasional backaches?", CurrentStatus::OccasionalBackache),
        Rule::new(r"doing better", CurrentStatus::DoingBetter),
    ]
});

static PROGNOSIS_RULES: LazyLock<Vec<Rule<Prognosis>>> =
    LazyLock::new(|| vec![Rule::new(r"full recovery", Prognosis::FullRecovery)]);

/// Extracts symptoms, diagnosis, treatment, current status and prognosis from `text`.
///
/// Total over all inputs: text without any recognised phrase yields empty lists and
/// `Not specified` for every single-valued field.
pub fn extract_entities(text: &str) -> ExtractionResult {
    ExtractionResult {
        symptoms: fired_labels("symptom", &SYMPTOM_RULES, text),
        diagnosis: first_label("diagnosis", &DIAGNOSIS_RULES, text).unwrap_or_default(),
        treatment: fired_labels("treatment", &TREATMENT_RULES, text),
        current_status: first_label("current_status", &CURRENT_STATUS_RULES, text)
            .unwrap_or_default(),
        prognosis: first_label("prognosis", &PROGNOSIS_RULES, text).unwrap_or_default(),
    }
}
