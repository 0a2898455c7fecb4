//! SOAP note generation.
//!
//! Maps entity extraction output into a fixed Subjective / Objective / Assessment / Plan
//! template. Transcripts without any recognised symptom, blank input included, always produce
//! the routine checkup note.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{extract_entities, ExtractionResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Subjective {
    #[serde(rename = "Chief_Complaint")]
    pub chief_complaint: String,
    #[serde(rename = "History_of_Present_Illness")]
    pub history_of_present_illness: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Objective {
    #[serde(rename = "Physical_Exam")]
    pub physical_exam: String,
    #[serde(rename = "Observations")]
    pub observations: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Assessment {
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Severity")]
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Plan {
    #[serde(rename = "Treatment")]
    pub treatment: String,
    #[serde(rename = "Follow-Up")]
    pub follow_up: String,
}

/// Four-section clinical note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SoapNote {
    #[serde(rename = "Subjective")]
    pub subjective: Subjective,
    #[serde(rename = "Objective")]
    pub objective: Objective,
    #[serde(rename = "Assessment")]
    pub assessment: Assessment,
    #[serde(rename = "Plan")]
    pub plan: Plan,
}

impl SoapNote {
    /// Note for a visit with nothing to report.
    pub fn routine_checkup() -> Self {
        Self {
            subjective: Subjective {
                chief_complaint: "Routine checkup".into(),
                history_of_present_illness: "No major complaints reported by the patient.".into(),
            },
            objective: Objective {
                physical_exam: "Normal vital signs, no abnormalities noted.".into(),
                observations: "Patient appears in good health.".into(),
            },
            assessment: Assessment {
                diagnosis: "General wellness".into(),
                severity: "None".into(),
            },
            plan: Plan {
                treatment: "No treatment necessary.".into(),
                follow_up: "Routine follow-up advised.".into(),
            },
        }
    }

    /// Builds the note from already extracted entities.
    pub fn from_entities(entities: &ExtractionResult) -> Self {
        if entities.symptoms.is_empty() {
            return Self::routine_checkup();
        }

        let symptoms = join_labels(entities.symptoms.iter().map(|s| s.label()));
        let treatment = if entities.treatment.is_empty() {
            "Supportive care recommended.".to_string()
        } else {
            join_labels(entities.treatment.iter().map(|t| t.label()))
        };

        Self {
            subjective: Subjective {
                history_of_present_illness: format!(
                    "Patient reports issues including: {}",
                    symptoms
                ),
                chief_complaint: symptoms,
            },
            objective: Objective {
                physical_exam: "Full range of motion in affected areas, no significant tenderness."
                    .into(),
                observations: "Patient appears stable with mild discomfort.".into(),
            },
            assessment: Assessment {
                diagnosis: entities.diagnosis.label().into(),
                severity: "Mild".into(),
            },
            plan: Plan {
                treatment,
                follow_up: "Patient to follow up if symptoms persist.".into(),
            },
        }
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

/// Generates a SOAP note for `text`.
pub fn generate_soap_note(text: &str) -> SoapNote {
    SoapNote::from_entities(&extract_entities(text))
}
