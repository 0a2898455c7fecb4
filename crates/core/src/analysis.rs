//! Full transcript analysis, as run by the "analyse transcript" action.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{extract_entities, ExtractionResult};
use crate::keywords::extract_keywords;
use crate::soap::SoapNote;
use crate::summary::{PatientName, SummaryRecord};

/// Every transcript-level output for one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranscriptAnalysis {
    pub entities: ExtractionResult,
    pub summary: SummaryRecord,
    /// Sorted ascending, no duplicates.
    pub keywords: Vec<String>,
    pub soap_note: SoapNote,
}

/// Runs entity extraction, summary, keyword extraction and SOAP generation over `text`.
///
/// Entities are extracted once and shared by the summary and the SOAP note.
pub fn analyse_transcript(text: &str) -> TranscriptAnalysis {
    let entities = extract_entities(text);
    let summary = SummaryRecord::new(PatientName::resolve(text), entities.clone());
    let soap_note = SoapNote::from_entities(&entities);
    let keywords = extract_keywords(text);

    tracing::debug!(
        symptoms = entities.symptoms.len(),
        treatments = entities.treatment.len(),
        keywords = keywords.len(),
        "transcript analysed"
    );

    TranscriptAnalysis {
        entities,
        summary,
        keywords,
        soap_note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soap::generate_soap_note;
    use crate::summary::summarise;

    const TRANSCRIPT: &str = "Physician: Good morning, Ms. Jones. How are you feeling today?\n\
        Patient: Good morning, doctor. I'm doing better, but I still have some discomfort now and \
        then.\n\
        Patient: I had a car accident. My head hit the steering wheel, and I could feel pain in \
        my neck and back almost right away. I had trouble sleeping. The doctor said it was a \
        whiplash injury and gave me advice about painkillers. I had ten sessions of \
        physiotherapy.\n\
        Patient: I do get occasional backaches.\n\
        Physician: I'd expect you to make a full recovery within six months.";

    #[test]
    fn matches_the_individual_operations() {
        let analysis = analyse_transcript(TRANSCRIPT);
        assert_eq!(analysis.entities, extract_entities(TRANSCRIPT));
        assert_eq!(analysis.summary, summarise(TRANSCRIPT));
        assert_eq!(analysis.keywords, extract_keywords(TRANSCRIPT));
        assert_eq!(analysis.soap_note, generate_soap_note(TRANSCRIPT));
    }

    #[test]
    fn consultation_transcript_is_fully_analysed() {
        let analysis = analyse_transcript(TRANSCRIPT);
        // "pain in my neck and back" only names the neck.
        let labels: Vec<_> = analysis.summary.symptoms.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Neck pain",
                "Trouble sleeping",
                "Discomfort",
                "Occasional backache",
            ]
        );
        assert_eq!(analysis.summary.patient_name, PatientName::JanetJones);
        assert_eq!(analysis.summary.current_status.label(), "Occasional backache");
        assert_eq!(analysis.soap_note.assessment.diagnosis, "Whiplash injury");
        assert_eq!(
            analysis.soap_note.plan.treatment,
            "10 physiotherapy sessions, Painkillers, Advice"
        );
        assert_eq!(
            analysis.keywords,
            vec![
                "10 physiotherapy sessions",
                "Backache",
                "Discomfort",
                "Full recovery",
                "Painkillers",
                "Trouble sleeping",
                "Whiplash injury",
            ]
        );
    }

    #[test]
    fn analysis_is_idempotent() {
        let first = serde_json::to_string(&analyse_transcript(TRANSCRIPT)).expect("serialise");
        let second = serde_json::to_string(&analyse_transcript(TRANSCRIPT)).expect("serialise");
        assert_eq!(first, second);
    }
}
