//! Request and response bodies of the form endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of the "analyse transcript" action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyseTranscriptReq {
    /// Full consultation transcript. May be empty.
    #[serde(default)]
    pub transcript: String,
}

/// Body of the "analyse sentiment" action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyseDialogueReq {
    /// Patient dialogue. May be empty.
    #[serde(default)]
    pub dialogue: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_fields_default_to_empty() {
        let req: AnalyseTranscriptReq = serde_json::from_str("{}").expect("parse");
        assert_eq!(req.transcript, "");

        let req: AnalyseDialogueReq = serde_json::from_str("{}").expect("parse");
        assert_eq!(req.dialogue, "");
    }

    #[test]
    fn reads_dialogue_body() {
        let req: AnalyseDialogueReq =
            serde_json::from_str(r#"{"dialogue":"I'm a bit nervous"}"#).expect("parse");
        assert_eq!(req.dialogue, "I'm a bit nervous");
    }
}
