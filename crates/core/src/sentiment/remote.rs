//! Remote text-classification model client.
//!
//! Speaks the Hugging Face inference API shape: the request body is `{"inputs": "<text>"}` and
//! the reply is either `[[{"label", "score"}, ...]]` or `[{"label", "score"}, ...]`.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::RemoteModelConfig;
use crate::constants::MODEL_WARM_UP_TEXT;
use crate::error::{NotetakerError, NotetakerResult};
use notetaker_types::NonEmptyText;

use super::{ModelLabel, SentimentModel};

#[derive(Serialize)]
struct ClassificationReq<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationRes {
    Batched(Vec<Vec<LabelScore>>),
    Single(Vec<LabelScore>),
}

/// Client for a remote binary sentiment classifier.
///
/// Uses a blocking HTTP client: call it from a blocking context, never directly on an async
/// executor thread.
pub struct RemoteModel {
    client: Client,
    endpoint: NonEmptyText,
    api_token: Option<NonEmptyText>,
}

impl RemoteModel {
    /// Builds the HTTP client without contacting the endpoint.
    pub fn new(cfg: &RemoteModelConfig) -> NotetakerResult<Self> {
        let client = Client::builder().timeout(cfg.timeout).build()?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            api_token: cfg.api_token.clone(),
        })
    }

    /// Builds the client and runs one warm-up classification so that an unreachable or
    /// misconfigured endpoint is reported at startup.
    pub fn load(cfg: &RemoteModelConfig) -> NotetakerResult<Self> {
        let model = Self::new(cfg)?;
        let label = model.classify(MODEL_WARM_UP_TEXT)?;
        tracing::debug!(model = model.name(), label = ?label, "warm-up classification");
        Ok(model)
    }
}

impl SentimentModel for RemoteModel {
    fn name(&self) -> &str {
        self.endpoint.as_str()
    }

    fn classify(&self, text: &str) -> NotetakerResult<ModelLabel> {
        let mut request = self
            .client
            .post(self.endpoint.as_str())
            .json(&ClassificationReq { inputs: text });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(NotetakerError::ModelResponse(format!(
                "unexpected status {}: {}",
                status, body
            )));
        }

        parse_classification(&body)
    }
}

/// Picks the highest-scoring label from a classification reply.
fn parse_classification(body: &str) -> NotetakerResult<ModelLabel> {
    let parsed: ClassificationRes = serde_json::from_str(body).map_err(|e| {
        NotetakerError::ModelResponse(format!("failed to deserialise classification: {}", e))
    })?;

    let scores = match parsed {
        ClassificationRes::Batched(batches) => batches.into_iter().next().unwrap_or_default(),
        ClassificationRes::Single(scores) => scores,
    };

    scores
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|best| ModelLabel::from_raw(&best.label))
        .ok_or_else(|| NotetakerError::ModelResponse("classification contained no labels".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn parses_batched_reply() {
        let body = r#"[[{"label":"NEGATIVE","score":0.98},{"label":"POSITIVE","score":0.02}]]"#;
        assert_eq!(parse_classification(body).expect("parse"), ModelLabel::Negative);
    }

    #[test]
    fn parses_single_reply_and_picks_highest_score() {
        let body = r#"[{"label":"NEGATIVE","score":0.1},{"label":"POSITIVE","score":0.9}]"#;
        assert_eq!(parse_classification(body).expect("parse"), ModelLabel::Positive);
    }

    #[test]
    fn unknown_labels_are_kept() {
        let body = r#"[{"label":"LABEL_1","score":0.7}]"#;
        assert_eq!(
            parse_classification(body).expect("parse"),
            ModelLabel::Other("LABEL_1".into())
        );
    }

    #[test]
    fn empty_reply_is_an_error() {
        for body in ["[]", "[[]]"] {
            let err = parse_classification(body).expect_err("no labels");
            assert!(matches!(err, NotetakerError::ModelResponse(msg) if msg.contains("no labels")));
        }
    }

    #[test]
    fn error_payload_is_an_error() {
        let err = parse_classification(r#"{"error":"Model is currently loading"}"#)
            .expect_err("not a classification");
        assert!(matches!(err, NotetakerError::ModelResponse(_)));
    }

    #[test]
    fn name_is_the_endpoint() {
        let cfg = RemoteModelConfig {
            endpoint: NonEmptyText::new("http://127.0.0.1:9/classify").expect("valid"),
            api_token: None,
            timeout: Duration::from_secs(1),
        };
        let model = RemoteModel::new(&cfg).expect("client builds");
        assert_eq!(model.name(), "http://127.0.0.1:9/classify");
    }
}
