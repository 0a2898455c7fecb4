use crate::constants::NEUTRAL_MODEL_LABEL;
use crate::error::NotetakerResult;

use super::{ModelLabel, SentimentModel};

const POSITIVE_CUES: &[&str] = &[
    "better", "comfortable", "excellent", "fine", "glad", "good", "great", "happy", "helped",
    "helpful", "improved", "improving", "nice", "okay", "positive", "recovered", "recovering",
    "thank", "thanks", "well",
];

const NEGATIVE_CUES: &[&str] = &[
    "ache", "aches", "afraid", "awful", "bad", "cannot", "can't", "difficult", "fear", "hurt",
    "hurting", "hurts", "pain", "painful", "problem", "problems", "sad", "scared", "sore", "stiff",
    "struggling", "terrible", "tired", "unable", "worse", "worst",
];

/// Offline binary polarity classifier.
///
/// Counts whole-word positive and negative cues. Whichever side has more cues wins; a tie,
/// including text with no cues at all, is reported as `NEUTRAL`. Typographic apostrophes are
/// read as `'`, so "can’t" and "can't" are the same word.
#[derive(Debug, Default, Clone)]
pub struct LexiconModel;

impl LexiconModel {
    pub fn new() -> Self {
        Self
    }

    fn score(text: &str) -> (usize, usize) {
        let lowered = text.to_lowercase().replace('\u{2019}', "'");
        lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|word| !word.is_empty())
            .fold((0, 0), |(positive, negative), word| {
                (
                    positive + usize::from(POSITIVE_CUES.contains(&word)),
                    negative + usize::from(NEGATIVE_CUES.contains(&word)),
                )
            })
    }
}

impl SentimentModel for LexiconModel {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn classify(&self, text: &str) -> NotetakerResult<ModelLabel> {
        let (positive, negative) = Self::score(text);
        Ok(match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => ModelLabel::Positive,
            std::cmp::Ordering::Less => ModelLabel::Negative,
            std::cmp::Ordering::Equal => ModelLabel::Other(NEUTRAL_MODEL_LABEL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> ModelLabel {
        LexiconModel::new().classify(text).expect("lexicon never fails")
    }

    #[test]
    fn negative_cues_win() {
        assert_eq!(classify("My back hurts and the pain is worse at night"), ModelLabel::Negative);
    }

    #[test]
    fn positive_cues_win() {
        assert_eq!(classify("Feeling much better, the exercises helped"), ModelLabel::Positive);
    }

    #[test]
    fn ties_and_empty_text_are_neutral() {
        let neutral = ModelLabel::Other(NEUTRAL_MODEL_LABEL.into());
        assert_eq!(classify(""), neutral);
        assert_eq!(classify("I came in on Tuesday"), neutral);
        assert_eq!(classify("good but painful"), neutral);
    }

    #[test]
    fn cues_match_whole_words_only() {
        // "painting" and "wellington" contain cue words but are not cues.
        assert_eq!(
            classify("painting in wellington"),
            ModelLabel::Other(NEUTRAL_MODEL_LABEL.into())
        );
    }

    #[test]
    fn contractions_are_single_words() {
        assert_eq!(classify("I can't turn my head"), ModelLabel::Negative);
    }

    #[test]
    fn typographic_apostrophes_are_normalised() {
        assert_eq!(classify("I can\u{2019}t turn my head"), ModelLabel::Negative);
        assert_eq!(classify("It\u{2019}s fine now"), ModelLabel::Positive);
    }
}
