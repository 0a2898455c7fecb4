//! Keyword extraction.
//!
//! A rule set separate from [`crate::entities`]. The two overlap in intent but are not kept in
//! sync, so a transcript's keywords and its extracted entities can disagree.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::rules::{canonical_labels, fired_labels, Rule};

canonical_labels! {
    pub enum Keyword {
        WhiplashInjury => "Whiplash injury",
        PhysiotherapySessions => "10 physiotherapy sessions",
        Painkillers => "Painkillers",
        BackPain => "Back pain",
        NeckPain => "Neck pain",
        HeadImpact => "Head impact",
        TroubleSleeping => "Trouble sleeping",
        Discomfort => "Discomfort",
        FullRecovery => "Full recovery",
        Stiffness => "Stiffness",
        Backache => "Backache",
    }
}

static KEYWORD_RULES: LazyLock<Vec<Rule<Keyword>>> = LazyLock::new(|| {
    vec![
        Rule::new(r"whiplash injury", Keyword::WhiplashInjury),
        Rule::new(
            r"ten sessions|10 sessions|physiotherapy",
            Keyword::PhysiotherapySessions,
        ),
        Rule::new(r"painkillers", Keyword::Painkillers),
        Rule::new(r"back pain", Keyword::BackPain),
        Rule::new(r"neck pain", Keyword::NeckPain),
        Rule::new(r"head (impact|hit my head)", Keyword::HeadImpact),
        Rule::new(r"trouble sleeping", Keyword::TroubleSleeping),
        Rule::new(r"discomfort", Keyword::Discomfort),
        Rule::new(r"full recovery", Keyword::FullRecovery),
        Rule::new(r"stiffness", Keyword::Stiffness),
        Rule::new(r"backache", Keyword::Backache),
    ]
});

/// Returns the keyword labels found in `text`, sorted ascending and without duplicates.
pub fn extract_keywords(text: &str) -> Vec<String> {
    fired_labels("keyword", &KEYWORD_RULES, text)
        .into_iter()
        .map(Keyword::label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
