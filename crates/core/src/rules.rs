//! Keyword rule plumbing shared by the extractors.
//!
//! A rule is a case-insensitive regex paired with the canonical label it contributes. Rules never
//! report the matched text, only their label, and each rule fires at most once per input.

use regex::{Regex, RegexBuilder};

/// A compiled keyword rule and the label it contributes when it matches.
pub(crate) struct Rule<T> {
    regex: Regex,
    label: T,
}

impl<T: Copy + std::fmt::Debug> Rule<T> {
    /// Compiles `pattern` case-insensitively.
    ///
    /// Rule tables are built from string literals inside `LazyLock` statics; a pattern that fails
    /// to compile is a programming error caught by the table tests.
    pub(crate) fn new(pattern: &str, label: T) -> Self {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .unwrap_or_else(|e| panic!("invalid rule pattern {pattern:?}: {e}"));
        Self { regex, label }
    }

    pub(crate) fn fires(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub(crate) fn label(&self) -> T {
        self.label
    }
}

/// Labels of every rule in `rules` that fires on `text`, in table order.
pub(crate) fn fired_labels<T: Copy + std::fmt::Debug>(
    field: &'static str,
    rules: &[Rule<T>],
    text: &str,
) -> Vec<T> {
    rules
        .iter()
        .filter(|rule| rule.fires(text))
        .map(|rule| {
            tracing::trace!(rule = field, label = ?rule.label(), "rule fired");
            rule.label()
        })
        .collect()
}

/// Label of the first rule in `rules` that fires on `text`.
pub(crate) fn first_label<T: Copy + std::fmt::Debug>(
    field: &'static str,
    rules: &[Rule<T>],
    text: &str,
) -> Option<T> {
    let label = rules.iter().find(|rule| rule.fires(text)).map(Rule::label);
    if let Some(label) = label {
        tracing::trace!(rule = field, label = ?label, "rule fired");
    }
    label
}

/// Declares an enum whose variants serialize as fixed, human-readable labels.
///
/// Every variant gets a `#[serde(rename = ...)]` with its label, a `label()` accessor and a
/// `Display` impl printing the label.
macro_rules! canonical_labels {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:tt,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// The canonical label emitted in every output.
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

pub(crate) use canonical_labels;
