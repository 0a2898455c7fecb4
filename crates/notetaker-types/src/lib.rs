//! # Notetaker Types
//!
//! Small validated primitives shared across the notetaker crates.

/// Errors raised when building a validated text value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input was empty or whitespace only.
    #[error("Text cannot be empty")]
    Empty,
}

/// Trimmed text that is guaranteed to hold at least one non-whitespace character.
///
/// Used for configuration values such as model endpoints and access tokens, where an empty
/// string would otherwise only be noticed on the first request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if nothing is left after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Treats a missing or blank value as absent rather than as an error.
    ///
    /// Environment variables are often set to an empty string to "unset" them, so
    /// `Some("")` and `None` both become `None`.
    pub fn from_optional(input: Option<impl AsRef<str>>) -> Option<Self> {
        input.and_then(|value| Self::new(value).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let text = NonEmptyText::new("  https://example.test/model \n").expect("valid");
        assert_eq!(text.as_str(), "https://example.test/model");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(NonEmptyText::new("   ").unwrap_err(), TextError::Empty);
        assert_eq!(NonEmptyText::new("").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn blank_optional_values_are_absent() {
        assert_eq!(NonEmptyText::from_optional(None::<String>), None);
        assert_eq!(NonEmptyText::from_optional(Some("  ")), None);
        assert_eq!(
            NonEmptyText::from_optional(Some("hf_token")).map(|t| t.to_string()),
            Some("hf_token".to_string())
        );
    }
}
