//! Request bodies for the drafts API and their local validation.

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Course languages offered by the generation service: `(code, name)`
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("zh", "Chinese (Mandarin)"),
    ("hi", "Hindi"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("ar", "Arabic"),
    ("bn", "Bengali"),
    ("ru", "Russian"),
    ("pt", "Portuguese"),
    ("id", "Indonesian"),
];

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_LEVEL: &str = "Beginner";
pub const DEFAULT_DURATION_WEEKS: u32 = 4;

/// Display name for a supported language code
pub fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Normalise a level to an initial capital (`beginner` -> `Beginner`)
pub fn normalize_level(level: &str) -> String {
    let level = level.trim();
    let mut chars = level.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Body of `POST /drafts/stream`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub course_title: String,
    pub level: String,
    pub duration_weeks: u32,
    pub prompt: String,
    pub language: String,
}

impl GenerationRequest {
    /// Create a request with default level, duration and language
    pub fn new(course_title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            course_title: course_title.into(),
            level: DEFAULT_LEVEL.to_string(),
            duration_weeks: DEFAULT_DURATION_WEEKS,
            prompt: prompt.into(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Set the level (builder pattern); normalised to an initial capital
    pub fn with_level(mut self, level: &str) -> Self {
        self.level = normalize_level(level);
        self
    }

    pub fn with_duration_weeks(mut self, weeks: u32) -> Self {
        self.duration_weeks = weeks;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Check the request before it goes on the wire.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.course_title.trim().is_empty() {
            return Err(RequestError::MissingTitle);
        }
        if self.prompt.trim().is_empty() {
            return Err(RequestError::MissingPrompt);
        }
        if self.duration_weeks == 0 {
            return Err(RequestError::InvalidDuration);
        }
        if language_name(&self.language).is_none() {
            return Err(RequestError::UnsupportedLanguage(self.language.clone()));
        }
        Ok(())
    }
}

/// Body of `POST /drafts/publish`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub draft_id: String,
}

impl PublishRequest {
    pub fn new(draft_id: Option<&str>) -> Result<Self, RequestError> {
        match draft_id.map(str::trim) {
            Some(id) if !id.is_empty() => Ok(Self {
                draft_id: id.to_string(),
            }),
            _ => Err(RequestError::MissingDraftId),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = GenerationRequest::new("Intro to X", "Teach X");
        assert_eq!(request.level, "Beginner");
        assert_eq!(request.duration_weeks, 4);
        assert_eq!(request.language, "en");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_level_is_capitalised() {
        assert_eq!(normalize_level("beginner"), "Beginner");
        assert_eq!(normalize_level("  advanced "), "Advanced");
        assert_eq!(normalize_level("Intermediate"), "Intermediate");
        assert_eq!(normalize_level(""), "");

        let request = GenerationRequest::new("T", "P").with_level("intermediate");
        assert_eq!(request.level, "Intermediate");
    }

    #[test]
    fn test_serializes_camel_case() {
        let request = GenerationRequest::new("Intro to X", "Teach X")
            .with_duration_weeks(6)
            .with_language("es");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "courseTitle": "Intro to X",
                "level": "Beginner",
                "durationWeeks": 6,
                "prompt": "Teach X",
                "language": "es"
            })
        );
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            GenerationRequest::new("  ", "Teach X").validate(),
            Err(RequestError::MissingTitle)
        );
        assert_eq!(
            GenerationRequest::new("T", "").validate(),
            Err(RequestError::MissingPrompt)
        );
        assert_eq!(
            GenerationRequest::new("T", "P")
                .with_duration_weeks(0)
                .validate(),
            Err(RequestError::InvalidDuration)
        );
        assert_eq!(
            GenerationRequest::new("T", "P").with_language("xx").validate(),
            Err(RequestError::UnsupportedLanguage("xx".to_string()))
        );
    }

    #[test]
    fn test_language_names() {
        assert_eq!(language_name("pt"), Some("Portuguese"));
        assert_eq!(language_name("de"), None);
        assert_eq!(SUPPORTED_LANGUAGES.len(), 10);
    }

    #[test]
    fn test_publish_request() {
        let request = PublishRequest::new(Some("d1")).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"draftId": "d1"})
        );
        assert_eq!(PublishRequest::new(None), Err(RequestError::MissingDraftId));
        assert_eq!(
            PublishRequest::new(Some(" ")),
            Err(RequestError::MissingDraftId)
        );
    }
}
