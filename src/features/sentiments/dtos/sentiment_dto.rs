use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::shared::time::deserialize_optional_timestamp;

/// Request DTO for submitting a sentiment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSentimentDto {
    /// Emotion label chosen in the app
    #[validate(custom(function = "validate_emotion"))]
    #[schema(example = "happy")]
    pub emotion: String,

    /// Mood score from 1 (worst) to 5 (best)
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5"))]
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub score: i32,

    /// Optional free-text note
    #[validate(length(max = 1000, message = "Note must not exceed 1000 characters"))]
    pub note: Option<String>,

    /// When the sentiment was recorded; RFC 3339, or naive UTC. Defaults to now.
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    #[schema(value_type = Option<String>, example = "2024-01-01T00:00:00Z")]
    pub timestamp: Option<DateTime<Utc>>,
}

fn validate_emotion(emotion: &str) -> Result<(), ValidationError> {
    let length = emotion.trim().chars().count();
    if length == 0 || length > 50 {
        return Err(ValidationError::new("emotion_length")
            .with_message(Cow::from("Emotion must be 1-50 characters")));
    }
    Ok(())
}

/// Sentiment as rendered for exports, timestamp in display time
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SentimentResponseDto {
    pub id: String,
    pub emotion: String,
    pub score: i32,
    pub note: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS` in UTC+8
    #[schema(example = "2024-01-01 08:00:00")]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dto(value: serde_json::Value) -> CreateSentimentDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_scores() {
        for score in 1..=5 {
            let dto = dto(json!({ "emotion": "happy", "score": score }));
            assert!(dto.validate().is_ok(), "score {} should be valid", score);
        }
    }

    #[test]
    fn test_score_out_of_range_names_field() {
        for score in [0, 6, -1] {
            let err = dto(json!({ "emotion": "happy", "score": score }))
                .validate()
                .unwrap_err();
            assert!(err.field_errors().contains_key("score"));
            assert!(err.to_string().contains("score"));
        }
    }

    #[test]
    fn test_blank_emotion_rejected() {
        let err = dto(json!({ "emotion": "   ", "score": 3 }))
            .validate()
            .unwrap_err();
        assert!(err.field_errors().contains_key("emotion"));
    }

    #[test]
    fn test_timestamp_optional_and_flexible() {
        let missing = dto(json!({ "emotion": "sad", "score": 2 }));
        assert!(missing.timestamp.is_none());

        let null = dto(json!({ "emotion": "sad", "score": 2, "timestamp": null }));
        assert!(null.timestamp.is_none());

        let naive = dto(json!({ "emotion": "sad", "score": 2, "timestamp": "2024-01-01T00:00:00" }));
        assert_eq!(
            naive.timestamp.unwrap().to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_bad_timestamp_fails_deserialization() {
        let result: Result<CreateSentimentDto, _> =
            serde_json::from_value(json!({ "emotion": "sad", "score": 2, "timestamp": "soon" }));
        assert!(result.is_err());
    }
}
