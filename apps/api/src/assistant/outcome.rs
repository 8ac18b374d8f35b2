use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Network failure or an unreadable response body.
    Http,
    /// The API answered with a non-success status.
    Api,
    RateLimited,
    /// The model answered without any text.
    EmptyResponse,
    /// The API answered 200 with a body that is not a messages response.
    MalformedResponse,
}

/// Result of a text-generation operation. Callers branch on the tag instead of
/// inspecting the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Ok { content: String },
    Error { kind: FailureKind, message: String },
}

impl GenerationOutcome {
    pub fn content(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Ok { content } => Some(content),
            GenerationOutcome::Error { .. } => None,
        }
    }
}

/// A remote failure already turned into a user-facing message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GenerationFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerationFailure {
    /// `action` completes the sentence "Error <action>: ...".
    pub fn from_llm(action: &str, err: &LlmError) -> Self {
        let kind = match err {
            LlmError::Http(_) => FailureKind::Http,
            LlmError::Api { .. } => FailureKind::Api,
            LlmError::RateLimited { .. } => FailureKind::RateLimited,
            LlmError::Malformed(_) => FailureKind::MalformedResponse,
        };
        Self {
            kind,
            message: format!("Error {action}: {err}"),
        }
    }

    pub fn empty(message: &str) -> Self {
        Self {
            kind: FailureKind::EmptyResponse,
            message: message.to_string(),
        }
    }
}

impl From<GenerationFailure> for GenerationOutcome {
    fn from(failure: GenerationFailure) -> Self {
        GenerationOutcome::Error {
            kind: failure.kind,
            message: failure.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_outcome_serializes_with_status_tag() {
        let outcome = GenerationOutcome::Ok {
            content: "Key skills: Go".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "ok", "content": "Key skills: Go"})
        );
    }

    #[test]
    fn test_error_outcome_serializes_kind_and_message() {
        let outcome: GenerationOutcome = GenerationFailure::empty("Analysis failed").into();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"status": "error", "kind": "empty_response", "message": "Analysis failed"})
        );
        assert!(outcome.content().is_none());
    }

    #[test]
    fn test_api_error_message_names_the_action() {
        let err = LlmError::Api {
            status: 401,
            message: "invalid x-api-key".to_string(),
        };
        let failure = GenerationFailure::from_llm("analyzing job posting", &err);
        assert_eq!(failure.kind, FailureKind::Api);
        assert_eq!(
            failure.message,
            "Error analyzing job posting: API error (status 401): invalid x-api-key"
        );
    }
}
