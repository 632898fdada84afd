use crate::model_state::ModelError;
use crate::status::{self, IntoStatusCode};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Uniform response structure: a status code plus either a payload or error
/// detail.
///
/// `stack_trace` is process-local and never crosses the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope<T = serde_json::Value> {
    pub(crate) id: Uuid,
    pub(crate) code: i32,
    pub(crate) content: Option<T>,
    pub(crate) message: Option<String>,
    #[serde(skip)]
    pub(crate) stack_trace: Option<String>,
    pub(crate) total: Option<u64>,
    pub(crate) model_state_error: Option<Vec<ModelError>>,
}

/// Incoming wire form. Legacy producers send the error text as `error`,
/// sometimes next to a `message` key.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEnvelope<T> {
    id: Uuid,
    code: i32,
    content: Option<T>,
    message: Option<String>,
    error: Option<String>,
    total: Option<u64>,
    model_state_error: Option<Vec<ModelError>>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ResultEnvelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireEnvelope::deserialize(deserializer)?;
        Ok(Self {
            id: wire.id,
            code: wire.code,
            content: wire.content,
            message: wire.message.or(wire.error),
            stack_trace: None,
            total: wire.total,
            model_state_error: wire.model_state_error,
        })
    }
}

/// Envelope with open (untyped JSON) content.
pub type Envelope = ResultEnvelope<serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    ValidationFailure,
}

#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("Failed to serialize envelope: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to deserialize envelope: {0}")]
    Deserialize(#[source] serde_json::Error),
}

impl<T> ResultEnvelope<T> {
    pub(crate) fn empty(id: Uuid, code: i32) -> Self {
        Self {
            id,
            code,
            content: None,
            message: None,
            stack_trace: None,
            total: None,
            model_state_error: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    /// The code as a named HTTP status, when it is one.
    pub fn status(&self) -> Option<http::StatusCode> {
        status::status_code(self.code)
    }

    pub fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn into_content(self) -> Option<T> {
        self.content
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Field-level validation errors; empty when none were recorded, in which
    /// case the wire form carries `"modelStateError": null`.
    pub fn model_state_errors(&self) -> &[ModelError] {
        self.model_state_error.as_deref().unwrap_or_default()
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_code(mut self, code: impl IntoStatusCode) -> Self {
        self.code = code.into_status_code();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Classifies the envelope. Fields are never checked for consistency,
    /// so an envelope carrying both content and a message is a failure.
    pub fn outcome(&self) -> Outcome {
        if self.model_state_error.is_some() {
            Outcome::ValidationFailure
        } else if self.message.is_some() || self.code >= status::BAD_REQUEST {
            Outcome::Failure
        } else {
            Outcome::Success
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome() == Outcome::Success
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Converts the payload while keeping every other field, id included.
    pub fn map_content<U, F>(self, f: F) -> ResultEnvelope<U>
    where
        F: FnOnce(T) -> U,
    {
        ResultEnvelope {
            id: self.id,
            code: self.code,
            content: self.content.map(f),
            message: self.message,
            stack_trace: self.stack_trace,
            total: self.total,
            model_state_error: self.model_state_error,
        }
    }
}

impl<T: Serialize> ResultEnvelope<T> {
    /// Turns a typed envelope into one with open JSON content.
    pub fn into_open(self) -> Result<Envelope, EnvelopeError> {
        let content = self
            .content
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(EnvelopeError::Serialize)?;

        Ok(ResultEnvelope {
            id: self.id,
            code: self.code,
            content,
            message: self.message,
            stack_trace: self.stack_trace,
            total: self.total,
            model_state_error: self.model_state_error,
        })
    }

    pub fn to_json(&self) -> Result<String, EnvelopeError> {
        serde_json::to_string(self).map_err(EnvelopeError::Serialize)
    }

    pub fn to_json_pretty(&self) -> Result<String, EnvelopeError> {
        serde_json::to_string_pretty(self).map_err(EnvelopeError::Serialize)
    }
}

impl<T: DeserializeOwned> ResultEnvelope<T> {
    pub fn from_json(raw: &str) -> Result<Self, EnvelopeError> {
        serde_json::from_str(raw).map_err(EnvelopeError::Deserialize)
    }
}
