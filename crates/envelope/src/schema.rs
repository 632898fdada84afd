use crate::envelope::ResultEnvelope;
use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, JSONSchema, ValidationError};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

const RESULT_ENVELOPE_SCHEMA: &str = include_str!("../../../contracts/envelopes/result.json");

/// One broken rule, attributed to the top-level wire field it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Envelope schema is unusable: {message}")]
    SchemaUnusable { message: String },

    #[error("Envelope could not be serialized for checking: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Envelope breaks the wire contract: {}", join(.violations))]
    Violations { violations: Vec<Violation> },
}

impl ContractError {
    /// Top-level fields named by the violations, without duplicates.
    pub fn violated_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        if let Self::Violations { violations } = self {
            for violation in violations {
                if !fields.contains(&violation.field.as_str()) {
                    fields.push(&violation.field);
                }
            }
        }
        fields
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks serialized envelopes against `contracts/envelopes/result.json`
/// plus the cross-field rules a schema cannot express:
///
/// - `modelStateError` and `content` are never both non-null;
/// - `total` is only sent alongside `content`.
pub struct EnvelopeValidator {
    schema: JSONSchema,
}

impl EnvelopeValidator {
    pub fn new() -> Result<Self, ContractError> {
        let schema_value: Value = serde_json::from_str(RESULT_ENVELOPE_SCHEMA).map_err(|e| {
            ContractError::SchemaUnusable {
                message: e.to_string(),
            }
        })?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| ContractError::SchemaUnusable {
                message: e.to_string(),
            })?;

        Ok(Self { schema })
    }

    pub fn validate<T: Serialize>(&self, envelope: &ResultEnvelope<T>) -> Result<(), ContractError> {
        let value = serde_json::to_value(envelope).map_err(ContractError::Serialize)?;
        self.validate_json(&value)
    }

    pub fn validate_json(&self, envelope_json: &Value) -> Result<(), ContractError> {
        let mut violations: Vec<Violation> = match self.schema.validate(envelope_json) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.flat_map(schema_violations).collect(),
        };

        if violations.is_empty() {
            violations = cross_field_violations(envelope_json);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ContractError::Violations { violations })
        }
    }
}

/// Errors at the document root name the offending key through their kind;
/// everything else is attributed to the first segment of its path.
fn schema_violations(error: ValidationError<'_>) -> Vec<Violation> {
    let message = error.to_string();
    match &error.kind {
        ValidationErrorKind::Required { property } => vec![Violation {
            field: property.as_str().unwrap_or("envelope").to_string(),
            message,
        }],
        ValidationErrorKind::AdditionalProperties { unexpected } => unexpected
            .iter()
            .map(|field| Violation {
                field: field.clone(),
                message: "not part of the envelope".to_string(),
            })
            .collect(),
        _ => {
            let field = error
                .instance_path
                .into_vec()
                .into_iter()
                .next()
                .unwrap_or_else(|| "envelope".to_string());
            vec![Violation { field, message }]
        }
    }
}

fn cross_field_violations(envelope: &Value) -> Vec<Violation> {
    let present = |key: &str| envelope.get(key).is_some_and(|value| !value.is_null());
    let mut violations = Vec::new();

    if present("modelStateError") && present("content") {
        violations.push(Violation {
            field: "modelStateError".to_string(),
            message: "validation errors cannot accompany content".to_string(),
        });
    }

    if present("total") && !present("content") {
        violations.push(Violation {
            field: "total".to_string(),
            message: "a total requires the page it counts".to_string(),
        });
    }

    violations
}

impl<T: Serialize> ResultEnvelope<T> {
    pub fn validate(&self) -> Result<(), ContractError> {
        EnvelopeValidator::new()?.validate(self)
    }

    pub fn validate_with(&self, validator: &EnvelopeValidator) -> Result<(), ContractError> {
        validator.validate(self)
    }
}
