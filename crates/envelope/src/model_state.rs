use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field-level validation failure as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelError {
    pub key: String,
    pub error_message: Option<String>,
}

impl ModelError {
    pub fn new(key: impl Into<String>, error_message: Option<impl Into<String>>) -> Self {
        Self {
            key: key.into(),
            error_message: error_message.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Unvalidated,
    Valid,
    Invalid,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    pub errors: Vec<String>,
    pub validity: Validity,
}

/// Borrowed view of one field, as produced by a [`ValidationSource`].
#[derive(Debug, Clone, Copy)]
pub struct FieldEntry<'a> {
    pub key: &'a str,
    pub invalid: bool,
    pub errors: &'a [String],
}

/// A collection of per-field validation results that an envelope can be
/// built from.
pub trait ValidationSource {
    fn field_entries(&self) -> Vec<FieldEntry<'_>>;
}

/// Insertion-ordered record of what happened to each bound field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelState {
    fields: Vec<(String, FieldState)>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error against `key` and marks the field invalid.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) -> &mut Self {
        let state = self.entry(key.into());
        state.errors.push(message.into());
        state.validity = Validity::Invalid;
        self
    }

    /// Marks `key` as having passed validation. Recorded errors are dropped.
    pub fn mark_valid(&mut self, key: impl Into<String>) -> &mut Self {
        let state = self.entry(key.into());
        state.errors.clear();
        state.validity = Validity::Valid;
        self
    }

    pub fn mark_skipped(&mut self, key: impl Into<String>) -> &mut Self {
        self.entry(key.into()).validity = Validity::Skipped;
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldState> {
        self.fields
            .iter()
            .find(|(field, _)| field == key)
            .map(|(_, state)| state)
    }

    pub fn is_valid(&self) -> bool {
        self.fields
            .iter()
            .all(|(_, state)| state.validity != Validity::Invalid)
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().map(|(_, state)| state.errors.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldState)> {
        self.fields
            .iter()
            .map(|(key, state)| (key.as_str(), state))
    }

    fn entry(&mut self, key: String) -> &mut FieldState {
        let index = match self.fields.iter().position(|(field, _)| *field == key) {
            Some(index) => index,
            None => {
                self.fields.push((key, FieldState::default()));
                self.fields.len() - 1
            }
        };
        &mut self.fields[index].1
    }
}

impl ValidationSource for ModelState {
    fn field_entries(&self) -> Vec<FieldEntry<'_>> {
        self.iter()
            .map(|(key, state)| FieldEntry {
                key,
                invalid: state.validity == Validity::Invalid,
                errors: &state.errors,
            })
            .collect()
    }
}

/// Plain maps count a field as invalid when it has at least one message.
impl ValidationSource for BTreeMap<String, Vec<String>> {
    fn field_entries(&self) -> Vec<FieldEntry<'_>> {
        self.iter()
            .map(|(key, errors)| FieldEntry {
                key,
                invalid: !errors.is_empty(),
                errors,
            })
            .collect()
    }
}

/// Keeps invalid fields only, with the first message of each, in source order.
pub fn model_errors<V: ValidationSource + ?Sized>(source: &V) -> Vec<ModelError> {
    source
        .field_entries()
        .into_iter()
        .filter(|entry| entry.invalid)
        .map(|entry| ModelError {
            key: entry.key.to_string(),
            error_message: entry.errors.first().cloned(),
        })
        .collect()
}
