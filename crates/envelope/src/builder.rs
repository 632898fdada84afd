use crate::envelope::ResultEnvelope;
use crate::id::{IdSource, RandomIds};
use crate::model_state::{model_errors, ModelError, ValidationSource};
use crate::status::{self, IntoStatusCode};
use uuid::Uuid;

/// Field-by-field construction for envelopes that none of the factory
/// shapes cover.
pub struct EnvelopeBuilder<T, S = RandomIds> {
    ids: S,
    id: Option<Uuid>,
    code: i32,
    content: Option<T>,
    message: Option<String>,
    stack_trace: Option<String>,
    total: Option<u64>,
    model_errors: Vec<ModelError>,
}

impl<T> Default for EnvelopeBuilder<T, RandomIds> {
    fn default() -> Self {
        Self {
            ids: RandomIds,
            id: None,
            code: status::OK,
            content: None,
            message: None,
            stack_trace: None,
            total: None,
            model_errors: Vec::new(),
        }
    }
}

impl<T> EnvelopeBuilder<T, RandomIds> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, S: IdSource> EnvelopeBuilder<T, S> {
    pub fn id_source<N: IdSource>(self, ids: N) -> EnvelopeBuilder<T, N> {
        EnvelopeBuilder {
            ids,
            id: self.id,
            code: self.code,
            content: self.content,
            message: self.message,
            stack_trace: self.stack_trace,
            total: self.total,
            model_errors: self.model_errors,
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn code(mut self, code: impl IntoStatusCode) -> Self {
        self.code = code.into_status_code();
        self
    }

    pub fn content(mut self, content: T) -> Self {
        self.content = Some(content);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn stack_trace(mut self, trace: impl Into<String>) -> Self {
        self.stack_trace = Some(trace.into());
        self
    }

    pub fn total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn add_model_error(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.model_errors.push(ModelError::new(key, Some(message)));
        self
    }

    pub fn model_state<V: ValidationSource + ?Sized>(mut self, state: &V) -> Self {
        self.model_errors.extend(model_errors(state));
        self
    }

    pub fn build(self) -> ResultEnvelope<T> {
        let id = self.id.unwrap_or_else(|| self.ids.next_id());
        let mut envelope = ResultEnvelope::empty(id, self.code);
        envelope.content = self.content;
        envelope.message = self.message;
        envelope.stack_trace = self.stack_trace;
        envelope.total = self.total;
        envelope.model_state_error = (!self.model_errors.is_empty()).then_some(self.model_errors);
        envelope
    }
}

impl<T> ResultEnvelope<T> {
    pub fn builder() -> EnvelopeBuilder<T> {
        EnvelopeBuilder::new()
    }
}
