use crate::config::EnvelopeConfig;
use crate::envelope::ResultEnvelope;
use crate::id::{IdSource, RandomIds};
use crate::model_state::{model_errors, ValidationSource};
use crate::status::IntoStatusCode;
use std::error::Error as StdError;
use std::fmt::Write as _;
use tracing::debug;

/// Builds envelopes from the different outcomes of a request handler.
///
/// Every constructor is total: degenerate input (an empty message, an empty
/// validation collection) still produces an envelope.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeFactory<S = RandomIds> {
    ids: S,
    config: EnvelopeConfig,
}

impl EnvelopeFactory<RandomIds> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EnvelopeConfig) -> Self {
        Self {
            ids: RandomIds,
            config,
        }
    }
}

impl<S: IdSource> EnvelopeFactory<S> {
    pub fn with_id_source(ids: S, config: EnvelopeConfig) -> Self {
        Self { ids, config }
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    pub fn id_source(&self) -> &S {
        &self.ids
    }

    fn blank<T>(&self, code: i32) -> ResultEnvelope<T> {
        ResultEnvelope::empty(self.ids.next_id(), code)
    }

    pub fn success<T>(&self, content: T) -> ResultEnvelope<T> {
        self.success_with_code(content, self.config.success_code)
    }

    pub fn success_with_code<T>(&self, content: T, code: impl IntoStatusCode) -> ResultEnvelope<T> {
        let mut envelope = self.blank(code.into_status_code());
        envelope.content = Some(content);
        envelope
    }

    /// Status-only envelope: no payload, no error.
    pub fn status<T>(&self, code: impl IntoStatusCode) -> ResultEnvelope<T> {
        self.blank(code.into_status_code())
    }

    pub fn error<T, E>(&self, error: &E) -> ResultEnvelope<T>
    where
        E: StdError + ?Sized,
    {
        self.error_with_code(error, self.config.error_code)
    }

    pub fn error_with_code<T, E>(&self, error: &E, code: impl IntoStatusCode) -> ResultEnvelope<T>
    where
        E: StdError + ?Sized,
    {
        let trace = if self.config.capture_stack_trace {
            source_chain(error)
        } else {
            None
        };
        self.failure(error.to_string(), trace, code.into_status_code())
    }

    pub fn error_message<T>(&self, message: impl Into<String>) -> ResultEnvelope<T> {
        self.error_message_with_code(message, self.config.error_code)
    }

    pub fn error_message_with_code<T>(
        &self,
        message: impl Into<String>,
        code: impl IntoStatusCode,
    ) -> ResultEnvelope<T> {
        self.failure(message.into(), None, code.into_status_code())
    }

    pub fn anyhow_error<T>(&self, error: &anyhow::Error) -> ResultEnvelope<T> {
        self.anyhow_error_with_code(error, self.config.error_code)
    }

    /// Uses the top-level message; the trace is anyhow's full report,
    /// including the backtrace when one was captured.
    pub fn anyhow_error_with_code<T>(
        &self,
        error: &anyhow::Error,
        code: impl IntoStatusCode,
    ) -> ResultEnvelope<T> {
        let trace = self
            .config
            .capture_stack_trace
            .then(|| format!("{error:?}"));
        self.failure(error.to_string(), trace, code.into_status_code())
    }

    fn failure<T>(&self, message: String, trace: Option<String>, code: i32) -> ResultEnvelope<T> {
        let mut envelope = self.blank(code);
        debug!(id = %envelope.id, code, message = %message, "Built error envelope");
        envelope.message = Some(message);
        envelope.stack_trace = trace;
        envelope
    }

    pub fn validation<T, V>(&self, state: &V) -> ResultEnvelope<T>
    where
        V: ValidationSource + ?Sized,
    {
        self.validation_with_code(state, None::<String>, self.config.validation_code)
    }

    pub fn validation_with_message<T, V>(&self, state: &V, message: impl Into<String>) -> ResultEnvelope<T>
    where
        V: ValidationSource + ?Sized,
    {
        self.validation_with_code(state, Some(message), self.config.validation_code)
    }

    /// Like [`validation_with_message`](Self::validation_with_message), taking
    /// the message from an error value when one is given.
    pub fn validation_with_error<T, V, E>(&self, state: &V, error: Option<&E>) -> ResultEnvelope<T>
    where
        V: ValidationSource + ?Sized,
        E: StdError + ?Sized,
    {
        self.validation_with_code(
            state,
            error.map(ToString::to_string),
            self.config.validation_code,
        )
    }

    /// Only invalid fields are kept, with their first message. When no field
    /// is invalid `model_state_error` stays `None`.
    pub fn validation_with_code<T, V>(
        &self,
        state: &V,
        message: Option<impl Into<String>>,
        code: impl IntoStatusCode,
    ) -> ResultEnvelope<T>
    where
        V: ValidationSource + ?Sized,
    {
        let errors = model_errors(state);
        let mut envelope = self.blank(code.into_status_code());
        debug!(
            id = %envelope.id,
            code = envelope.code,
            invalid_fields = errors.len(),
            "Built validation envelope"
        );
        envelope.message = message.map(Into::into);
        envelope.model_state_error = (!errors.is_empty()).then_some(errors);
        envelope
    }

    /// One page of a list: `total` is the size of the whole result set.
    pub fn page<T>(&self, items: T, total: u64) -> ResultEnvelope<T> {
        self.page_with_code(items, total, self.config.success_code)
    }

    pub fn page_with_code<T>(&self, items: T, total: u64, code: impl IntoStatusCode) -> ResultEnvelope<T> {
        let mut envelope = self.success_with_code(items, code);
        envelope.total = Some(total);
        envelope
    }
}

/// Shorthands over a default [`EnvelopeFactory`]: random ids, default codes.
impl<T> ResultEnvelope<T> {
    pub fn from_success(content: T) -> Self {
        EnvelopeFactory::new().success(content)
    }

    pub fn from_success_with_code(content: T, code: impl IntoStatusCode) -> Self {
        EnvelopeFactory::new().success_with_code(content, code)
    }

    pub fn from_status(code: impl IntoStatusCode) -> Self {
        EnvelopeFactory::new().status(code)
    }

    pub fn from_error<E: StdError + ?Sized>(error: &E) -> Self {
        EnvelopeFactory::new().error(error)
    }

    pub fn from_error_with_code<E: StdError + ?Sized>(error: &E, code: impl IntoStatusCode) -> Self {
        EnvelopeFactory::new().error_with_code(error, code)
    }

    pub fn from_error_message(message: impl Into<String>) -> Self {
        EnvelopeFactory::new().error_message(message)
    }

    pub fn from_anyhow(error: &anyhow::Error) -> Self {
        EnvelopeFactory::new().anyhow_error(error)
    }

    pub fn from_anyhow_with_code(error: &anyhow::Error, code: impl IntoStatusCode) -> Self {
        EnvelopeFactory::new().anyhow_error_with_code(error, code)
    }

    pub fn from_validation<V: ValidationSource + ?Sized>(state: &V) -> Self {
        EnvelopeFactory::new().validation(state)
    }

    pub fn from_validation_with_message<V: ValidationSource + ?Sized>(
        state: &V,
        message: impl Into<String>,
    ) -> Self {
        EnvelopeFactory::new().validation_with_message(state, message)
    }

    pub fn from_validation_with_error<V, E>(state: &V, error: Option<&E>) -> Self
    where
        V: ValidationSource + ?Sized,
        E: StdError + ?Sized,
    {
        EnvelopeFactory::new().validation_with_error(state, error)
    }

    pub fn from_validation_with_code<V: ValidationSource + ?Sized>(
        state: &V,
        message: Option<impl Into<String>>,
        code: impl IntoStatusCode,
    ) -> Self {
        EnvelopeFactory::new().validation_with_code(state, message, code)
    }

    pub fn from_page(items: T, total: u64) -> Self {
        EnvelopeFactory::new().page(items, total)
    }

    pub fn from_page_with_code(items: T, total: u64, code: impl IntoStatusCode) -> Self {
        EnvelopeFactory::new().page_with_code(items, total, code)
    }
}

fn source_chain<E: StdError + ?Sized>(error: &E) -> Option<String> {
    let mut source = error.source()?;
    let mut trace = String::from("Caused by:");
    let mut depth = 0;
    loop {
        let _ = write!(trace, "\n    {depth}: {source}");
        depth += 1;
        match source.source() {
            Some(next) => source = next,
            None => break,
        }
    }
    Some(trace)
}
