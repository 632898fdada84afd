//! # Result Envelope
//!
//! A uniform response structure for web APIs: every handler outcome, whether a
//! payload, a bare status, an error or a set of field validation failures, is
//! normalized into a [`ResultEnvelope`] with a fresh id and an integer status
//! code.
//!
//! ## Basic Usage
//!
//! ```rust
//! use result_envelope::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, IntoEnvelope)]
//! struct Product {
//!     name: String,
//! }
//!
//! // Payloads become successful envelopes
//! let envelope = Product { name: "Widget".to_string() }.into_envelope();
//! assert_eq!(envelope.code(), 200);
//!
//! // Errors keep their message, the code defaults to 500
//! let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! let envelope: ResultEnvelope<Product> = ResultEnvelope::from_error(&io);
//! assert_eq!(envelope.message(), Some("disk full"));
//! assert_eq!(envelope.code(), 500);
//!
//! // Field validation failures
//! let mut state = ModelState::new();
//! state.add_error("username", "Min length must be 4");
//! let envelope: Envelope = ResultEnvelope::from_validation(&state);
//! assert_eq!(envelope.code(), 400);
//! assert_eq!(envelope.model_state_errors()[0].key, "username");
//! ```
//!
//! ## Injected identifiers
//!
//! ```rust
//! use result_envelope::*;
//! use uuid::Uuid;
//!
//! let factory = EnvelopeFactory::with_id_source(SequentialIds::new(), EnvelopeConfig::default());
//! let envelope = factory.page(vec!["a", "b"], 10);
//! assert_eq!(envelope.id(), Uuid::from_u128(1));
//! assert_eq!(envelope.total(), Some(10));
//! ```

mod builder;
mod config;
mod envelope;
mod factory;
mod id;
mod model_state;
#[cfg(feature = "axum")]
mod response;
mod schema;
pub mod status;

pub use builder::*;
pub use config::*;
pub use envelope::*;
pub use factory::*;
pub use id::*;
pub use model_state::*;
pub use schema::*;
pub use status::IntoStatusCode;

// Re-export the derive macro
pub use result_envelope_derive::IntoEnvelope;

pub trait IntoEnvelope {
    fn into_envelope(self) -> ResultEnvelope<Self>
    where
        Self: Sized;
}
