//! Typed triggers decoded from function host invocation envelopes.
//!
//! This crate provides:
//! - A generic envelope decoder for `{Data: {<kind>: ...}, Metadata: ...}`
//! - HTTP and timer trigger models plus a generic trigger for other kinds
//! - The [`Trigger`] read interface and the [`AnyTrigger`] sum type
//! - Functional options for trigger construction
//!
//! Core invariants:
//! - The input stream is read to completion once and released on every path
//! - A malformed envelope never yields a partially populated trigger
//! - Triggers are immutable once constructed
//!
//! ## Quick Start
//!
//! ```rust
//! use funcbridge_triggers::{HttpTrigger, Trigger};
//! use serde::Deserialize;
//!
//! #[derive(Default, Deserialize)]
//! struct Greeting {
//!     name: String,
//! }
//!
//! let envelope = br#"{
//!     "Data": {"req": {"Url": "http://localhost/api/hello", "Method": "POST",
//!                      "Body": "{\"name\":\"ada\"}", "Headers": {}}},
//!     "Metadata": {}
//! }"#;
//!
//! let trigger = HttpTrigger::from_reader(&envelope[..])?;
//! let greeting: Greeting = trigger.parse()?;
//! assert_eq!(greeting.name, "ada");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

/// Generic trigger for kinds without a dedicated model.
pub mod base;
/// Envelope decoding shared by every trigger kind.
pub mod envelope;
/// Error types for trigger construction and access.
pub mod errors;
/// URL-encoded form parsing.
pub mod form;
/// HTTP trigger.
pub mod http;
/// Invocation metadata types.
pub mod metadata;
/// Functional options for trigger construction.
pub mod options;
/// Timer trigger.
pub mod timer;
/// The trigger read interface and the sum type over known kinds.
pub mod trigger;

pub use base::BaseTrigger;
pub use envelope::{decode_envelope, Decoded};
pub use errors::TriggerError;
pub use form::FormValues;
pub use funcbridge_data::{HeaderMap, RawPayload};
pub use http::{HttpIdentity, HttpIdentityClaims, HttpTrigger};
pub use metadata::{HttpMetadata, Metadata, SysMetadata};
pub use options::{with_name, TriggerOption, TriggerOptions};
pub use timer::{TimerSchedule, TimerScheduleStatus, TimerTrigger};
pub use trigger::{AnyTrigger, Trigger, TriggerKind};
