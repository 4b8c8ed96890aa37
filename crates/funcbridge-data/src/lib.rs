//! Payload and header primitives shared by funcbridge triggers and bindings.
//!
//! The types here carry no knowledge of any particular trigger kind. A
//! [`RawPayload`] keeps the exact bytes the host sent so they can be decoded
//! into whatever shape the caller needs later; a [`HeaderMap`] keeps HTTP
//! style multi-value headers with case-insensitive lookup.
//!
#![deny(missing_docs)]

/// Header multimap with case-insensitive lookup.
pub mod header;
/// Opaque payload bytes with on-demand structured decoding.
pub mod raw;

pub use header::{canonical_header_key, HeaderMap, HEADER_VALUE_SEPARATOR};
pub use raw::RawPayload;
