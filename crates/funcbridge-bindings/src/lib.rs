//! Options for outbound binding data.
//!
//! Outbound bindings (an HTTP response, a queue message, ...) are described
//! by a [`BindingOptions`] value built from an ordered list of option
//! functions. Encoding that value into the host's response format happens
//! elsewhere.

#![deny(missing_docs)]

/// Binding options and the functions that set them.
pub mod options;

pub use options::{
    with_body, with_data, with_header, with_name, with_status_code, BindingOption, BindingOptions,
};
