use funcbridge_data::{HeaderMap, RawPayload};
use serde::Serialize;

/// Options for a binding. Not every option applies to every binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindingOptions {
    /// Name of the binding.
    pub name: Option<String>,
    /// Status code of an HTTP binding.
    pub status_code: Option<u16>,
    /// Headers of an HTTP binding.
    pub header: HeaderMap,
    /// Body of an HTTP binding.
    pub body: RawPayload,
    /// Data of a generic binding.
    pub data: RawPayload,
}

/// A function that sets [`BindingOptions`].
pub type BindingOption = Box<dyn FnOnce(&mut BindingOptions) + Send>;

impl BindingOptions {
    /// Starts from defaults and applies `options` in order; later options
    /// see the effects of earlier ones.
    pub fn new(options: impl IntoIterator<Item = BindingOption>) -> Self {
        let mut opts = BindingOptions::default();
        opts.apply(options);
        opts
    }

    /// Applies further `options`, in order, to an existing value.
    pub fn apply(&mut self, options: impl IntoIterator<Item = BindingOption>) {
        for option in options {
            option(self);
        }
    }
}

/// Sets the binding name.
pub fn with_name(name: impl Into<String>) -> BindingOption {
    let name = name.into();
    Box::new(move |o: &mut BindingOptions| o.name = Some(name))
}

/// Sets the status code of an HTTP binding.
pub fn with_status_code(status_code: u16) -> BindingOption {
    Box::new(move |o: &mut BindingOptions| o.status_code = Some(status_code))
}

/// Adds headers to an HTTP binding.
///
/// A key that already has a value keeps it: the new value is appended,
/// joined with `", "`.
pub fn with_header<K, V>(header: impl IntoIterator<Item = (K, V)>) -> BindingOption
where
    K: Into<String>,
    V: Into<String>,
{
    let pairs: Vec<(String, String)> = header
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    Box::new(move |o: &mut BindingOptions| {
        for (key, value) in pairs {
            o.header.merge_joined(&key, value);
        }
    })
}

/// Sets the body of an HTTP binding.
pub fn with_body(body: impl Into<RawPayload>) -> BindingOption {
    let body = body.into();
    Box::new(move |o: &mut BindingOptions| o.body = body)
}

/// Sets the data of a generic binding.
pub fn with_data(data: impl Into<RawPayload>) -> BindingOption {
    let data = data.into();
    Box::new(move |o: &mut BindingOptions| o.data = data)
}
