use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator used when several values for one header are folded together.
pub const HEADER_VALUE_SEPARATOR: &str = ", ";

/// Returns the canonical MIME form of a header key (`content-type` becomes
/// `Content-Type`).
///
/// Keys containing bytes that are not valid in a header token are returned
/// unchanged.
pub fn canonical_header_key(key: &str) -> String {
    if key.is_empty() || !key.bytes().all(is_token_byte) {
        return key.to_string();
    }
    let mut upper = true;
    key.chars()
        .map(|c| {
            let mapped = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            mapped
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// Header multimap as delivered by the host (`{key: [values]}`).
///
/// Keys are stored as received; lookups ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderMap(BTreeMap<String, Vec<String>>);

impl HeaderMap {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first value stored for `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns every value stored for `name`, ignoring case.
    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.find_key(name)
            .and_then(|key| self.0.get(key))
            .map(Vec::as_slice)
    }

    /// Whether a value exists for `name`, ignoring case.
    pub fn contains_key(&self, name: &str) -> bool {
        self.find_key(name).is_some()
    }

    /// Appends `value` to the values stored for `name`.
    ///
    /// New keys are stored in canonical MIME form.
    pub fn add(&mut self, name: &str, value: impl Into<String>) {
        let key = self.key_for(name);
        self.0.entry(key).or_default().push(value.into());
    }

    /// Replaces every value stored for `name` with `value`.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let key = self.key_for(name);
        self.0.insert(key, vec![value.into()]);
    }

    /// Folds `value` into the values stored for `name`, so the key holds one
    /// value joined with `", "`.
    pub fn merge_joined(&mut self, name: &str, value: impl Into<String>) {
        let key = self.key_for(name);
        let values = self.0.entry(key).or_default();
        values.push(value.into());
        let joined = values.join(HEADER_VALUE_SEPARATOR);
        *values = vec![joined];
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates keys and their values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn find_key(&self, name: &str) -> Option<&String> {
        self.0.keys().find(|key| key.eq_ignore_ascii_case(name))
    }

    fn key_for(&self, name: &str) -> String {
        match self.find_key(name) {
            Some(existing) => existing.clone(),
            None => canonical_header_key(name),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = HeaderMap::new();
        for (key, value) in iter {
            let key: String = key.into();
            headers.add(&key, value);
        }
        headers
    }
}
