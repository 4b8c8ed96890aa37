use percent_encoding::percent_decode;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Decoded `application/x-www-form-urlencoded` data: key to values, in
/// key order with values in body order.
pub type FormValues = BTreeMap<String, Vec<String>>;

/// Every `%` must start a two-digit hex escape and `;` is not a separator.
fn well_formed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:[^%;]|%[0-9A-Fa-f]{2})*$").expect("invalid regex"))
}

/// Parses a URL-encoded body. Returns `None` when the body is not valid
/// UTF-8, carries a malformed percent escape, uses `;` separators, or has
/// escapes that decode to invalid UTF-8.
pub(crate) fn parse_form(body: &[u8]) -> Option<FormValues> {
    let text = std::str::from_utf8(body).ok()?;
    if !well_formed().is_match(text) {
        return None;
    }
    let mut values = FormValues::new();
    for pair in text.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        values
            .entry(unescape(key)?)
            .or_default()
            .push(unescape(value)?);
    }
    Some(values)
}

fn unescape(component: &str) -> Option<String> {
    let spaced = component.replace('+', " ");
    percent_decode(spaced.as_bytes())
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// True when the form holds exactly one key whose first value is empty,
/// e.g. a body of `x=` or a plain word that is not form data at all.
pub(crate) fn is_single_empty_pair(values: &FormValues) -> bool {
    values.len() == 1
        && values
            .values()
            .next()
            .and_then(|v| v.first())
            .is_some_and(|v| v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_escapes_and_repeated_keys() {
        let values = parse_form(b"a=1&b=hello+world&a=%2F").unwrap();
        assert_eq!(values["a"], ["1", "/"]);
        assert_eq!(values["b"], ["hello world"]);
    }

    #[test]
    fn rejects_bad_escapes_and_semicolons() {
        assert!(parse_form(b"a=%zz").is_none());
        assert!(parse_form(b"a=%4").is_none());
        assert!(parse_form(b"a=1;b=2").is_none());
        assert!(parse_form(&[0xff, b'=', b'1']).is_none());
    }

    #[test]
    fn rejects_escapes_decoding_to_invalid_utf8() {
        assert!(parse_form(b"x=%FF").is_none());
        assert!(parse_form(b"%C3=1").is_none());
        assert_eq!(parse_form(b"x=%C3%A9").unwrap()["x"], ["\u{e9}"]);
    }

    #[test]
    fn empty_body_parses_to_nothing() {
        assert!(parse_form(b"").unwrap().is_empty());
    }

    #[test]
    fn single_empty_pair_detection() {
        assert!(is_single_empty_pair(&parse_form(b"x=").unwrap()));
        assert!(is_single_empty_pair(&parse_form(b"hello").unwrap()));
        assert!(!is_single_empty_pair(&parse_form(b"x=1").unwrap()));
        assert!(!is_single_empty_pair(&parse_form(b"x=&y=").unwrap()));
    }
}
