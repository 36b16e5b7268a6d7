use http::HeaderMap;
use http::header::AsHeaderName;
use std::collections::HashMap;

/// Weight given to a spec without a `q` parameter.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Weight given to a spec whose `q` parameter is not a number.
///
/// It is below every valid quality value, so such a spec never wins a
/// negotiation and never makes `identity` acceptable.
pub const INVALID_WEIGHT: f64 = -1.0;

/// Client preferences parsed out of one `Accept*` header.
///
/// Maps each token of the header to its weight, and remembers whether the
/// header was sent at all: a present but empty header expresses no usable
/// preference, while an absent one means the client has no preference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceSet {
    weights: HashMap<String, f64>,
    present: bool,
}

impl PreferenceSet {
    /// Returns the preferences of a request that did not send the header.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Parses every occurrence of a header into one set.
    ///
    /// Specs are folded in order, so a token repeated later in the same
    /// value or in a later occurrence overwrites the earlier weight.
    pub fn parse<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut weights = HashMap::new();

        for value in values {
            for (token, weight) in value.as_ref().split(',').filter_map(parse_spec) {
                weights.insert(token, weight);
            }
        }

        Self {
            weights,
            present: true,
        }
    }

    /// Reads the preferences for header `name` out of a header map.
    ///
    /// Bytes outside visible ASCII are decoded lossily, so the ASCII specs
    /// sharing a value with them still count.
    pub fn from_headers<K>(headers: &HeaderMap, name: K) -> Self
    where
        K: AsHeaderName,
    {
        let mut values = headers.get_all(name).into_iter().peekable();
        if values.peek().is_none() {
            return Self::absent();
        }

        Self::parse(values.map(|v| String::from_utf8_lossy(v.as_bytes())))
    }

    /// Returns true if the header was sent, even with an empty value.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Returns the weight listed for exactly `token`, without wildcards.
    pub fn weight(&self, token: &str) -> Option<f64> {
        self.weights.get(token).copied()
    }

    /// Returns the number of distinct tokens.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if no token was parsed.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterates over `(token, weight)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(token, weight)| (token.as_str(), *weight))
    }
}

/// Parses a single spec like `"gzip"` or `"text/html; level=1; q=0.5"`.
///
/// Returns `None` for a spec that is empty once whitespace is removed.
pub fn parse_spec(spec: &str) -> Option<(String, f64)> {
    let spec: String = spec.chars().filter(|c| !c.is_whitespace()).collect();
    if spec.is_empty() {
        return None;
    }

    let mut parts = spec.split(';');
    let token = parts.next().unwrap_or_default().to_owned();

    // Malformed input may repeat `q`; the last one wins.
    let weight = parts
        .filter_map(|param| {
            let param = param.to_ascii_lowercase();
            param.strip_prefix("q=").map(parse_weight)
        })
        .last()
        .unwrap_or(DEFAULT_WEIGHT);

    Some((token, weight))
}

fn parse_weight(value: &str) -> f64 {
    value.parse::<f64>().unwrap_or(INVALID_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use http::header::{ACCEPT, ACCEPT_ENCODING};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_spec_without_quality() {
        assert_eq!(parse_spec("gzip"), Some(("gzip".to_owned(), 1.0)));
    }

    #[test]
    fn test_parse_spec_with_quality() {
        assert_eq!(parse_spec("gzip;q=0.8"), Some(("gzip".to_owned(), 0.8)));
        assert_eq!(parse_spec("gzip;Q=0.3"), Some(("gzip".to_owned(), 0.3)));
    }

    #[test]
    fn test_parse_spec_strips_whitespace() {
        assert_eq!(
            parse_spec("  text/html ; level=1 ;  q = 0.5 "),
            Some(("text/html".to_owned(), 0.5))
        );
    }

    #[test]
    fn test_parse_spec_keeps_token_case() {
        assert_eq!(parse_spec("UTF-8;q=0.1"), Some(("UTF-8".to_owned(), 0.1)));
    }

    #[test]
    fn test_parse_spec_last_quality_wins() {
        assert_eq!(
            parse_spec("gzip;q=0.2;q=0.9"),
            Some(("gzip".to_owned(), 0.9))
        );
    }

    #[test]
    fn test_parse_spec_ignores_other_params() {
        assert_eq!(
            parse_spec("text/plain;charset=utf-8"),
            Some(("text/plain".to_owned(), 1.0))
        );
    }

    #[test]
    fn test_parse_spec_invalid_quality() {
        assert_eq!(
            parse_spec("identity;q=bogus"),
            Some(("identity".to_owned(), INVALID_WEIGHT))
        );
        assert_eq!(parse_spec("gzip;q="), Some(("gzip".to_owned(), INVALID_WEIGHT)));
    }

    #[test]
    fn test_parse_spec_empty() {
        assert_eq!(parse_spec(""), None);
        assert_eq!(parse_spec("   "), None);
    }

    #[test]
    fn test_parse_skips_empty_specs() {
        let prefs = PreferenceSet::parse([",gzip,, deflate;q=0.5,"]);
        assert_eq!(prefs.len(), 2);
        assert_eq!(prefs.weight("gzip"), Some(1.0));
        assert_eq!(prefs.weight("deflate"), Some(0.5));
    }

    #[test]
    fn test_parse_empty_value_is_present() {
        let prefs = PreferenceSet::parse([""]);
        assert!(prefs.is_present());
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_absent() {
        let prefs = PreferenceSet::absent();
        assert!(!prefs.is_present());
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let prefs = PreferenceSet::parse(["gzip;q=0.1, br", "gzip;q=0.7"]);
        assert_eq!(prefs.weight("gzip"), Some(0.7));
        assert_eq!(prefs.weight("br"), Some(1.0));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let value = "text/html;q=0.2, text/*, */*;q=0.1";
        assert_eq!(PreferenceSet::parse([value]), PreferenceSet::parse([value]));
    }

    #[test]
    fn test_iter() {
        let prefs = PreferenceSet::parse(["en;q=0.2"]);
        let entries: Vec<_> = prefs.iter().collect();
        assert_eq!(entries, vec![("en", 0.2)]);
    }

    #[test]
    fn test_from_headers_absent() {
        let headers = HeaderMap::new();
        let prefs = PreferenceSet::from_headers(&headers, ACCEPT);
        assert!(!prefs.is_present());
    }

    #[test]
    fn test_from_headers_folds_occurrences() {
        let mut headers = HeaderMap::new();
        headers.append(ACCEPT_ENCODING, HeaderValue::from_static("gzip;q=0.5"));
        headers.append(ACCEPT_ENCODING, HeaderValue::from_static("br, gzip"));

        let prefs = PreferenceSet::from_headers(&headers, ACCEPT_ENCODING);
        assert!(prefs.is_present());
        assert_eq!(prefs.weight("gzip"), Some(1.0));
        assert_eq!(prefs.weight("br"), Some(1.0));
    }

    #[test]
    fn test_from_headers_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(""));

        let prefs = PreferenceSet::from_headers(&headers, ACCEPT);
        assert!(prefs.is_present());
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_from_headers_keeps_ascii_specs_of_non_ascii_value() {
        let mut headers = HeaderMap::new();
        headers.append(
            ACCEPT_ENCODING,
            HeaderValue::from_bytes("gzip;q=0, identity;q=0, x-\u{fc}".as_bytes()).unwrap(),
        );
        headers.append(ACCEPT_ENCODING, HeaderValue::from_bytes(b"br;q=0.\xff").unwrap());

        let prefs = PreferenceSet::from_headers(&headers, ACCEPT_ENCODING);
        assert!(prefs.is_present());
        assert_eq!(prefs.len(), 4);
        assert_eq!(prefs.weight("gzip"), Some(0.0));
        assert_eq!(prefs.weight("identity"), Some(0.0));
        assert_eq!(prefs.weight("br"), Some(INVALID_WEIGHT));
    }
}
