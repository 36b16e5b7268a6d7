use crate::preference::PreferenceSet;
use http::HeaderMap;
use http::header::{self, HeaderName};

/// The `identity` content-coding, a synonym for "no encoding".
///
/// It is acceptable for every request unless the client excludes it, either
/// explicitly or through `*`.
pub const IDENTITY: &str = "identity";

const WILDCARD: &str = "*";
const MEDIA_WILDCARD: &str = "*/*";

/// Resolves the weight a preference set gives to an offer.
type Fallback = fn(&PreferenceSet, &str) -> Option<f64>;

/// One axis of proactive negotiation, tied to its request header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Negotiated with `Accept-Charset`.
    Charset,
    /// Negotiated with `Accept-Encoding`.
    Encoding,
    /// Negotiated with `Accept-Language`.
    Language,
    /// Negotiated with `Accept`.
    MediaType,
}

impl Dimension {
    /// Returns the request header carrying the client preferences.
    pub fn header_name(&self) -> HeaderName {
        match self {
            Dimension::Charset => header::ACCEPT_CHARSET,
            Dimension::Encoding => header::ACCEPT_ENCODING,
            Dimension::Language => header::ACCEPT_LANGUAGE,
            Dimension::MediaType => header::ACCEPT,
        }
    }

    /// Returns the `Vary` token for responses negotiated on this dimension.
    pub fn vary_token(&self) -> &'static str {
        match self {
            Dimension::Charset => "accept-charset",
            Dimension::Encoding => "accept-encoding",
            Dimension::Language => "accept-language",
            Dimension::MediaType => "accept",
        }
    }

    fn fallback(&self) -> Fallback {
        match self {
            Dimension::MediaType => media_range_weight,
            Dimension::Charset | Dimension::Encoding | Dimension::Language => token_weight,
        }
    }

    /// Selects the best offer for this dimension.
    pub fn select<'a, S>(&self, prefs: &PreferenceSet, offers: &'a [S]) -> Option<&'a str>
    where
        S: AsRef<str>,
    {
        match self {
            Dimension::Charset => select_charset(prefs, offers),
            Dimension::Encoding => select_encoding(prefs, offers),
            Dimension::Language => select_language(prefs, offers),
            Dimension::MediaType => select_media_type(prefs, offers),
        }
    }
}

/// Exact token, then `*`.
fn token_weight(prefs: &PreferenceSet, offer: &str) -> Option<f64> {
    prefs.weight(offer).or_else(|| prefs.weight(WILDCARD))
}

/// Exact `type/subtype`, then `type/*`, then `*/*`.
fn media_range_weight(prefs: &PreferenceSet, offer: &str) -> Option<f64> {
    if let Some(weight) = prefs.weight(offer) {
        return Some(weight);
    }

    // Offers without a subtype have no `type/*` range to fall back on
    offer
        .split_once('/')
        .and_then(|(kind, _)| prefs.weight(&format!("{kind}/*")))
        .or_else(|| prefs.weight(MEDIA_WILDCARD))
}

/// Scores every offer in order and keeps the first one with the highest
/// positive weight.
fn best_offer<'a, S>(
    prefs: &PreferenceSet,
    offers: &'a [S],
    fallback: Fallback,
) -> Option<&'a str>
where
    S: AsRef<str>,
{
    // No header means no preference: the server's first choice wins
    if !prefs.is_present() {
        return offers.first().map(|offer| offer.as_ref());
    }

    let mut best: Option<(&'a str, f64)> = None;

    for offer in offers.iter().map(|offer| offer.as_ref()) {
        let Some(weight) = fallback(prefs, offer) else {
            tracing::trace!(offer, "offer not listed");
            continue;
        };

        // Strictly greater, so zero and negative weights never win and ties
        // keep the earlier offer
        let best_weight = best.map_or(0.0, |(_, weight)| weight);
        if weight > best_weight {
            best = Some((offer, weight));
        }
    }

    best.map(|(offer, _)| offer)
}

/// Selects the best charset offer according to `Accept-Charset`.
///
/// Without the header the first offer is returned. Returns `None` when no
/// offer is acceptable or `offers` is empty.
pub fn select_charset<'a, S>(prefs: &PreferenceSet, offers: &'a [S]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    best_offer(prefs, offers, Dimension::Charset.fallback())
}

/// Selects the best language offer according to `Accept-Language`.
///
/// Tags are compared as whole tokens: `en` does not match `en-US`.
pub fn select_language<'a, S>(prefs: &PreferenceSet, offers: &'a [S]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    best_offer(prefs, offers, Dimension::Language.fallback())
}

/// Selects the best media type offer according to `Accept`.
///
/// A listed `type/subtype` takes precedence over `type/*`, which takes
/// precedence over `*/*`, whatever their order in the header.
pub fn select_media_type<'a, S>(prefs: &PreferenceSet, offers: &'a [S]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    best_offer(prefs, offers, Dimension::MediaType.fallback())
}

/// Selects the best content-coding according to `Accept-Encoding`.
///
/// When no offer is acceptable, falls back to [`IDENTITY`] unless the client
/// gave `identity` (or `*` without `identity`) a weight of zero or less. This
/// also applies to an empty offer list.
pub fn select_encoding<'a, S>(prefs: &PreferenceSet, offers: &'a [S]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    let fallback = Dimension::Encoding.fallback();
    if let Some(offer) = best_offer(prefs, offers, fallback) {
        return Some(offer);
    }

    // `identity` is implied unless `identity` or `*` is listed without a
    // positive weight; `q=NaN` fails every comparison and counts as excluded
    match fallback(prefs, IDENTITY) {
        Some(weight) if weight <= 0.0 || weight.is_nan() => None,
        _ => Some(IDENTITY),
    }
}

/// Negotiates one dimension straight from request headers.
pub fn negotiate<'a, S>(
    headers: &HeaderMap,
    dimension: Dimension,
    offers: &'a [S],
) -> Option<&'a str>
where
    S: AsRef<str>,
{
    let prefs = PreferenceSet::from_headers(headers, dimension.header_name());
    let selected = dimension.select(&prefs, offers);
    tracing::debug!(?dimension, ?selected, "negotiated");
    selected
}

/// Returns the best charset for a request. See [`select_charset`].
pub fn content_charset<'a, S>(headers: &HeaderMap, offers: &'a [S]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    negotiate(headers, Dimension::Charset, offers)
}

/// Returns the best content-coding for a request. See [`select_encoding`].
pub fn content_encoding<'a, S>(headers: &HeaderMap, offers: &'a [S]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    negotiate(headers, Dimension::Encoding, offers)
}

/// Returns the best language for a request. See [`select_language`].
pub fn content_language<'a, S>(headers: &HeaderMap, offers: &'a [S]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    negotiate(headers, Dimension::Language, offers)
}

/// Returns the best media type for a request. See [`select_media_type`].
pub fn content_type<'a, S>(headers: &HeaderMap, offers: &'a [S]) -> Option<&'a str>
where
    S: AsRef<str>,
{
    negotiate(headers, Dimension::MediaType, offers)
}
