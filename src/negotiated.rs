use crate::negotiate::{Dimension, negotiate};
use http::HeaderMap;

/// Outcome of negotiating a request, stored in its extensions.
///
/// Only dimensions configured on the [`NegotiationLayer`](crate::NegotiationLayer)
/// have a result; the accessors return `None` both for unconfigured
/// dimensions and for dimensions without an acceptable offer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Negotiated {
    results: Vec<(Dimension, Option<String>)>,
}

impl Negotiated {
    pub(crate) fn from_headers(
        headers: &HeaderMap,
        offers: &[(Dimension, Vec<String>)],
    ) -> Self {
        let results = offers
            .iter()
            .map(|(dimension, offers)| {
                let selected = negotiate(headers, *dimension, offers).map(str::to_owned);
                (*dimension, selected)
            })
            .collect();

        Self { results }
    }

    /// Returns the offer selected for `dimension`.
    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        self.results
            .iter()
            .find(|(d, _)| *d == dimension)
            .and_then(|(_, selected)| selected.as_deref())
    }

    /// Returns the selected charset.
    pub fn charset(&self) -> Option<&str> {
        self.get(Dimension::Charset)
    }

    /// Returns the selected content-coding, possibly `identity`.
    pub fn encoding(&self) -> Option<&str> {
        self.get(Dimension::Encoding)
    }

    /// Returns the selected language.
    pub fn language(&self) -> Option<&str> {
        self.get(Dimension::Language)
    }

    /// Returns the selected media type.
    pub fn media_type(&self) -> Option<&str> {
        self.get(Dimension::MediaType)
    }

    /// Returns true if every negotiated dimension found an acceptable offer.
    pub fn is_acceptable(&self) -> bool {
        self.results.iter().all(|(_, selected)| selected.is_some())
    }
}
