use crate::negotiate::Dimension;
use crate::service::NegotiationService;
use std::sync::Arc;
use tower::Layer;

/// Offers and policy shared by every service built from one layer.
#[derive(Debug, Clone, Default)]
pub(crate) struct Config {
    pub(crate) offers: Vec<(Dimension, Vec<String>)>,
    pub(crate) reject_not_acceptable: bool,
}

impl Config {
    fn set_offers<I, S>(&mut self, dimension: Dimension, offers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let offers = offers.into_iter().map(Into::into).collect();
        match self.offers.iter_mut().find(|(d, _)| *d == dimension) {
            Some((_, existing)) => *existing = offers,
            None => self.offers.push((dimension, offers)),
        }
    }

    /// Dimensions the responses vary on, in configuration order.
    pub(crate) fn dimensions(&self) -> Vec<Dimension> {
        self.offers.iter().map(|(dimension, _)| *dimension).collect()
    }
}

/// A Tower layer that negotiates request content preferences.
///
/// Only the dimensions given offers through the builder methods are
/// negotiated. The outcome is available to the inner service as a
/// [`Negotiated`](crate::Negotiated) request extension.
///
/// The wrapped service's response body must implement `Default`, which
/// builds the empty `406 Not Acceptable` body. The bound holds even when
/// [`reject_not_acceptable`](Self::reject_not_acceptable) is off.
#[derive(Debug, Clone, Default)]
pub struct NegotiationLayer {
    config: Config,
}

impl NegotiationLayer {
    /// Creates a layer that negotiates nothing and never rejects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the charsets the server can produce, in preference order.
    pub fn charsets<I, S>(mut self, offers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.set_offers(Dimension::Charset, offers);
        self
    }

    /// Sets the content-codings the server can produce, in preference order.
    ///
    /// `identity` does not need to be listed; it is selected when no listed
    /// coding is acceptable and the client did not exclude it.
    pub fn encodings<I, S>(mut self, offers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.set_offers(Dimension::Encoding, offers);
        self
    }

    /// Sets the languages the server can produce, in preference order.
    pub fn languages<I, S>(mut self, offers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.set_offers(Dimension::Language, offers);
        self
    }

    /// Sets the media types the server can produce, in preference order.
    pub fn media_types<I, S>(mut self, offers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.set_offers(Dimension::MediaType, offers);
        self
    }

    /// Answers `406 Not Acceptable` without calling the inner service when
    /// any configured dimension has no acceptable offer.
    pub fn reject_not_acceptable(mut self, reject: bool) -> Self {
        self.config.reject_not_acceptable = reject;
        self
    }
}

impl<S> Layer<S> for NegotiationLayer {
    type Service = NegotiationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        NegotiationService::new(inner, Arc::new(self.config.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_negotiates_nothing() {
        let layer = NegotiationLayer::new();
        assert!(layer.config.offers.is_empty());
        assert!(!layer.config.reject_not_acceptable);
    }

    #[test]
    fn test_builder_keeps_configuration_order() {
        let layer = NegotiationLayer::new()
            .media_types(["application/json"])
            .encodings(["gzip", "br"])
            .languages(vec![String::from("en")]);

        assert_eq!(
            layer.config.dimensions(),
            vec![Dimension::MediaType, Dimension::Encoding, Dimension::Language]
        );
    }

    #[test]
    fn test_builder_replaces_offers() {
        let layer = NegotiationLayer::new()
            .charsets(["utf-8"])
            .charsets(["iso-8859-1", "utf-8"]);

        assert_eq!(
            layer.config.offers,
            vec![(
                Dimension::Charset,
                vec![String::from("iso-8859-1"), String::from("utf-8")]
            )]
        );
    }
}
