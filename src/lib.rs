//! HTTP proactive content negotiation.
//!
//! This crate selects the best representation a server can produce from the
//! client's `Accept`, `Accept-Charset`, `Accept-Encoding` and
//! `Accept-Language` headers, following the quality value model of
//! [RFC 7231 §5.3](https://tools.ietf.org/html/rfc7231#section-5.3).
//!
//! # Example
//!
//! ```
//! use http_negotiation::{PreferenceSet, select_encoding, select_media_type};
//!
//! let accept = PreferenceSet::parse(["text/html;q=0.2, text/*"]);
//! assert_eq!(
//!     select_media_type(&accept, &["text/html", "text/plain"]),
//!     Some("text/plain")
//! );
//!
//! let accept_encoding = PreferenceSet::parse(["br"]);
//! assert_eq!(select_encoding(&accept_encoding, &["gzip"]), Some("identity"));
//! ```
//!
//! # Selection Rules
//!
//! - Without the header, the first offer is selected.
//! - Otherwise the offer with the highest positive weight wins, and ties go
//!   to the offer listed first.
//! - An offer without an exact entry takes the weight of `*`, or for media
//!   types of `type/*` and then `*/*`.
//! - For encodings, `identity` is selected when no offer is acceptable,
//!   unless the client gave it (or `*`) a zero weight.
//! - `None` means nothing is acceptable; a server would usually answer
//!   `406 Not Acceptable`.
//!
//! # Middleware
//!
//! [`NegotiationLayer`] runs the negotiation for every request and hands the
//! outcome to the inner service as a [`Negotiated`] request extension.
//!
//! ```ignore
//! use http_negotiation::NegotiationLayer;
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(
//!         NegotiationLayer::new()
//!             .media_types(["application/json", "text/html"])
//!             .languages(["en", "fr"])
//!             .reject_not_acceptable(true),
//!     )
//!     .service(my_service);
//! ```
//!
//! The middleware appends the negotiated header names to the response's
//! `Vary` header.

#![deny(missing_docs)]

mod future;
mod layer;
mod negotiate;
mod negotiated;
mod preference;
mod service;

pub use future::ResponseFuture;
pub use layer::NegotiationLayer;
pub use negotiate::{
    Dimension, IDENTITY, content_charset, content_encoding, content_language, content_type,
    negotiate, select_charset, select_encoding, select_language, select_media_type,
};
pub use negotiated::Negotiated;
pub use preference::{DEFAULT_WEIGHT, INVALID_WEIGHT, PreferenceSet, parse_spec};
pub use service::NegotiationService;
