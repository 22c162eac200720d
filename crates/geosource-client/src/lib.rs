//! Async client for the data-sources GeoJSON endpoint.
//!
//! Wraps `reqwest` with the endpoint's auth and query conventions: every
//! request carries HTTP Basic credentials, filter and sort trees travel as
//! JSON-encoded query-string parameters, and response bodies are
//! disambiguated by the presence of an `error` key before being decoded as a
//! feature collection. Transient failures (connect/timeout, 5xx) are retried
//! with jittered exponential back-off; everything else surfaces immediately
//! as a typed [`GeoApiError`].

mod client;
mod error;
mod query;
mod retry;

pub use client::GeoJsonClient;
pub use error::GeoApiError;
pub use query::GeoJsonQuery;
