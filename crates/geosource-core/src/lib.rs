//! Schema types for the data-sources GeoJSON endpoint.
//!
//! Every type in this crate models the wire shape of
//! `GET /api/rest/data-sources/{dataSourceId}/geojson`: the recursive
//! [`RecordFilter`] tree and [`SortSpec`] list a caller sends as JSON-encoded
//! query parameters, and the [`FeatureCollection`] / [`ErrorResponse`] bodies
//! the server returns. The crate holds no network code and evaluates nothing;
//! filter and sort semantics are executed by the external server.
//!
//! Two wire quirks consumers must know about:
//!
//! - Success and error bodies share no discriminant field. A response body is
//!   an error if and only if it carries an `error` key, so check for that key
//!   before decoding a [`FeatureCollection`] — [`ResponseBody::from_value`]
//!   does exactly this.
//! - Filter nodes are loose by contract: a producer may attach fields that
//!   are irrelevant to a node's `type` (say, a `distance` on a `TEXT` node),
//!   and evaluators treat them as absent. Decoding ignores such keys rather
//!   than rejecting them.

pub mod app_config;
pub mod config;
pub mod feature;
pub mod filter;
pub mod geo;
pub mod sort;

pub use app_config::AppConfig;
pub use feature::{
    ErrorResponse, Feature, FeatureCollection, FeatureProperties, PointGeometry, ResponseBody,
};
pub use filter::{BooleanOperator, RecordFilter};
pub use geo::{GeocodeResult, Point};
pub use sort::{encode_sort, SortSpec};

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable was set but could not be parsed.
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
