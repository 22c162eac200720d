//! HTTP client for the data-sources GeoJSON endpoint.
//!
//! Wraps `reqwest` with the endpoint's conventions: HTTP Basic auth on every
//! call, JSON-in-query-string filter and sort parameters, and the
//! error-key-first body disambiguation the contract requires.

use std::time::Duration;

use reqwest::{Client, Url};

use geosource_core::{AppConfig, FeatureCollection, ResponseBody};

use crate::error::GeoApiError;
use crate::query::GeoJsonQuery;
use crate::retry;

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;

/// Client for `GET /api/rest/data-sources/{dataSourceId}/geojson`.
///
/// Manages the HTTP client, Basic-auth credentials, and base URL. Use
/// [`GeoJsonClient::from_config`] in production or [`GeoJsonClient::new`]
/// to point at a mock server in tests.
pub struct GeoJsonClient {
    client: Client,
    base_url: Url,
    email: String,
    password: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GeoJsonClient {
    /// Creates a new client for the mapping application at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeoApiError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn new(
        base_url: &str,
        email: &str,
        password: &str,
        timeout_secs: u64,
    ) -> Result<Self, GeoApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("geosource/0.1 (geojson-export)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // path segments append to the root rather than replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| GeoApiError::InvalidBaseUrl(base_url.to_owned()))?;
        if base_url.cannot_be_a_base() {
            return Err(GeoApiError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            base_url,
            email: email.to_owned(),
            password: password.to_owned(),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Creates a client from loaded [`AppConfig`], including retry settings.
    ///
    /// # Errors
    ///
    /// Same as [`GeoJsonClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeoApiError> {
        Ok(Self::new(
            &config.base_url,
            &config.email,
            &config.password,
            config.request_timeout_secs,
        )?
        .with_retry(config.max_retries, config.retry_backoff_base_ms))
    }

    /// Overrides the retry policy. `max_retries = 0` disables retries.
    #[must_use]
    pub const fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches GeoJSON for a data source.
    ///
    /// Sends the request with Basic auth, retries transient failures per the
    /// configured policy, and decodes the body via the error-key check: a
    /// body carrying an `error` key is an API error even under a 2xx status.
    ///
    /// # Errors
    ///
    /// - [`GeoApiError::Api`] if the server returned an error body or a
    ///   non-2xx status.
    /// - [`GeoApiError::Http`] on network failure.
    /// - [`GeoApiError::Deserialize`] if a success body does not match the
    ///   feature-collection shape.
    pub async fn fetch_geojson(
        &self,
        data_source_id: &str,
        query: &GeoJsonQuery,
    ) -> Result<FeatureCollection, GeoApiError> {
        let pairs = query
            .query_pairs()
            .map_err(|e| GeoApiError::Deserialize {
                context: format!("geojson(dataSourceId={data_source_id}) query encoding"),
                source: e,
            })?;
        let url = self.build_url(data_source_id, &pairs)?;
        tracing::debug!(data_source_id, url = %url, "fetching geojson");
        retry::retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_once(&url, data_source_id)
        })
        .await
    }

    /// Fetches every matching feature, bypassing pagination (`all=true`).
    ///
    /// # Errors
    ///
    /// Same as [`GeoJsonClient::fetch_geojson`].
    pub async fn fetch_all(
        &self,
        data_source_id: &str,
    ) -> Result<FeatureCollection, GeoApiError> {
        self.fetch_geojson(data_source_id, &GeoJsonQuery::new().all())
            .await
    }

    async fn fetch_once(
        &self,
        url: &Url,
        data_source_id: &str,
    ) -> Result<FeatureCollection, GeoApiError> {
        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.email, Some(&self.password))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(e) if status.is_success() => {
                return Err(GeoApiError::Deserialize {
                    context: format!("geojson(dataSourceId={data_source_id})"),
                    source: e,
                });
            }
            // Non-2xx with a non-JSON body (e.g. a proxy error page).
            Err(_) => {
                return Err(GeoApiError::Api {
                    status: status.as_u16(),
                    message: format!("HTTP {status}"),
                    details: None,
                });
            }
        };

        match ResponseBody::from_value(value) {
            Ok(ResponseBody::Error(error)) => Err(GeoApiError::Api {
                status: status.as_u16(),
                message: error.error,
                details: error.details,
            }),
            Ok(ResponseBody::Collection(collection)) if status.is_success() => Ok(collection),
            Ok(ResponseBody::Collection(_)) => Err(GeoApiError::Api {
                status: status.as_u16(),
                message: format!("HTTP {status} without error body"),
                details: None,
            }),
            Err(e) if status.is_success() => Err(GeoApiError::Deserialize {
                context: format!("geojson(dataSourceId={data_source_id})"),
                source: e,
            }),
            Err(_) => Err(GeoApiError::Api {
                status: status.as_u16(),
                message: format!("HTTP {status}"),
                details: None,
            }),
        }
    }

    /// Builds the full request URL with properly percent-encoded path and
    /// query parameters.
    fn build_url(
        &self,
        data_source_id: &str,
        pairs: &[(&str, String)],
    ) -> Result<Url, GeoApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GeoApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "rest", "data-sources", data_source_id, "geojson"]);
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (k, v) in pairs {
                query.append_pair(k, v);
            }
        }
        Ok(url)
    }
}
