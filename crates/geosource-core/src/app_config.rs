//! Application configuration for consumers of the GeoJSON endpoint.

/// Settings for reaching the mapping application's REST API.
///
/// Credentials are required because every call carries HTTP Basic auth.
#[derive(Clone)]
pub struct AppConfig {
    /// Root of the mapping application, e.g. `https://maps.example.org`.
    /// The client appends `/api/rest/...` itself.
    pub base_url: String,
    pub email: String,
    pub password: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("log_level", &self.log_level)
            .finish()
    }
}
