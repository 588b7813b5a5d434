use std::env;
use std::time::Duration;

use crate::GeocodeError;

/// Public Nominatim instance used when nothing else is configured.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Country appended to every query unless overridden.
pub const DEFAULT_COUNTRY: &str = "India";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection and query settings for the geocoding collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderConfig {
    /// Base URL of a Nominatim-compatible service (the `/search` path is appended).
    pub base_url: String,
    /// Qualifier appended to queries as `"<query>, <country>"`. `None` disables it.
    pub country: Option<String>,
    /// Sent as `User-Agent`; the public Nominatim instance rejects anonymous clients.
    pub user_agent: String,
    /// Overall request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        GeocoderConfig {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            country: Some(DEFAULT_COUNTRY.to_string()),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl GeocoderConfig {
    /// Creates a configuration pointing at `base_url` with every other setting at its default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        GeocoderConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Builds a configuration from the process environment, falling back to defaults.
    ///
    /// Recognised variables:
    /// * `RISKMAP_GEOCODER_URL`
    /// * `RISKMAP_COUNTRY` (an empty value disables the country qualifier)
    /// * `RISKMAP_TIMEOUT_SECS` (`0` disables the timeout)
    /// * `RISKMAP_USER_AGENT`
    pub fn from_env() -> Result<Self, GeocodeError> {
        let mut config = GeocoderConfig::default();

        if let Ok(url) = env::var("RISKMAP_GEOCODER_URL") {
            config.base_url = url;
        }

        if let Ok(country) = env::var("RISKMAP_COUNTRY") {
            let country = country.trim();
            config.country = if country.is_empty() {
                None
            } else {
                Some(country.to_string())
            };
        }

        if let Ok(raw) = env::var("RISKMAP_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                GeocodeError::InvalidInput(format!(
                    "RISKMAP_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?;
            config.timeout = if secs == 0 {
                None
            } else {
                Some(Duration::from_secs(secs))
            };
        }

        if let Ok(agent) = env::var("RISKMAP_USER_AGENT") {
            config.user_agent = agent;
        }

        log::debug!("Geocoder configuration loaded: {:?}", config);
        Ok(config)
    }
}
