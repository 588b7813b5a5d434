// src/client.rs

use crate::config::GeocoderConfig;
use crate::error::GeocodeError;
use crate::resolver::Geocoder;
use crate::types::GeocodedPlace;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// HTTP client for a Nominatim-compatible geocoding service.
///
/// `NominatimClient` normalizes the configured base URL once, builds a single
/// `reqwest::Client` carrying the default headers and timeout, and issues
/// `GET {base}/search?format=json&q=...` requests through it.
///
/// ```rust,no_run
/// use riskmap_rs::{GeocoderConfig, NominatimClient, GeocodeError};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), GeocodeError> {
/// let client = NominatimClient::new(&GeocoderConfig::default())?;
/// let places = client.search("Nagpur, India").await?;
/// for place in places {
///     println!("{} -> ({}, {})", place.display_name, place.lat, place.lon);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NominatimClient {
    pub base_url: String,
    pub(crate) http_client: Client,
}

impl NominatimClient {
    /// Creates a new `NominatimClient` from `config`.
    ///
    /// A missing scheme defaults to `http://` and trailing slashes are removed.
    /// Fails if the URL cannot serve as a base or a header value is invalid.
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let mut temp_url_string = config.base_url.trim().to_string();

        // Ensure scheme is present
        if !temp_url_string.starts_with("http://") && !temp_url_string.starts_with("https://") {
            temp_url_string = format!("http://{}", temp_url_string);
        }

        let parsed_base_url = Url::parse(&temp_url_string)?;

        if parsed_base_url.cannot_be_a_base() {
            return Err(GeocodeError::InvalidUrl(format!(
                "The geocoder URL '{}' resolved to '{}', which cannot be a base URL.",
                config.base_url, parsed_base_url
            )));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(GeocodeError::InvalidHeaderValue)?,
        );
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(GeocodeError::ReqwestError)?;

        let base_url = parsed_base_url.as_str().trim_end_matches('/').to_string();

        log::debug!(
            "NominatimClient initialized with base_url: {}, timeout: {:?}",
            base_url,
            config.timeout
        );

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Runs a free-text search and returns every candidate in server order.
    ///
    /// The query is sent as is; country qualification is the resolver's job.
    pub async fn search(&self, query: &str) -> Result<Vec<GeocodedPlace>, GeocodeError> {
        if query.trim().is_empty() {
            return Err(GeocodeError::InvalidInput(
                "search query cannot be empty".to_string(),
            ));
        }

        let params = [
            ("format".to_string(), "json".to_string()),
            ("q".to_string(), query.to_string()),
        ];
        self._get_with_url_params("search", &params).await
    }

    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Result<Url, GeocodeError> {
        let full_url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        Url::parse(&full_url).map_err(|e| {
            GeocodeError::InvalidUrl(format!(
                "Failed to build URL from base '{}' and endpoint '{}': {}",
                self.base_url, endpoint, e
            ))
        })
    }

    pub(crate) async fn _get_with_url_params<R: DeserializeOwned + Send + 'static>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<R, GeocodeError> {
        let mut full_url = self.endpoint_url(endpoint)?;

        if !params.is_empty() {
            let mut pairs = full_url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("--- Geocoder GET Request ---");
            log::debug!("URL: {}", full_url.as_str());
            log::debug!("----------------------------");
        }

        let response = self
            .http_client
            .get(full_url)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Geocoder request to '{}' failed: {}", endpoint, e);
                GeocodeError::ReqwestError(e)
            })?;

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("--- Geocoder Response ---");
            log::debug!("Status: {}", response.status());
            for (name, value) in response.headers() {
                log::debug!("Header: {}: {:?}", name, value);
            }
        }

        self._send_and_process_response(response, endpoint).await
    }
}

impl Geocoder for NominatimClient {
    async fn lookup(&self, query: &str) -> Result<Vec<GeocodedPlace>, GeocodeError> {
        self.search(query).await
    }
}
