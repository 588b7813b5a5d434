use reqwest::header::InvalidHeaderValue;
// src/error.rs
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("URL parsing failed: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("JSON deserialization failed: {0}")]
    JsonDeserializationFailed(String),

    #[error("Geocoding API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(InvalidHeaderValue),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl GeocodeError {
    /// Creates a `GeocodeError` from an HTTP status code and a JSON response body.
    ///
    /// Nominatim reports failures either as `{"error": "message"}` or as
    /// `{"error": {"code": 400, "message": "..."}}`; both shapes are understood.
    pub(crate) fn from_response(status_code: u16, response_body: Value) -> Self {
        let error = response_body.get("error");
        let message = error
            .and_then(|e| e.as_str().map(str::to_string))
            .or_else(|| {
                error
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Unknown error".to_string());

        let status = error
            .and_then(|e| e.get("code"))
            .and_then(|c| c.as_u64())
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(status_code);

        GeocodeError::ApiError { status, message }
    }

    /// Returns `true` when the underlying HTTP request exceeded the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GeocodeError::ReqwestError(e) if e.is_timeout())
    }
}

/// Why a location search produced no result.
///
/// The `Display` output is the message shown to the user; the variant fields
/// carry the detail for logs and tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The geocoder answered but had no candidate for the query.
    #[error("Location not found")]
    NotFound { query: String },

    /// The geocoder could not be reached or its answer could not be used.
    #[error("Failed to fetch location")]
    Unreachable { reason: String },
}

impl ResolutionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolutionError::NotFound { .. })
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, ResolutionError::Unreachable { .. })
    }
}

impl From<GeocodeError> for ResolutionError {
    fn from(err: GeocodeError) -> Self {
        ResolutionError::Unreachable {
            reason: err.to_string(),
        }
    }
}
