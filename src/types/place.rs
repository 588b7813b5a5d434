use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One candidate returned by a Nominatim-compatible `/search` endpoint.
///
/// Nominatim encodes coordinates as strings; they are kept verbatim here and parsed
/// by the resolver.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub lat: String,
    pub lon: String,
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,

    // Catch all for other fields (osm_type, class, boundingbox, ...)
    #[serde(flatten)]
    pub other_fields: HashMap<String, Value>,
}

impl GeocodedPlace {
    pub fn new(
        lat: impl Into<String>,
        lon: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        GeocodedPlace {
            lat: lat.into(),
            lon: lon.into(),
            display_name: display_name.into(),
            place_id: None,
            importance: None,
            other_fields: HashMap::new(),
        }
    }

    /// Short label made of the first two comma-separated parts of the display name.
    ///
    /// `"Nagpur, Maharashtra, India"` becomes `"Nagpur, Maharashtra"`.
    pub fn short_label(&self) -> String {
        self.display_name
            .split(',')
            .map(str::trim)
            .take(2)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
