// src/resolver.rs

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;

use crate::client::NominatimClient;
use crate::config::GeocoderConfig;
use crate::error::{GeocodeError, ResolutionError};
use crate::geopoint::Coordinate;
use crate::types::GeocodedPlace;

/// A free-text geocoding service.
///
/// [`NominatimClient`] is the production implementation; anything that can turn a
/// query into an ordered list of candidates can stand in for it.
pub trait Geocoder {
    /// Returns every candidate for `query`, best match first.
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<GeocodedPlace>, GeocodeError>> + Send;
}

impl<G: Geocoder + Send + Sync> Geocoder for Arc<G> {
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<GeocodedPlace>, GeocodeError>> + Send {
        (**self).lookup(query)
    }
}

/// The coordinate and label a query resolved to.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub center: Coordinate,
    /// First two segments of the display name, e.g. `"Nagpur, Maharashtra"`.
    pub label: String,
    /// Full display name as returned by the geocoder.
    pub display_name: String,
}

/// Turns a user query into a [`ResolvedLocation`] through a [`Geocoder`].
///
/// Each call issues exactly one lookup. Nothing is cached, deduplicated or retried.
#[derive(Debug, Clone)]
pub struct LocationResolver<G> {
    geocoder: G,
    country: Option<String>,
}

impl LocationResolver<NominatimClient> {
    /// Builds a resolver backed by a [`NominatimClient`] for `config`.
    pub fn nominatim(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        Ok(LocationResolver::new(
            NominatimClient::new(config)?,
            config.country.clone(),
        ))
    }
}

impl<G: Geocoder> LocationResolver<G> {
    pub fn new(geocoder: G, country: Option<String>) -> Self {
        LocationResolver { geocoder, country }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// The exact text sent to the geocoder for `query`.
    pub fn qualified_query(&self, query: &str) -> String {
        match self.country.as_deref() {
            Some(country) => format!("{}, {}", query, country),
            None => query.to_string(),
        }
    }

    /// Resolves `query` to the first candidate the geocoder returns.
    ///
    /// Lookup failures and unusable coordinates are reported as
    /// [`ResolutionError::Unreachable`]; an empty candidate list as
    /// [`ResolutionError::NotFound`]. A blank query is `NotFound` without any lookup.
    pub async fn resolve(&self, query: &str) -> Result<ResolvedLocation, ResolutionError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ResolutionError::NotFound {
                query: query.to_string(),
            });
        }

        let qualified = self.qualified_query(query);
        log::debug!("Resolving location for '{}'", qualified);

        let candidates = self.geocoder.lookup(&qualified).await.map_err(|e| {
            log::warn!("Geocoder lookup for '{}' failed: {}", qualified, e);
            ResolutionError::from(e)
        })?;

        let first = candidates.into_iter().next().ok_or_else(|| {
            log::debug!("Geocoder returned no candidates for '{}'", qualified);
            ResolutionError::NotFound {
                query: query.to_string(),
            }
        })?;

        let center = parse_center(&first)?;
        let label = first.short_label();
        log::debug!(
            "Resolved '{}' to {} ({}, {})",
            qualified,
            label,
            center.latitude,
            center.longitude
        );

        Ok(ResolvedLocation {
            center,
            label,
            display_name: first.display_name,
        })
    }
}

fn parse_center(place: &GeocodedPlace) -> Result<Coordinate, ResolutionError> {
    let parse = |field: &str, raw: &str| -> Result<f64, ResolutionError> {
        raw.trim().parse::<f64>().map_err(|e| ResolutionError::Unreachable {
            reason: format!("candidate {} '{}' is not a number: {}", field, raw, e),
        })
    };
    let latitude = parse("lat", &place.lat)?;
    let longitude = parse("lon", &place.lon)?;
    Ok(Coordinate::new(latitude, longitude)?)
}
