pub mod client;
pub mod config;
pub mod error;
pub mod geopoint;
pub mod heat;
mod requests;
pub mod resolver;
pub mod search;
pub mod types;
pub mod view;

pub use client::NominatimClient;
pub use config::GeocoderConfig;
pub use error::{GeocodeError, ResolutionError};
pub use geopoint::{Coordinate, WeightedPoint};
pub use heat::{generate, HeatLayerStyle};
pub use resolver::{Geocoder, LocationResolver, ResolvedLocation};
pub use search::{SearchOutcome, SearchResult, SearchSnapshot, SearchState, SearchViewModel};
pub use view::{PageView, Route, TileTemplate};

pub use types::GeocodedPlace;
