// src/types/mod.rs

pub mod place;

pub use place::GeocodedPlace;
