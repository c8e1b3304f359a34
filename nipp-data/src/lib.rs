//! Data processing for NI property price charts and maps.
//!
//! Every function here is pure: it takes an immutable snapshot of loaded
//! rows and returns a fresh table (or map layer) ready to hand to a
//! renderer. Nothing is cached or mutated in place.

pub mod averages;
pub mod choropleth;
pub mod distribution;
pub mod index_normalizer;
pub mod regional_series;
pub mod table;
