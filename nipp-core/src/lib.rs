//! Core types for Northern Ireland property price statistics.
//!
//! Closed domain enums (property types, region types, government districts),
//! quarter period labels, price cleaning and the raw row types every
//! loader produces and every transformation consumes.

pub mod district;
pub mod error;
pub mod listing;
pub mod period;
pub mod price;
pub mod price_index;
pub mod property_type;
pub mod region;
pub mod sale_record;

pub use error::{Error, Result};
