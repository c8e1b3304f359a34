//! Average asking price per region, the input of the choropleth binner.

use nipp_core::listing::PropertyListing;
use nipp_core::property_type::PropertyType;
use nipp_utils::stats::mean;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single price figure for a named region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPrice {
    pub region: String,
    pub price: f64,
}

impl RegionPrice {
    pub fn new(region: impl Into<String>, price: f64) -> RegionPrice {
        RegionPrice {
            region: region.into(),
            price,
        }
    }
}

/// Mean listing price per region for one property type, ordered by region.
/// Listings with a non-finite price are ignored.
pub fn average_price_by_region(
    listings: &[PropertyListing],
    property_type: PropertyType,
) -> Vec<RegionPrice> {
    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for listing in listings
        .iter()
        .filter(|listing| listing.is_property_type(property_type) && listing.price.is_finite())
    {
        grouped
            .entry(listing.region.as_str())
            .or_default()
            .push(listing.price);
    }
    grouped
        .into_iter()
        .filter_map(|(region, prices)| mean(&prices).map(|price| RegionPrice::new(region, price)))
        .collect()
}
