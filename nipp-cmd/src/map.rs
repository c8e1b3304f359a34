//! Choropleth map layers and precomputed map fragments.

use nipp_core::property_type::PropertyType;
use nipp_core::region::RegionType;
use nipp_data::averages::average_price_by_region;
use nipp_data::choropleth::build_choropleth;
use nipp_store::DataStore;
use std::io::Write;

/// Shade `region_type` boundaries by price. Counties use the average asking
/// price of `property_type` listings; electoral areas and wards use the
/// published median sale price.
pub fn run_choropleth(
    store: &DataStore,
    region_type: RegionType,
    property_type: PropertyType,
    geojson: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let prices = match region_type {
        RegionType::County => average_price_by_region(&store.listings()?, property_type),
        RegionType::DistrictElectoralArea | RegionType::ElectoralWard => {
            store.region_prices(region_type, property_type)?
        }
    };
    let boundaries = store.boundaries(region_type)?;
    let layer = build_choropleth(&prices, &boundaries)?;
    if layer.dropped_prices > 0 {
        log::warn!(
            "choropleth: {} priced regions have no {} boundary",
            layer.dropped_prices,
            region_type
        );
    }

    if geojson {
        serde_json::to_writer_pretty(&mut *out, &layer.to_feature_collection())?;
    } else {
        serde_json::to_writer_pretty(&mut *out, &layer)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn run_fragment(
    store: &DataStore,
    region_type: RegionType,
    property_type: PropertyType,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let markup = store.fragment(property_type, region_type)?;
    writeln!(out, "{markup}")?;
    Ok(())
}
