//! Asking price histogram.

use nipp_core::property_type::PropertyType;
use nipp_data::distribution::price_distribution;
use nipp_store::DataStore;
use std::io::Write;

pub fn run_distribution(
    store: &DataStore,
    property_type: PropertyType,
    bins: Option<usize>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if bins == Some(0) {
        anyhow::bail!("--bins must be at least 1");
    }
    let listings = store.listings()?;
    let distribution = price_distribution(
        &listings,
        property_type,
        store.config().clip_quantile,
        bins,
    );
    serde_json::to_writer_pretty(&mut *out, &distribution)?;
    writeln!(out)?;
    Ok(())
}
