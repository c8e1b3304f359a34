//! Normalized house price index.

use nipp_core::property_type::PropertyType;
use nipp_data::index_normalizer::normalize_price_index;
use nipp_data::table::write_csv;
use nipp_store::DataStore;
use std::io::Write;

/// Write the normalized index, optionally restricted to `property_types`.
pub fn run_index(
    store: &DataStore,
    property_types: &[PropertyType],
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let rows = store.price_index()?;
    let mut table = normalize_price_index(&rows)?;
    if !property_types.is_empty() {
        table = table.select(property_types);
    }
    if let Some((first, last)) = table.date_span() {
        log::info!(
            "index: {} quarters from {} to {}, plotting {:?}",
            table.rows.len(),
            first,
            last,
            table.line_chart().y
        );
    }
    write_csv(&table, out)?;
    Ok(())
}
