//! Parsers for the dashboard's input files.
//!
//! Every parser works on a string slice so callers can feed it from disk,
//! from `include_str!` or from a test literal.
//!
//! # Formats
//!
//! - **Price index** (has headers): `Quarter_Year,<index column>...`
//! - **Sale sheet** (4 preamble rows, then headers): `<region key>,...,Sale Year,...,Median Sale Price,...`
//! - **Listings** (has headers): `region,price,is_detached,is_semidetached,is_terrace,is_apartment_or_flat,...`
//! - **Region prices** (has headers): `<boundary key>,median_sale_price_total,median_sale_price_det,...`
//! - **Boundaries**: a GeoJSON `FeatureCollection`
//! - **Fragments**: a JSON object of region type name to markup

use anyhow::Context;
use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;
use nipp_core::listing::PropertyListing;
use nipp_core::price_index::{PriceIndexRow, QUARTER_YEAR_COLUMN};
use nipp_core::property_type::PropertyType;
use nipp_core::region::RegionType;
use nipp_core::sale_record::{SaleSheetRow, MEDIAN_SALE_PRICE_COLUMN, SALE_YEAR_COLUMN};
use nipp_core::Error;
use nipp_data::averages::RegionPrice;
use nipp_data::choropleth::RegionBoundary;
use nipp_utils::labels::capitalize_region_name;
use std::collections::HashMap;

/// Title and notes rows above the header row of every exported sheet.
pub const SHEET_PREAMBLE_ROWS: usize = 4;

fn column_index(headers: &csv::StringRecord, column: &str) -> nipp_core::Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| Error::MissingColumn {
            column: column.to_string(),
        })
}

/// Parse the quarterly house price index.
///
/// Blank cells are left out of the row. A non-numeric cell in one of the
/// published index columns is an error; other non-numeric columns are ignored.
///
/// # Example CSV
/// ```text
/// Quarter_Year,NI_Residential_Property_Price_Index,NI_Detached_Property_Price_Index
/// Q1 2005,100.0,100.0
/// Q2 2005,104.2,105.1
/// ```
pub fn parse_price_index(csv_data: &str) -> anyhow::Result<Vec<PriceIndexRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    let headers = rdr.headers()?.clone();
    let period_index = column_index(&headers, QUARTER_YEAR_COLUMN)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let r = result?;
        let mut row = PriceIndexRow::new(r.get(period_index).unwrap_or("").trim());
        for (i, header) in headers.iter().enumerate() {
            if i == period_index {
                continue;
            }
            let header = header.trim();
            let cell = r.get(i).unwrap_or("").trim();
            if cell.is_empty() {
                continue;
            }
            match cell.parse::<f64>() {
                Ok(value) => row = row.with_value(header, value),
                Err(_) if PropertyType::from_index_column(header).is_some() => {
                    anyhow::bail!(
                        "invalid index value {cell:?} in column {header} for {}",
                        row.quarter_year
                    );
                }
                Err(_) => {}
            }
        }
        rows.push(row);
    }
    log::info!("loader: loaded {} price index quarters", rows.len());
    Ok(rows)
}

/// Parse one exported sheet of an annual price statistics workbook.
///
/// Rows with every cell blank are skipped. Values are kept as text; cleaning
/// happens when the series is built.
///
/// # Example CSV
/// ```text
/// Table 3: Annual price statistics,,,
/// Belfast,,,
/// ,,,
/// Source: LPS,,,
/// District Electoral Area (2014),Sale Year,Number of Sales,Median Sale Price
/// Balmoral,2019,120,"£185,000"
/// ```
pub fn parse_sale_sheet(
    csv_data: &str,
    region_type: RegionType,
) -> anyhow::Result<Vec<SaleSheetRow>> {
    let Some(key_column) = region_type.sheet_key_column() else {
        anyhow::bail!("annual statistics are not published per {}", region_type);
    };
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    let mut records = rdr.records().skip(SHEET_PREAMBLE_ROWS);

    let headers = match records.next() {
        Some(result) => result?,
        None => {
            return Err(Error::MissingColumn {
                column: key_column.to_string(),
            }
            .into())
        }
    };
    let region_index = column_index(&headers, key_column)?;
    let year_index = column_index(&headers, SALE_YEAR_COLUMN)?;
    let price_index = column_index(&headers, MEDIAN_SALE_PRICE_COLUMN)?;

    let mut rows = Vec::new();
    let mut skipped = 0u32;
    for result in records {
        let r = result?;
        if r.iter().all(|cell| cell.trim().is_empty()) {
            skipped += 1;
            continue;
        }
        rows.push(SaleSheetRow::new(
            r.get(region_index).unwrap_or("").trim(),
            r.get(year_index).unwrap_or("").trim(),
            r.get(price_index).unwrap_or("").trim(),
        ));
    }
    log::info!(
        "loader: loaded {} {} sale rows, skipped {} blank",
        rows.len(),
        region_type,
        skipped
    );
    Ok(rows)
}

/// Parse the cleaned listings file. Columns other than the region, the price
/// and the four property type flags are ignored.
///
/// # Example CSV
/// ```text
/// region,price,is_detached,is_semidetached,is_terrace,is_apartment_or_flat,bedrooms
/// Down,250000,True,False,False,False,4
/// ```
pub fn parse_listings(csv_data: &str) -> anyhow::Result<Vec<PropertyListing>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());
    let listings = rdr
        .deserialize()
        .collect::<Result<Vec<PropertyListing>, csv::Error>>()?;
    log::info!("loader: loaded {} listings", listings.len());
    Ok(listings)
}

/// Parse a per-region median price table, keeping the median column of
/// `property_type`. Regions are keyed like their boundaries.
///
/// Blank cells mark suppressed medians (fewer than 30 sales) and are
/// skipped; any other non-numeric cell is an error.
///
/// # Example CSV
/// ```text
/// FinalR_DEA,median_sale_price_total,median_sale_price_det
/// Balmoral,182500.0,265000.0
/// Botanic,210000.0,
/// ```
pub fn parse_region_prices(
    csv_data: &str,
    region_type: RegionType,
    property_type: PropertyType,
) -> anyhow::Result<Vec<RegionPrice>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());
    let headers = rdr.headers()?.clone();
    let key_column = region_type.boundary_key();
    let price_column = property_type.median_price_column();
    let region_index = column_index(&headers, key_column)?;
    let price_index = column_index(&headers, price_column)?;

    let mut prices = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.records() {
        let r = result?;
        let region = r.get(region_index).unwrap_or("").trim();
        let cell = r.get(price_index).unwrap_or("").trim();
        if region.is_empty() || cell.is_empty() {
            skipped += 1;
            continue;
        }
        let price: f64 = cell
            .parse()
            .with_context(|| format!("invalid {price_column} {cell:?} for {region}"))?;
        if !price.is_finite() {
            skipped += 1;
            continue;
        }
        prices.push(RegionPrice::new(region, price));
    }
    log::info!(
        "loader: loaded {} {} {} prices, skipped {} suppressed",
        prices.len(),
        region_type,
        property_type,
        skipped
    );
    Ok(prices)
}

fn to_multi_polygon(geometry: Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => Some(MultiPolygon(vec![polygon])),
        Geometry::MultiPolygon(multi) => Some(multi),
        _ => None,
    }
}

/// Parse a boundary `FeatureCollection`, keyed by the region type's
/// boundary property. County names are published in upper case and are
/// capitalized to match the price data.
pub fn parse_boundaries(
    geojson_data: &str,
    region_type: RegionType,
) -> anyhow::Result<Vec<RegionBoundary>> {
    let geojson: GeoJson = geojson_data.parse().context("parsing boundary GeoJSON")?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        anyhow::bail!("boundary file is not a FeatureCollection");
    };

    let key = region_type.boundary_key();
    let mut boundaries = Vec::new();
    let mut skipped = 0u32;
    for feature in collection.features {
        let name = match feature.property(key) {
            Some(serde_json::Value::String(s)) => s.trim().to_string(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => {
                log::warn!("loader: boundary feature without {key} skipped");
                skipped += 1;
                continue;
            }
        };
        let Some(boundary) = feature
            .geometry
            .and_then(|geometry| Geometry::<f64>::try_from(geometry).ok())
            .and_then(to_multi_polygon)
        else {
            log::warn!("loader: boundary {name} has no polygon geometry, skipped");
            skipped += 1;
            continue;
        };
        let region = if region_type.capitalizes_boundary_keys() {
            capitalize_region_name(&name)
        } else {
            name
        };
        boundaries.push(RegionBoundary { region, boundary });
    }
    log::info!(
        "loader: loaded {} {} boundaries, skipped {}",
        boundaries.len(),
        region_type,
        skipped
    );
    Ok(boundaries)
}

/// Parse a precomputed fragment file.
///
/// # Example JSON
/// ```text
/// {"County": "<div>...</div>", "Electoral Ward": "<div>...</div>"}
/// ```
pub fn parse_fragments(json_data: &str) -> anyhow::Result<HashMap<String, String>> {
    let fragments: HashMap<String, String> =
        serde_json::from_str(json_data).context("parsing fragment JSON")?;
    log::info!("loader: loaded {} fragments", fragments.len());
    Ok(fragments)
}

/// The fragment for `region_type` out of a parsed fragment file.
pub fn fragment_for(
    fragments: &HashMap<String, String>,
    region_type: RegionType,
) -> nipp_core::Result<&str> {
    fragments
        .get(region_type.display_name())
        .map(String::as_str)
        .ok_or_else(|| Error::MissingFragment(region_type.display_name().to_string()))
}
