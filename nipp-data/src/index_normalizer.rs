//! House price index normalization.
//!
//! The published index is quarterly, one column per property type, with
//! values expressed relative to a base period (= 100). For charting the
//! columns are renamed to display names, the period label is reordered so it
//! sorts chronologically, and every value is rescaled by [`INDEX_MULTIPLIER`]
//! to approximate a price in pounds.

use crate::table::{optional_cell, LineChart, Tabular};
use chrono::NaiveDate;
use nipp_core::period::Period;
use nipp_core::price_index::{PriceIndexRow, QUARTER_YEAR_COLUMN, YEAR_QUARTER_COLUMN};
use nipp_core::property_type::PropertyType;
use nipp_core::{Error, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Fixed rescaling applied to every index value.
pub const INDEX_MULTIPLIER: f64 = 1000.0;

/// One quarter of the index, ready for a line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedIndexRow {
    pub period: Period,
    pub quarter_year: String,
    pub year_quarter: String,
    pub sort_key: i64,
    /// Rescaled values; categories missing from the source stay missing.
    pub values: BTreeMap<PropertyType, f64>,
}

impl NormalizedIndexRow {
    pub fn value(&self, property_type: PropertyType) -> Option<f64> {
        self.values.get(&property_type).copied()
    }

    /// The original index value (base = 100), undoing the rescale.
    pub fn index_value(&self, property_type: PropertyType) -> Option<f64> {
        self.value(property_type).map(|v| v / INDEX_MULTIPLIER)
    }

    pub fn quarter_start(&self) -> Option<NaiveDate> {
        self.period.quarter_start()
    }
}

/// The normalized index, ordered by period.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedIndexTable {
    pub rows: Vec<NormalizedIndexRow>,
}

impl NormalizedIndexTable {
    /// Property types present in at least one row, in display order.
    pub fn categories(&self) -> Vec<PropertyType> {
        let present: BTreeSet<PropertyType> = self
            .rows
            .iter()
            .flat_map(|row| row.values.keys().copied())
            .collect();
        present.into_iter().collect()
    }

    /// Keep only the selected property types.
    pub fn select(&self, property_types: &[PropertyType]) -> NormalizedIndexTable {
        let rows = self
            .rows
            .iter()
            .map(|row| NormalizedIndexRow {
                values: row
                    .values
                    .iter()
                    .filter(|(property_type, _)| property_types.contains(property_type))
                    .map(|(property_type, value)| (*property_type, *value))
                    .collect(),
                ..row.clone()
            })
            .collect();
        NormalizedIndexTable { rows }
    }

    /// Start dates of the first and last quarter.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.first()?.quarter_start()?;
        let last = self.rows.last()?.quarter_start()?;
        Some((first, last))
    }

    pub fn line_chart(&self) -> LineChart {
        LineChart {
            x: YEAR_QUARTER_COLUMN.to_string(),
            y: self
                .categories()
                .iter()
                .map(|property_type| property_type.display_name().to_string())
                .collect(),
        }
    }
}

impl Tabular for NormalizedIndexTable {
    fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            QUARTER_YEAR_COLUMN.to_string(),
            YEAR_QUARTER_COLUMN.to_string(),
        ];
        headers.extend(
            self.categories()
                .iter()
                .map(|property_type| property_type.display_name().to_string()),
        );
        headers
    }

    fn records(&self) -> Vec<Vec<String>> {
        let categories = self.categories();
        self.rows
            .iter()
            .map(|row| {
                let mut record = vec![row.quarter_year.clone(), row.year_quarter.clone()];
                record.extend(
                    categories
                        .iter()
                        .map(|property_type| optional_cell(row.value(*property_type))),
                );
                record
            })
            .collect()
    }
}

/// Normalize the loaded index rows.
///
/// Fails on the first period label that is not `"Q<n> <year>"`, and on a
/// period that appears twice. Vendor columns that are not one of the five
/// property types are dropped.
pub fn normalize_price_index(rows: &[PriceIndexRow]) -> Result<NormalizedIndexTable> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(rows.len());
    for row in rows {
        let period = Period::parse_quarter_year(&row.quarter_year)?;
        if !seen.insert(period) {
            return Err(Error::DuplicatePeriod {
                label: row.quarter_year.clone(),
            });
        }
        let mut values = BTreeMap::new();
        for (column, value) in &row.values {
            match PropertyType::from_index_column(column) {
                Some(property_type) => {
                    values.insert(property_type, value * INDEX_MULTIPLIER);
                }
                None => log::debug!("normalize: ignoring index column {}", column),
            }
        }
        normalized.push(NormalizedIndexRow {
            period,
            quarter_year: row.quarter_year.clone(),
            year_quarter: period.year_quarter_label(),
            sort_key: period.sort_key(),
            values,
        });
    }
    normalized.sort_by_key(|row| row.sort_key);
    log::info!("normalize: normalized {} index quarters", normalized.len());
    Ok(NormalizedIndexTable { rows: normalized })
}
