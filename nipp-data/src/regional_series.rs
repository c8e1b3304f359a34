//! Regional median price series.
//!
//! Turns the long-format annual statistics (one row per region and year)
//! into a wide table with one price column per selected region, which is
//! what a multi-series line chart consumes.

use crate::table::{optional_cell, LineChart, Tabular};
use nipp_core::sale_record::{RegionalSaleRecord, SaleSheetRow, SALE_YEAR_COLUMN};
use nipp_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// How later regions are lined up against the year index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesAlignment {
    /// The first selected region's years form the index and every other
    /// region is placed by position. Years a later region has beyond the
    /// first region's row count are dropped; missing positions are null.
    #[default]
    Positional,
    /// Full outer join on year: the index is every year any selected
    /// region reports.
    ByYear,
}

/// One region's prices, aligned to [`WideSeriesTable::years`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesColumn {
    pub region: String,
    pub prices: Vec<Option<u32>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WideSeriesTable {
    pub years: Vec<i32>,
    pub columns: Vec<SeriesColumn>,
}

impl WideSeriesTable {
    /// True when no region was selected. Callers should not render it.
    pub fn has_no_series(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, region: &str) -> Option<&SeriesColumn> {
        self.columns.iter().find(|column| column.region == region)
    }

    pub fn line_chart(&self) -> LineChart {
        LineChart {
            x: SALE_YEAR_COLUMN.to_string(),
            y: self.columns.iter().map(|c| c.region.clone()).collect(),
        }
    }
}

impl Tabular for WideSeriesTable {
    fn headers(&self) -> Vec<String> {
        let mut headers = vec![SALE_YEAR_COLUMN.to_string()];
        headers.extend(self.columns.iter().map(|c| c.region.clone()));
        headers
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.years
            .iter()
            .enumerate()
            .map(|(i, year)| {
                let mut record = vec![year.to_string()];
                record.extend(
                    self.columns
                        .iter()
                        .map(|column| optional_cell(column.prices.get(i).copied().flatten())),
                );
                record
            })
            .collect()
    }
}

/// Clean every published price. Stops at the first malformed price or year.
pub fn clean_sale_rows(rows: &[SaleSheetRow]) -> Result<Vec<RegionalSaleRecord>> {
    rows.iter().map(RegionalSaleRecord::try_from).collect()
}

/// Build the wide series table for `selection`.
///
/// Prices are cleaned first (for every row, selected or not), so a malformed
/// price aborts the build. Selection order is column order; repeated
/// selections are ignored. An empty selection gives an empty table.
pub fn build_regional_series(
    rows: &[SaleSheetRow],
    selection: &[String],
    alignment: SeriesAlignment,
) -> Result<WideSeriesTable> {
    let records = clean_sale_rows(rows)?;

    let mut seen = HashSet::new();
    let selection: Vec<&str> = selection
        .iter()
        .map(String::as_str)
        .filter(|region| seen.insert(*region))
        .collect();

    let mut by_region: HashMap<&str, Vec<&RegionalSaleRecord>> = HashMap::new();
    for record in &records {
        if selection.contains(&record.region.as_str()) {
            by_region.entry(record.region.as_str()).or_default().push(record);
        }
    }
    for series in by_region.values_mut() {
        series.sort_by_key(|record| record.year);
    }

    let table = match alignment {
        SeriesAlignment::Positional => positional(&selection, &by_region),
        SeriesAlignment::ByYear => by_year(&selection, &by_region),
    };
    log::info!(
        "regional: built {} regions x {} years ({:?})",
        table.columns.len(),
        table.years.len(),
        alignment
    );
    Ok(table)
}

fn series_of<'a>(
    by_region: &'a HashMap<&str, Vec<&'a RegionalSaleRecord>>,
    region: &str,
) -> &'a [&'a RegionalSaleRecord] {
    by_region.get(region).map(Vec::as_slice).unwrap_or(&[])
}

fn positional(
    selection: &[&str],
    by_region: &HashMap<&str, Vec<&RegionalSaleRecord>>,
) -> WideSeriesTable {
    let years: Vec<i32> = match selection.first() {
        Some(first) => series_of(by_region, first)
            .iter()
            .map(|record| record.year)
            .collect(),
        None => Vec::new(),
    };

    let columns = selection
        .iter()
        .map(|region| {
            let series = series_of(by_region, region);
            if series.len() > years.len() {
                log::debug!(
                    "regional: {} has {} years, truncated to {}",
                    region,
                    series.len(),
                    years.len()
                );
            }
            SeriesColumn {
                region: region.to_string(),
                prices: (0..years.len())
                    .map(|i| series.get(i).and_then(|record| record.median_price))
                    .collect(),
            }
        })
        .collect();

    WideSeriesTable { years, columns }
}

fn by_year(
    selection: &[&str],
    by_region: &HashMap<&str, Vec<&RegionalSaleRecord>>,
) -> WideSeriesTable {
    let years: Vec<i32> = selection
        .iter()
        .filter_map(|region| by_region.get(region))
        .flatten()
        .map(|record| record.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let columns = selection
        .iter()
        .map(|region| {
            let mut prices_by_year: HashMap<i32, Option<u32>> = HashMap::new();
            for record in by_region.get(region).into_iter().flatten() {
                prices_by_year.entry(record.year).or_insert(record.median_price);
            }
            SeriesColumn {
                region: region.to_string(),
                prices: years
                    .iter()
                    .map(|year| prices_by_year.get(year).copied().flatten())
                    .collect(),
            }
        })
        .collect();

    WideSeriesTable { years, columns }
}

#[cfg(test)]
mod tests {
    use super::{build_regional_series, SeriesAlignment};
    use crate::table::Tabular;
    use nipp_core::sale_record::SaleSheetRow;
    use nipp_core::Error;

    fn rows() -> Vec<SaleSheetRow> {
        vec![
            SaleSheetRow::new("Balmoral", "2019", "£180,000"),
            SaleSheetRow::new("Balmoral", "2020", "£185,500"),
            SaleSheetRow::new("Balmoral", "2021", "."),
            SaleSheetRow::new("Botanic", "2019", "£150,000"),
            SaleSheetRow::new("Botanic", "2020", "£155,000"),
            SaleSheetRow::new("Botanic", "2021", "£160,000"),
            SaleSheetRow::new("Botanic", "2022", "£171,250"),
            SaleSheetRow::new("Titanic", "2021", "£120,000"),
        ]
    }

    fn selection(regions: &[&str]) -> Vec<String> {
        regions.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_positional_truncates_to_first_region_years() {
        let table = build_regional_series(
            &rows(),
            &selection(&["Balmoral", "Botanic"]),
            SeriesAlignment::Positional,
        )
        .unwrap();
        assert_eq!(table.years, vec![2019, 2020, 2021]);
        assert_eq!(
            table.column("Botanic").unwrap().prices,
            vec![Some(150_000), Some(155_000), Some(160_000)]
        );
        // the suppressed figure stays null, not zero
        assert_eq!(
            table.column("Balmoral").unwrap().prices,
            vec![Some(180_000), Some(185_500), None]
        );
    }

    #[test]
    fn test_positional_places_shorter_series_by_position() {
        let table = build_regional_series(
            &rows(),
            &selection(&["Botanic", "Titanic"]),
            SeriesAlignment::Positional,
        )
        .unwrap();
        assert_eq!(table.years, vec![2019, 2020, 2021, 2022]);
        // Titanic only reports 2021 but lands in the first row
        assert_eq!(
            table.column("Titanic").unwrap().prices,
            vec![Some(120_000), None, None, None]
        );
    }

    #[test]
    fn test_by_year_outer_joins() {
        let table = build_regional_series(
            &rows(),
            &selection(&["Balmoral", "Botanic", "Titanic"]),
            SeriesAlignment::ByYear,
        )
        .unwrap();
        assert_eq!(table.years, vec![2019, 2020, 2021, 2022]);
        assert_eq!(
            table.column("Balmoral").unwrap().prices,
            vec![Some(180_000), Some(185_500), None, None]
        );
        assert_eq!(
            table.column("Titanic").unwrap().prices,
            vec![None, None, Some(120_000), None]
        );
    }

    #[test]
    fn test_selection_order_is_column_order() {
        let table = build_regional_series(
            &rows(),
            &selection(&["Botanic", "Balmoral", "Botanic"]),
            SeriesAlignment::Positional,
        )
        .unwrap();
        assert_eq!(table.headers(), vec!["Sale Year", "Botanic", "Balmoral"]);
        assert_eq!(table.line_chart().y, vec!["Botanic", "Balmoral"]);
    }

    #[test]
    fn test_empty_selection_has_only_year_column() {
        let table = build_regional_series(&rows(), &[], SeriesAlignment::Positional).unwrap();
        assert!(table.has_no_series());
        assert!(table.years.is_empty());
        assert_eq!(table.headers(), vec!["Sale Year"]);
        assert!(table.records().is_empty());
    }

    #[test]
    fn test_region_matching_is_case_sensitive() {
        let table = build_regional_series(
            &rows(),
            &selection(&["balmoral"]),
            SeriesAlignment::Positional,
        )
        .unwrap();
        assert!(table.years.is_empty());
        assert_eq!(table.columns.len(), 1);
        assert!(table.columns[0].prices.is_empty());
    }

    #[test]
    fn test_malformed_price_aborts_build() {
        let mut bad = rows();
        bad.push(SaleSheetRow::new("Ormiston", "2019", "about £200k"));
        match build_regional_series(&bad, &selection(&["Balmoral"]), SeriesAlignment::Positional) {
            Err(Error::PriceFormat { value }) => assert_eq!(value, "about £200k"),
            other => panic!("expected a price format error, got {other:?}"),
        }
    }

    #[test]
    fn test_records_render_nulls_as_empty_cells() {
        let table = build_regional_series(
            &rows(),
            &selection(&["Balmoral"]),
            SeriesAlignment::Positional,
        )
        .unwrap();
        assert_eq!(
            table.records(),
            vec![
                vec!["2019", "180000"],
                vec!["2020", "185500"],
                vec!["2021", ""],
            ]
        );
    }
}
