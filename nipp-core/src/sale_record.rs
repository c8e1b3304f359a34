use crate::error::{Error, Result};
use crate::price::clean_price;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Year column of the annual statistics sheets.
pub const SALE_YEAR_COLUMN: &str = "Sale Year";

/// Median price column of the annual statistics sheets.
pub const MEDIAN_SALE_PRICE_COLUMN: &str = "Median Sale Price";

/// One row of an annual statistics sheet, exactly as published.
///
/// The price is still a string: `"£123,456"` or the missing marker `"."`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSheetRow {
    pub region: String,
    pub sale_year: String,
    pub median_sale_price: String,
}

impl SaleSheetRow {
    pub fn new(
        region: impl Into<String>,
        sale_year: impl Into<String>,
        median_sale_price: impl Into<String>,
    ) -> SaleSheetRow {
        SaleSheetRow {
            region: region.into(),
            sale_year: sale_year.into(),
            median_sale_price: median_sale_price.into(),
        }
    }
}

/// A cleaned annual median sale price for one region.
///
/// `median_price` is `None` when the figure was suppressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalSaleRecord {
    pub region: String,
    pub year: i32,
    pub median_price: Option<u32>,
}

impl TryFrom<&SaleSheetRow> for RegionalSaleRecord {
    type Error = Error;

    fn try_from(row: &SaleSheetRow) -> Result<Self> {
        let year = parse_sale_year(&row.sale_year)?;
        let median_price = clean_price(&row.median_sale_price)?;
        Ok(RegionalSaleRecord {
            region: row.region.clone(),
            year,
            median_price,
        })
    }
}

/// Sale years arrive either as integers or as spreadsheet floats (`"2019.0"`).
fn parse_sale_year(raw: &str) -> Result<i32> {
    let trimmed = raw.trim();
    let whole = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    whole.parse::<i32>().map_err(|_| Error::YearFormat {
        value: raw.to_string(),
    })
}

/// Distinct region names in order of first appearance.
pub fn available_regions(rows: &[SaleSheetRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| seen.insert(row.region.as_str()))
        .map(|row| row.region.clone())
        .collect()
}
