use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Period label column of the published house price index.
pub const QUARTER_YEAR_COLUMN: &str = "Quarter_Year";

/// Reordered period label column added by normalization.
pub const YEAR_QUARTER_COLUMN: &str = "Year_Quarter";

/// One quarter of the published house price index, as loaded.
///
/// `values` is keyed by the vendor column name
/// (e.g. `NI_Detached_Property_Price_Index`); values are index points
/// relative to the base period (base = 100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceIndexRow {
    pub quarter_year: String,
    pub values: BTreeMap<String, f64>,
}

impl PriceIndexRow {
    pub fn new(quarter_year: impl Into<String>) -> PriceIndexRow {
        PriceIndexRow {
            quarter_year: quarter_year.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, column: impl Into<String>, value: f64) -> PriceIndexRow {
        self.values.insert(column.into(), value);
        self
    }
}
