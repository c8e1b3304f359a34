use thiserror::Error;

/// Result alias used across the library crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing or transforming property price data.
///
/// The explicit missing-data marker (`"."`) is never an error; it is mapped
/// to `None` by [`crate::price::clean_price`].
#[derive(Debug, Error)]
pub enum Error {
    /// A period label that is not `"Q<n> <year>"`.
    #[error("invalid period label {label:?}: expected \"Q<1-4> <year>\"")]
    PeriodFormat { label: String },

    /// A price string that is neither the missing-data marker nor a
    /// currency figure.
    #[error("invalid price {value:?}")]
    PriceFormat { value: String },

    #[error("invalid sale year {value:?}")]
    YearFormat { value: String },

    #[error("duplicate period {label:?} in price index")]
    DuplicatePeriod { label: String },

    #[error("missing column {column:?}")]
    MissingColumn { column: String },

    #[error("unknown property type {0:?}")]
    UnknownPropertyType(String),

    #[error("unknown region type {0:?}")]
    UnknownRegionType(String),

    #[error("unknown government district {0:?}")]
    UnknownDistrict(String),

    #[error("unknown sheet {0:?}")]
    UnknownSheet(String),

    #[error("cannot bin an empty price column")]
    EmptyPriceColumn,

    #[error("no choropleth fragment for region type {0:?}")]
    MissingFragment(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
