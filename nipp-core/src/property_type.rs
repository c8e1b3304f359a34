use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of property categories reported by the NI statistics.
///
/// Variant order is the display order used by the dashboard selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyType {
    AllResidential,
    Detached,
    SemiDetached,
    Terrace,
    Apartment,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::AllResidential,
        PropertyType::Detached,
        PropertyType::SemiDetached,
        PropertyType::Terrace,
        PropertyType::Apartment,
    ];

    /// Short display name, also used as the normalized index column header.
    pub fn display_name(&self) -> &'static str {
        match self {
            PropertyType::AllResidential => "All Residential",
            PropertyType::Detached => "Detached",
            PropertyType::SemiDetached => "Semi-Detached",
            PropertyType::Terrace => "Terrace",
            PropertyType::Apartment => "Apartment",
        }
    }

    /// Column name in the published house price index CSV.
    pub fn index_column(&self) -> &'static str {
        match self {
            PropertyType::AllResidential => "NI_Residential_Property_Price_Index",
            PropertyType::Detached => "NI_Detached_Property_Price_Index",
            PropertyType::SemiDetached => "NI_SemiDetached_Property_Price_Index",
            PropertyType::Terrace => "NI_Terrace_Property_Price_Index",
            PropertyType::Apartment => "NI_Apartment_Price_Index",
        }
    }

    /// Suffix of the annual statistics workbook sheet names.
    pub fn sheet_code(&self) -> &'static str {
        match self {
            PropertyType::AllResidential => "Total",
            PropertyType::Detached => "DET",
            PropertyType::SemiDetached => "SDT",
            PropertyType::Terrace => "TER",
            PropertyType::Apartment => "Apt",
        }
    }

    /// Boolean column of the cleaned listings marking this type.
    /// All Residential has none: every listing belongs to it.
    pub fn listing_flag_column(&self) -> Option<&'static str> {
        match self {
            PropertyType::AllResidential => None,
            PropertyType::Detached => Some("is_detached"),
            PropertyType::SemiDetached => Some("is_semidetached"),
            PropertyType::Terrace => Some("is_terrace"),
            PropertyType::Apartment => Some("is_apartment_or_flat"),
        }
    }

    /// Median price column of the precomputed choropleth tables.
    pub fn median_price_column(&self) -> &'static str {
        match self {
            PropertyType::AllResidential => "median_sale_price_total",
            PropertyType::Detached => "median_sale_price_det",
            PropertyType::SemiDetached => "median_sale_price_sdt",
            PropertyType::Terrace => "median_sale_price_ter",
            PropertyType::Apartment => "median_sale_price_apt",
        }
    }

    /// File stem of the precomputed choropleth fragments, e.g. `all_residential`.
    pub fn fragment_stem(&self) -> String {
        self.display_name().replace(' ', "_").to_lowercase()
    }

    /// Look up a property type by its vendor index column name.
    pub fn from_index_column(column: &str) -> Option<PropertyType> {
        PropertyType::ALL
            .into_iter()
            .find(|property_type| property_type.index_column() == column)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PropertyType {
    type Err = Error;

    /// Accepts the display name, the sheet code, or a kebab/snake spelling
    /// (`semi-detached`, `all_residential`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
        PropertyType::ALL
            .into_iter()
            .find(|property_type| {
                let display = property_type.display_name().to_lowercase().replace(' ', "-");
                display == wanted || property_type.sheet_code().to_lowercase() == wanted
            })
            .ok_or_else(|| Error::UnknownPropertyType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::PropertyType;

    #[test]
    fn test_parse_property_type_spellings() {
        assert_eq!("Semi-Detached".parse::<PropertyType>().unwrap(), PropertyType::SemiDetached);
        assert_eq!("semi-detached".parse::<PropertyType>().unwrap(), PropertyType::SemiDetached);
        assert_eq!("All Residential".parse::<PropertyType>().unwrap(), PropertyType::AllResidential);
        assert_eq!("all_residential".parse::<PropertyType>().unwrap(), PropertyType::AllResidential);
        assert_eq!("DET".parse::<PropertyType>().unwrap(), PropertyType::Detached);
        assert_eq!("apt".parse::<PropertyType>().unwrap(), PropertyType::Apartment);
        assert!("Bungalow".parse::<PropertyType>().is_err());
    }

    #[test]
    fn test_index_column_lookup() {
        for property_type in PropertyType::ALL {
            assert_eq!(
                PropertyType::from_index_column(property_type.index_column()),
                Some(property_type)
            );
        }
        assert_eq!(PropertyType::from_index_column("Quarter_Year"), None);
    }

    #[test]
    fn test_fragment_stem() {
        assert_eq!(PropertyType::AllResidential.fragment_stem(), "all_residential");
        assert_eq!(PropertyType::SemiDetached.fragment_stem(), "semi-detached");
    }
}
