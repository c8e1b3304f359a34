use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic granularity used to key regional statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegionType {
    County,
    DistrictElectoralArea,
    ElectoralWard,
}

impl RegionType {
    pub const ALL: [RegionType; 3] = [
        RegionType::County,
        RegionType::DistrictElectoralArea,
        RegionType::ElectoralWard,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            RegionType::County => "County",
            RegionType::DistrictElectoralArea => "District Electoral Area",
            RegionType::ElectoralWard => "Electoral Ward",
        }
    }

    /// Region column of the annual statistics sheets.
    /// Counties are not published at this granularity.
    pub fn sheet_key_column(&self) -> Option<&'static str> {
        match self {
            RegionType::County => None,
            RegionType::DistrictElectoralArea => Some("District Electoral Area (2014)"),
            RegionType::ElectoralWard => Some("Electoral Ward (2014)"),
        }
    }

    /// Feature property that names the region in the boundary files.
    pub fn boundary_key(&self) -> &'static str {
        match self {
            RegionType::County => "CountyName",
            RegionType::DistrictElectoralArea => "FinalR_DEA",
            RegionType::ElectoralWard => "WARDNAME",
        }
    }

    /// County boundaries are published in upper case and must be
    /// capitalized to match listing regions.
    pub fn capitalizes_boundary_keys(&self) -> bool {
        matches!(self, RegionType::County)
    }

    /// Initial region selection offered for this granularity: every
    /// electoral area, but no electoral wards (there are too many to plot).
    pub fn default_selection(&self, available: &[String]) -> Vec<String> {
        match self {
            RegionType::ElectoralWard => Vec::new(),
            RegionType::County | RegionType::DistrictElectoralArea => available.to_vec(),
        }
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RegionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
        match wanted.as_str() {
            "county" => Ok(RegionType::County),
            "district electoral area" | "electoral area" | "dea" => {
                Ok(RegionType::DistrictElectoralArea)
            }
            "electoral ward" | "ward" => Ok(RegionType::ElectoralWard),
            _ => Err(Error::UnknownRegionType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RegionType;

    #[test]
    fn test_parse_region_type() {
        assert_eq!("County".parse::<RegionType>().unwrap(), RegionType::County);
        assert_eq!(
            "electoral-area".parse::<RegionType>().unwrap(),
            RegionType::DistrictElectoralArea
        );
        assert_eq!(
            "District Electoral Area".parse::<RegionType>().unwrap(),
            RegionType::DistrictElectoralArea
        );
        assert_eq!(
            "electoral_ward".parse::<RegionType>().unwrap(),
            RegionType::ElectoralWard
        );
        assert!("parish".parse::<RegionType>().is_err());
    }

    #[test]
    fn test_default_selection() {
        let available = vec!["Balmoral".to_string(), "Botanic".to_string()];
        assert_eq!(
            RegionType::DistrictElectoralArea.default_selection(&available),
            available
        );
        assert!(RegionType::ElectoralWard
            .default_selection(&available)
            .is_empty());
    }
}
