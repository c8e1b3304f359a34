//! Dashboard configuration: where each input file lives.
//!
//! Every path is relative to `root` unless absolute. The defaults reproduce
//! the layout the dashboard was deployed with, so an empty TOML file is a
//! valid configuration.
//!
//! ```toml
//! root = "/srv/nipp"
//! price_index = "data/ni-hpi-by-property-type-q1-2005---q1-2024.csv"
//! clip_quantile = 0.99
//!
//! [boundaries]
//! county = "data/shapefiles/counties.geojson"
//! ```

use anyhow::Context;
use nipp_core::region::RegionType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryPaths {
    pub county: PathBuf,
    pub district_electoral_area: PathBuf,
    pub electoral_ward: PathBuf,
}

impl Default for BoundaryPaths {
    fn default() -> Self {
        BoundaryPaths {
            county: PathBuf::from(
                "data/shapefiles/OSNI_Open_Data_-_Largescale_Boundaries_-_County_Boundaries_.geojson",
            ),
            district_electoral_area: PathBuf::from(
                "data/shapefiles/OSNI_Open_Data_-_Largescale_Boundaries_-_District_Electoral_Areas_(2012).geojson",
            ),
            electoral_ward: PathBuf::from(
                "data/shapefiles/OSNI_Open_Data_-_Largescale_Boundaries_-_Wards_(2012).geojson",
            ),
        }
    }
}

/// Per-region median price tables behind the electoral area and ward maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionPricePaths {
    pub district_electoral_area: PathBuf,
    pub electoral_ward: PathBuf,
}

impl Default for RegionPricePaths {
    fn default() -> Self {
        RegionPricePaths {
            district_electoral_area: PathBuf::from("data/chloropleth_data/electoral_areas.csv"),
            electoral_ward: PathBuf::from("data/chloropleth_data/electoral_wards.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub root: PathBuf,
    /// Quarterly house price index CSV.
    pub price_index: PathBuf,
    /// Cleaned asking-price listings CSV.
    pub listings: PathBuf,
    /// Directory of `<sheet id>.csv` exports of the electoral area workbook.
    pub electoral_area_sheets: PathBuf,
    /// Directory of `<sheet id>.csv` exports of the electoral ward workbook.
    pub electoral_ward_sheets: PathBuf,
    pub boundaries: BoundaryPaths,
    pub region_prices: RegionPricePaths,
    /// Directory of `<property type>_chloropleths.json` fragment files.
    pub fragments_dir: PathBuf,
    /// Quantile at which listing prices are clipped for the histogram.
    pub clip_quantile: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            root: PathBuf::from("."),
            price_index: PathBuf::from("data/ni-hpi-by-property-type-q1-2005---q1-2024.csv"),
            listings: PathBuf::from("data/properties/cleaned_properties.csv"),
            electoral_area_sheets: PathBuf::from(
                "data/properties/District Electoral Area Annual Price Statistics Property Types_Frozen",
            ),
            electoral_ward_sheets: PathBuf::from(
                "data/properties/Electoral Ward Annual Price Statistics Property Types_Frozen",
            ),
            boundaries: BoundaryPaths::default(),
            region_prices: RegionPricePaths::default(),
            fragments_dir: PathBuf::from("static"),
            clip_quantile: nipp_data::distribution::DEFAULT_CLIP_QUANTILE,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let config: DashboardConfig = toml::from_str(toml_str)?;
        if !(0.0..=1.0).contains(&config.clip_quantile) {
            anyhow::bail!(
                "clip_quantile must be within [0, 1], got {}",
                config.clip_quantile
            );
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&toml_str).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    pub fn price_index_path(&self) -> PathBuf {
        self.resolve(&self.price_index)
    }

    pub fn listings_path(&self) -> PathBuf {
        self.resolve(&self.listings)
    }

    /// Sheet export directory for a region type. Counties have no sheets.
    pub fn sheet_dir(&self, region_type: RegionType) -> anyhow::Result<PathBuf> {
        match region_type {
            RegionType::DistrictElectoralArea => Ok(self.resolve(&self.electoral_area_sheets)),
            RegionType::ElectoralWard => Ok(self.resolve(&self.electoral_ward_sheets)),
            RegionType::County => {
                anyhow::bail!("annual statistics are not published per {}", region_type)
            }
        }
    }

    pub fn boundary_path(&self, region_type: RegionType) -> PathBuf {
        let path = match region_type {
            RegionType::County => &self.boundaries.county,
            RegionType::DistrictElectoralArea => &self.boundaries.district_electoral_area,
            RegionType::ElectoralWard => &self.boundaries.electoral_ward,
        };
        self.resolve(path)
    }

    /// Median price table for a region type. County maps are priced from
    /// the listings instead.
    pub fn region_prices_path(&self, region_type: RegionType) -> anyhow::Result<PathBuf> {
        match region_type {
            RegionType::DistrictElectoralArea => {
                Ok(self.resolve(&self.region_prices.district_electoral_area))
            }
            RegionType::ElectoralWard => Ok(self.resolve(&self.region_prices.electoral_ward)),
            RegionType::County => {
                anyhow::bail!("no median price table is published per {}", region_type)
            }
        }
    }

    pub fn fragments_path(&self, stem: &str) -> PathBuf {
        self.resolve(&self.fragments_dir)
            .join(format!("{stem}_chloropleths.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardConfig;
    use nipp_core::region::RegionType;
    use std::path::PathBuf;

    #[test]
    fn test_empty_toml_is_default() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.clip_quantile, 0.99);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = DashboardConfig::from_toml_str(
            r#"
root = "/srv/nipp"
clip_quantile = 0.95

[boundaries]
county = "maps/counties.geojson"
"#,
        )
        .unwrap();
        assert_eq!(
            config.boundary_path(RegionType::County),
            PathBuf::from("/srv/nipp/maps/counties.geojson")
        );
        assert_eq!(
            config.boundary_path(RegionType::ElectoralWard),
            PathBuf::from("/srv/nipp/data/shapefiles/OSNI_Open_Data_-_Largescale_Boundaries_-_Wards_(2012).geojson")
        );
        assert_eq!(config.clip_quantile, 0.95);
        assert_eq!(
            config.fragments_path("detached"),
            PathBuf::from("/srv/nipp/static/detached_chloropleths.json")
        );
    }

    #[test]
    fn test_rejects_bad_clip_quantile() {
        assert!(DashboardConfig::from_toml_str("clip_quantile = 1.5").is_err());
    }

    #[test]
    fn test_county_has_no_sheets() {
        let config = DashboardConfig::default();
        assert!(config.sheet_dir(RegionType::County).is_err());
        assert!(config.sheet_dir(RegionType::ElectoralWard).is_ok());
    }

    #[test]
    fn test_region_prices_paths() {
        let config = DashboardConfig::from_toml_str(
            r#"
[region_prices]
district_electoral_area = "maps/dea.csv"
"#,
        )
        .unwrap();
        assert_eq!(
            config.region_prices_path(RegionType::DistrictElectoralArea).unwrap(),
            PathBuf::from("./maps/dea.csv")
        );
        assert_eq!(
            config.region_prices_path(RegionType::ElectoralWard).unwrap(),
            PathBuf::from("./data/chloropleth_data/electoral_wards.csv")
        );
        assert!(config.region_prices_path(RegionType::County).is_err());
    }
}
