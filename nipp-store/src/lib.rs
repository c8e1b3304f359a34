//! File-backed data store for the NI property price dashboard.
//!
//! The store resolves input files through a [`DashboardConfig`], parses
//! them with the [`loader`] functions and memoizes each parsed file for the
//! rest of the session.
//!
//! # Architecture
//!
//! - `Rc`-shared caches so a cloned store sees the same parsed data
//! - Parsers take `&str`, so fixtures can be fed with `include_str!`
//! - Typed rows out, ready for the `nipp-data` transforms
//!
//! # Usage
//!
//! ```no_run
//! use nipp_core::district::{GovernmentDistrict, SheetId};
//! use nipp_core::property_type::PropertyType;
//! use nipp_core::region::RegionType;
//! use nipp_store::{DashboardConfig, DataStore};
//!
//! let store = DataStore::new(DashboardConfig::default());
//! let index = store.price_index().unwrap();
//! let sheet = SheetId::new(GovernmentDistrict::Belfast, PropertyType::Detached);
//! let rows = store.sale_sheet(RegionType::ElectoralWard, sheet).unwrap();
//! ```

mod cache;
pub mod config;
pub mod loader;

pub use cache::FileCache;
pub use config::DashboardConfig;

use nipp_core::district::SheetId;
use nipp_core::listing::PropertyListing;
use nipp_core::price_index::PriceIndexRow;
use nipp_core::property_type::PropertyType;
use nipp_core::region::RegionType;
use nipp_core::sale_record::SaleSheetRow;
use nipp_data::averages::RegionPrice;
use nipp_data::choropleth::RegionBoundary;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

/// Configured access to every input file, each parsed at most once.
///
/// Cheaply cloneable; clones share the caches.
#[derive(Clone)]
pub struct DataStore {
    config: Rc<DashboardConfig>,
    price_index: FileCache<Vec<PriceIndexRow>>,
    sheets: FileCache<Vec<SaleSheetRow>>,
    listings: FileCache<Vec<PropertyListing>>,
    boundaries: FileCache<Vec<RegionBoundary>>,
    region_price_tables: FileCache<String>,
    fragments: FileCache<HashMap<String, String>>,
}

impl DataStore {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config: Rc::new(config),
            price_index: FileCache::new(),
            sheets: FileCache::new(),
            listings: FileCache::new(),
            boundaries: FileCache::new(),
            region_price_tables: FileCache::new(),
            fragments: FileCache::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn price_index(&self) -> anyhow::Result<Rc<Vec<PriceIndexRow>>> {
        self.price_index
            .get_or_load(&self.config.price_index_path(), loader::parse_price_index)
    }

    /// Path of a sheet export. Only sheets of the closed district and
    /// property type table can be named.
    pub fn sheet_path(&self, region_type: RegionType, sheet: SheetId) -> anyhow::Result<PathBuf> {
        Ok(self
            .config
            .sheet_dir(region_type)?
            .join(format!("{}.csv", sheet.sheet_name())))
    }

    /// Rows of one workbook sheet. A sheet missing from the workbook
    /// directory is reported with its id.
    pub fn sale_sheet(
        &self,
        region_type: RegionType,
        sheet: SheetId,
    ) -> anyhow::Result<Rc<Vec<SaleSheetRow>>> {
        let path = self.sheet_path(region_type, sheet)?;
        if !path.is_file() {
            anyhow::bail!(
                "sheet {} missing from {} workbook at {}",
                sheet,
                region_type,
                path.display()
            );
        }
        self.sheets
            .get_or_load(&path, |csv| loader::parse_sale_sheet(csv, region_type))
    }

    /// Every sheet of the closed table with no export in the workbook
    /// directory of `region_type`.
    pub fn missing_sheets(&self, region_type: RegionType) -> anyhow::Result<Vec<SheetId>> {
        let mut missing = Vec::new();
        for sheet in SheetId::all() {
            if !self.sheet_path(region_type, sheet)?.is_file() {
                missing.push(sheet);
            }
        }
        if !missing.is_empty() {
            log::warn!(
                "store: {} of the {} workbook sheets are missing",
                missing.len(),
                region_type
            );
        }
        Ok(missing)
    }

    pub fn listings(&self) -> anyhow::Result<Rc<Vec<PropertyListing>>> {
        self.listings
            .get_or_load(&self.config.listings_path(), loader::parse_listings)
    }

    pub fn boundaries(&self, region_type: RegionType) -> anyhow::Result<Rc<Vec<RegionBoundary>>> {
        self.boundaries
            .get_or_load(&self.config.boundary_path(region_type), |geojson| {
                loader::parse_boundaries(geojson, region_type)
            })
    }

    /// Published median price of `property_type` per electoral area or
    /// ward. The table holds every property type, so the file text is
    /// cached and the requested column is read out of it on each call.
    pub fn region_prices(
        &self,
        region_type: RegionType,
        property_type: PropertyType,
    ) -> anyhow::Result<Vec<RegionPrice>> {
        let path = self.config.region_prices_path(region_type)?;
        let table = self
            .region_price_tables
            .get_or_load(&path, |csv| Ok(csv.to_string()))?;
        loader::parse_region_prices(&table, region_type, property_type)
    }

    /// Precomputed choropleth markup for a property type and region type.
    pub fn fragment(
        &self,
        property_type: PropertyType,
        region_type: RegionType,
    ) -> anyhow::Result<String> {
        let path = self.config.fragments_path(&property_type.fragment_stem());
        let fragments = self.fragments.get_or_load(&path, loader::parse_fragments)?;
        Ok(loader::fragment_for(&fragments, region_type)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nipp_core::district::GovernmentDistrict;
    use std::fs;
    use std::path::Path;

    const PRICE_INDEX_CSV: &str = include_str!("../../fixtures/ni-hpi-by-property-type.csv");
    const SHEET_CSV: &str = include_str!("../../fixtures/dea_sheets/Belfast_DET.csv");
    const ELECTORAL_AREAS_CSV: &str = include_str!("../../fixtures/chloropleth_data/electoral_areas.csv");
    const FRAGMENTS_JSON: &str = include_str!("../../fixtures/static/detached_chloropleths.json");

    fn store_in(root: &Path) -> DataStore {
        DataStore::new(DashboardConfig {
            root: root.to_path_buf(),
            price_index: PathBuf::from("hpi.csv"),
            electoral_area_sheets: PathBuf::from("dea"),
            fragments_dir: PathBuf::from("static"),
            ..DashboardConfig::default()
        })
    }

    #[test]
    fn store_loads_and_caches_price_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hpi.csv"), PRICE_INDEX_CSV).unwrap();
        let store = store_in(dir.path());
        let first = store.price_index().unwrap();
        // Removing the file proves the second access is served from memory.
        fs::remove_file(dir.path().join("hpi.csv")).unwrap();
        let second = store.clone().price_index().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn store_reports_missing_sheet_by_id() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dea")).unwrap();
        fs::write(dir.path().join("dea/Belfast_DET.csv"), SHEET_CSV).unwrap();
        let store = store_in(dir.path());

        let present = SheetId::new(GovernmentDistrict::Belfast, PropertyType::Detached);
        assert_eq!(
            store
                .sale_sheet(RegionType::DistrictElectoralArea, present)
                .unwrap()
                .len(),
            7
        );

        let absent = SheetId::new(GovernmentDistrict::Belfast, PropertyType::Terrace);
        let err = store
            .sale_sheet(RegionType::DistrictElectoralArea, absent)
            .unwrap_err();
        assert!(err.to_string().contains(&absent.to_string()));

        let missing = store.missing_sheets(RegionType::DistrictElectoralArea).unwrap();
        assert_eq!(missing.len(), SheetId::all().count() - 1);
        assert!(!missing.contains(&present));
    }

    #[test]
    fn store_reads_region_prices_per_property_type() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dea.csv"), ELECTORAL_AREAS_CSV).unwrap();
        let mut config = DashboardConfig {
            root: dir.path().to_path_buf(),
            ..DashboardConfig::default()
        };
        config.region_prices.district_electoral_area = PathBuf::from("dea.csv");
        let store = DataStore::new(config);

        let all = store
            .region_prices(RegionType::DistrictElectoralArea, PropertyType::AllResidential)
            .unwrap();
        fs::remove_file(dir.path().join("dea.csv")).unwrap();
        let apartments = store
            .region_prices(RegionType::DistrictElectoralArea, PropertyType::Apartment)
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(apartments, vec![RegionPrice::new("Botanic", 142_000.0)]);
        assert!(store
            .region_prices(RegionType::County, PropertyType::AllResidential)
            .is_err());
    }

    #[test]
    fn store_serves_fragments() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("static")).unwrap();
        fs::write(
            dir.path().join("static/detached_chloropleths.json"),
            FRAGMENTS_JSON,
        )
        .unwrap();
        let store = store_in(dir.path());
        assert!(store
            .fragment(PropertyType::Detached, RegionType::County)
            .unwrap()
            .starts_with("<div"));
        assert!(store
            .fragment(PropertyType::Detached, RegionType::ElectoralWard)
            .is_err());
        assert!(store
            .fragment(PropertyType::Terrace, RegionType::County)
            .is_err());
    }
}
