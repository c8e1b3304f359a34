//! Annual median sale prices per region.

use nipp_core::district::{GovernmentDistrict, SheetId};
use nipp_core::property_type::PropertyType;
use nipp_core::region::RegionType;
use nipp_core::sale_record::available_regions;
use nipp_data::regional_series::{build_regional_series, SeriesAlignment};
use nipp_data::table::write_csv;
use nipp_store::DataStore;
use std::io::Write;

/// Parameters of one regional series recomputation.
#[derive(Debug, Clone)]
pub struct RegionalQuery {
    pub region_type: RegionType,
    pub district: GovernmentDistrict,
    pub property_type: PropertyType,
    /// Empty means the region type's default selection.
    pub regions: Vec<String>,
    pub by_year: bool,
}

impl RegionalQuery {
    pub fn sheet(&self) -> SheetId {
        SheetId::new(self.district, self.property_type)
    }

    pub fn alignment(&self) -> SeriesAlignment {
        if self.by_year {
            SeriesAlignment::ByYear
        } else {
            SeriesAlignment::Positional
        }
    }
}

/// Write the region names of one sheet, one per line, in sheet order.
pub fn run_regions(
    store: &DataStore,
    region_type: RegionType,
    district: GovernmentDistrict,
    property_type: PropertyType,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let rows = store.sale_sheet(region_type, SheetId::new(district, property_type))?;
    for region in available_regions(&rows) {
        writeln!(out, "{region}")?;
    }
    Ok(())
}

pub fn run_regional(
    store: &DataStore,
    query: RegionalQuery,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let rows = store.sale_sheet(query.region_type, query.sheet())?;
    let selection = if query.regions.is_empty() {
        query
            .region_type
            .default_selection(&available_regions(&rows))
    } else {
        query.regions.clone()
    };

    let table = build_regional_series(&rows, &selection, query.alignment())?;
    if table.has_no_series() {
        log::info!("regional: no regions selected for {}", query.sheet());
    }
    write_csv(&table, out)?;
    Ok(())
}

/// Write the ids of workbook sheets that have no export, one per line.
pub fn run_sheets(
    store: &DataStore,
    region_type: RegionType,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    for sheet in store.missing_sheets(region_type)? {
        writeln!(out, "{sheet}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run_regional, run_regions, run_sheets, RegionalQuery};
    use crate::testing::{fixture_store, output};
    use nipp_core::district::GovernmentDistrict;
    use nipp_core::property_type::PropertyType;
    use nipp_core::region::RegionType;

    fn query(regions: &[&str]) -> RegionalQuery {
        RegionalQuery {
            region_type: RegionType::DistrictElectoralArea,
            district: GovernmentDistrict::Belfast,
            property_type: PropertyType::Detached,
            regions: regions.iter().map(|r| r.to_string()).collect(),
            by_year: false,
        }
    }

    #[test]
    fn test_regions_in_sheet_order() {
        let store = fixture_store();
        let names = output(|out| {
            run_regions(
                &store,
                RegionType::DistrictElectoralArea,
                GovernmentDistrict::Belfast,
                PropertyType::Detached,
                out,
            )
        });
        assert_eq!(names, "Balmoral\nBotanic\n");
    }

    #[test]
    fn test_default_selection_truncates_to_first_region() {
        let store = fixture_store();
        let csv = output(|out| run_regional(&store, query(&[]), out));
        assert_eq!(
            csv,
            "Sale Year,Balmoral,Botanic\n2019,185000,265000\n2020,192500,\n2021,210000,280000\n"
        );
    }

    #[test]
    fn test_explicit_selection_order() {
        let store = fixture_store();
        let csv = output(|out| run_regional(&store, query(&["Botanic", "Balmoral"]), out));
        assert_eq!(
            csv,
            "Sale Year,Botanic,Balmoral\n2019,265000,185000\n2020,,192500\n2021,280000,210000\n2022,295000,\n"
        );
    }

    #[test]
    fn test_missing_sheet_names_the_sheet() {
        let store = fixture_store();
        let mut q = query(&[]);
        q.property_type = PropertyType::Terrace;
        let err = run_regional(&store, q, &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("Belfast_TER"));
    }

    #[test]
    fn test_sheets_lists_missing_exports() {
        let store = fixture_store();
        let listed = output(|out| run_sheets(&store, RegionType::DistrictElectoralArea, out));
        assert_eq!(listed.lines().count(), 54);
        assert!(!listed.contains("Belfast_DET"));
        assert!(listed.contains("Belfast_TER\n"));
    }
}
