//! Command implementations for the NI property prices CLI.
//!
//! Every subcommand recomputes its output from scratch for the given
//! parameters, reading inputs through a shared [`DataStore`].

use clap::Subcommand;
use nipp_core::district::GovernmentDistrict;
use nipp_core::property_type::PropertyType;
use nipp_core::region::RegionType;
use nipp_store::DataStore;
use std::io::Write;

pub mod distribution;
pub mod index;
pub mod map;
pub mod regional;

#[derive(Subcommand)]
pub enum Command {
    /// Normalized house price index as CSV
    Index {
        /// Only include these property types (default: all published)
        #[arg(short = 'p', long = "property-type")]
        property_types: Vec<PropertyType>,
    },

    /// List the regions published in one workbook sheet
    Regions {
        #[arg(short = 'r', long)]
        region_type: RegionType,

        #[arg(short = 'd', long)]
        district: GovernmentDistrict,

        #[arg(short = 'p', long)]
        property_type: PropertyType,
    },

    /// Median sale price per year for selected regions as CSV
    Regional {
        #[arg(short = 'r', long)]
        region_type: RegionType,

        #[arg(short = 'd', long)]
        district: GovernmentDistrict,

        #[arg(short = 'p', long)]
        property_type: PropertyType,

        /// Regions to plot, in column order (default depends on region type)
        #[arg(long = "region")]
        regions: Vec<String>,

        /// Join regions on sale year instead of lining them up by position
        #[arg(long)]
        by_year: bool,
    },

    /// Price map layer as JSON: average asking price per county, published
    /// median sale price per electoral area or ward
    Choropleth {
        #[arg(short = 'r', long)]
        region_type: RegionType,

        #[arg(short = 'p', long, default_value = "All Residential")]
        property_type: PropertyType,

        /// Emit a GeoJSON FeatureCollection instead of the layer summary
        #[arg(long)]
        geojson: bool,
    },

    /// Asking price histogram as JSON
    Distribution {
        #[arg(short = 'p', long, default_value = "All Residential")]
        property_type: PropertyType,

        /// Number of bins (default: Sturges' rule)
        #[arg(short = 'b', long)]
        bins: Option<usize>,
    },

    /// Precomputed choropleth markup
    Fragment {
        #[arg(short = 'r', long)]
        region_type: RegionType,

        #[arg(short = 'p', long)]
        property_type: PropertyType,
    },

    /// List workbook sheets with no CSV export
    Sheets {
        #[arg(short = 'r', long)]
        region_type: RegionType,
    },
}

pub fn run(store: &DataStore, command: Command, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Command::Index { property_types } => index::run_index(store, &property_types, out),
        Command::Regions {
            region_type,
            district,
            property_type,
        } => regional::run_regions(store, region_type, district, property_type, out),
        Command::Regional {
            region_type,
            district,
            property_type,
            regions,
            by_year,
        } => regional::run_regional(
            store,
            regional::RegionalQuery {
                region_type,
                district,
                property_type,
                regions,
                by_year,
            },
            out,
        ),
        Command::Choropleth {
            region_type,
            property_type,
            geojson,
        } => map::run_choropleth(store, region_type, property_type, geojson, out),
        Command::Distribution {
            property_type,
            bins,
        } => distribution::run_distribution(store, property_type, bins, out),
        Command::Fragment {
            region_type,
            property_type,
        } => map::run_fragment(store, region_type, property_type, out),
        Command::Sheets { region_type } => regional::run_sheets(store, region_type, out),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use nipp_store::{DashboardConfig, DataStore};
    use std::path::PathBuf;

    /// A store reading the workspace fixtures.
    pub fn fixture_store() -> DataStore {
        let mut config = DashboardConfig {
            root: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../fixtures"),
            price_index: PathBuf::from("ni-hpi-by-property-type.csv"),
            listings: PathBuf::from("cleaned_properties.csv"),
            electoral_area_sheets: PathBuf::from("dea_sheets"),
            electoral_ward_sheets: PathBuf::from("ward_sheets"),
            fragments_dir: PathBuf::from("static"),
            ..DashboardConfig::default()
        };
        config.boundaries.county = PathBuf::from("counties.geojson");
        config.boundaries.district_electoral_area = PathBuf::from("electoral_areas.geojson");
        config.region_prices.district_electoral_area =
            PathBuf::from("chloropleth_data/electoral_areas.csv");
        DataStore::new(config)
    }

    pub fn output(run: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        run(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Command};
    use crate::testing::fixture_store;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_parses_enum_arguments() {
        let cli = Cli::try_parse_from([
            "nipp",
            "regional",
            "-r",
            "dea",
            "-d",
            "Belfast",
            "-p",
            "detached",
            "--region",
            "Botanic",
            "--region",
            "Balmoral",
            "--by-year",
        ])
        .unwrap();
        let mut out = Vec::<u8>::new();
        run(&fixture_store(), cli.command, &mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert!(csv.starts_with("Sale Year,Botanic,Balmoral\n"));
        assert!(csv.contains("2022,295000,\n"));
    }

    #[test]
    fn test_rejects_unknown_district() {
        assert!(Cli::try_parse_from(["nipp", "regions", "-r", "dea", "-d", "Atlantis", "-p", "detached"]).is_err());
    }
}
