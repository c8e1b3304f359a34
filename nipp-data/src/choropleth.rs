//! Choropleth map layers: quantile color bins, region centroids and the
//! join between a price table and boundary geometries.

use crate::averages::RegionPrice;
use geo::{BoundingRect, Coord, LineString, MultiPolygon};
use geojson::{Feature, FeatureCollection, JsonObject};
use nipp_core::{Error, Result};
use nipp_utils::labels::format_price;
use nipp_utils::stats::{mean, quantiles};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

/// Probabilities of the fill-color thresholds.
pub const QUANTILE_PROBABILITIES: [f64; 7] = [0.0, 0.25, 0.5, 0.75, 0.9, 0.98, 1.0];

/// Fill-color thresholds: quantiles of the price column at
/// [`QUANTILE_PROBABILITIES`]. Always non-decreasing; neighbouring
/// thresholds coincide when the column has few distinct prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColorBins(Vec<f64>);

impl ColorBins {
    pub fn from_prices(prices: &[f64]) -> Result<ColorBins> {
        quantiles(prices, &QUANTILE_PROBABILITIES)
            .map(ColorBins)
            .ok_or(Error::EmptyPriceColumn)
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.0
    }

    /// Number of fill buckets between the thresholds.
    pub fn bucket_count(&self) -> usize {
        self.0.len() - 1
    }

    /// Fill bucket of `price`: `0` for the cheapest band, up to
    /// `bucket_count() - 1`. Prices outside the range clamp to the ends.
    pub fn bucket_of(&self, price: f64) -> usize {
        let inner = &self.0[1..self.0.len() - 1];
        inner.partition_point(|threshold| *threshold <= price)
    }
}

/// A region boundary as read from a boundary file.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionBoundary {
    pub region: String,
    pub boundary: MultiPolygon<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub min: LonLat,
    pub max: LonLat,
}

/// A priced region ready to shade and label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethRegion {
    pub region: String,
    pub price: f64,
    pub bucket: usize,
    /// Popup text, e.g. `"£182,500"`.
    pub label: String,
    pub centroid: LonLat,
    #[serde(skip)]
    pub boundary: MultiPolygon<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethLayer {
    pub bins: ColorBins,
    /// Mean of the region centroids, for initial map framing.
    pub center: LonLat,
    pub bounds: Option<MapBounds>,
    pub regions: Vec<ChoroplethRegion>,
    /// Priced regions with no boundary.
    pub dropped_prices: usize,
    /// Boundaries with no price.
    pub dropped_geometries: usize,
}

impl ChoroplethLayer {
    /// Export as GeoJSON with the price, label, bucket and centroid of each
    /// region in its feature properties.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let features = self
            .regions
            .iter()
            .map(|region| {
                let mut properties = JsonObject::new();
                properties.insert("region".to_string(), json!(region.region));
                properties.insert("price".to_string(), json!(region.price));
                properties.insert("label".to_string(), json!(region.label));
                properties.insert("bucket".to_string(), json!(region.bucket));
                properties.insert(
                    "centroid".to_string(),
                    json!([region.centroid.lon, region.centroid.lat]),
                );
                Feature {
                    bbox: None,
                    geometry: Some(geojson::Geometry::new(geojson::Value::from(
                        &region.boundary,
                    ))),
                    id: Some(geojson::feature::Id::String(region.region.clone())),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

/// Exterior-ring vertices of a ring, without the closing repeat of the first.
fn ring_vertices(ring: &LineString<f64>) -> &[Coord<f64>] {
    let coords = &ring.0;
    if coords.len() > 1 && coords.first() == coords.last() {
        &coords[..coords.len() - 1]
    } else {
        coords
    }
}

/// Arithmetic mean of the exterior-ring vertices of every polygon.
pub fn vertex_centroid(boundary: &MultiPolygon<f64>) -> Option<LonLat> {
    let vertices: Vec<&Coord<f64>> = boundary
        .iter()
        .flat_map(|polygon| ring_vertices(polygon.exterior()))
        .collect();
    let lons: Vec<f64> = vertices.iter().map(|c| c.x).collect();
    let lats: Vec<f64> = vertices.iter().map(|c| c.y).collect();
    Some(LonLat {
        lon: mean(&lons)?,
        lat: mean(&lats)?,
    })
}

fn combined_bounds(regions: &[ChoroplethRegion]) -> Option<MapBounds> {
    regions
        .iter()
        .filter_map(|region| region.boundary.bounding_rect())
        .map(|rect| MapBounds {
            min: LonLat {
                lon: rect.min().x,
                lat: rect.min().y,
            },
            max: LonLat {
                lon: rect.max().x,
                lat: rect.max().y,
            },
        })
        .reduce(|a, b| MapBounds {
            min: LonLat {
                lon: a.min.lon.min(b.min.lon),
                lat: a.min.lat.min(b.min.lat),
            },
            max: LonLat {
                lon: a.max.lon.max(b.max.lon),
                lat: a.max.lat.max(b.max.lat),
            },
        })
}

/// Join prices to boundaries and bin them.
///
/// The join is an inner join on region name: priced regions without a
/// boundary and boundaries without a price are dropped without error and
/// only counted. If a region is priced twice the first price wins. Fails
/// with [`Error::EmptyPriceColumn`] when nothing matches.
pub fn build_choropleth(
    prices: &[RegionPrice],
    boundaries: &[RegionBoundary],
) -> Result<ChoroplethLayer> {
    let mut price_of: HashMap<&str, f64> = HashMap::new();
    for price in prices {
        price_of.entry(price.region.as_str()).or_insert(price.price);
    }

    let mut matched_regions = std::collections::HashSet::new();
    let mut matched = Vec::new();
    let mut dropped_geometries = 0;
    for boundary in boundaries {
        let Some(price) = price_of.get(boundary.region.as_str()) else {
            dropped_geometries += 1;
            continue;
        };
        let Some(centroid) = vertex_centroid(&boundary.boundary) else {
            log::warn!("choropleth: {} has an empty boundary", boundary.region);
            dropped_geometries += 1;
            continue;
        };
        matched_regions.insert(boundary.region.as_str());
        matched.push((boundary, *price, centroid));
    }
    let dropped_prices = price_of
        .keys()
        .filter(|region| !matched_regions.contains(*region))
        .count();

    let joined_prices: Vec<f64> = matched.iter().map(|(_, price, _)| *price).collect();
    let bins = ColorBins::from_prices(&joined_prices)?;

    let regions: Vec<ChoroplethRegion> = matched
        .into_iter()
        .map(|(boundary, price, centroid)| ChoroplethRegion {
            region: boundary.region.clone(),
            price,
            bucket: bins.bucket_of(price),
            label: format_price(price),
            centroid,
            boundary: boundary.boundary.clone(),
        })
        .collect();

    let lons: Vec<f64> = regions.iter().map(|r| r.centroid.lon).collect();
    let lats: Vec<f64> = regions.iter().map(|r| r.centroid.lat).collect();
    let center = LonLat {
        lon: mean(&lons).ok_or(Error::EmptyPriceColumn)?,
        lat: mean(&lats).ok_or(Error::EmptyPriceColumn)?,
    };
    let bounds = combined_bounds(&regions);

    log::info!(
        "choropleth: {} regions joined, {} prices and {} boundaries unmatched",
        regions.len(),
        dropped_prices,
        dropped_geometries
    );
    Ok(ChoroplethLayer {
        bins,
        center,
        bounds,
        regions,
        dropped_prices,
        dropped_geometries,
    })
}
