//! Asking-price distributions for the histogram page.

use nipp_core::listing::PropertyListing;
use nipp_core::property_type::PropertyType;
use nipp_utils::stats::quantiles;
use serde::Serialize;

/// Prices above this quantile are clipped to it before binning; the
/// listings are strongly right-skewed.
pub const DEFAULT_CLIP_QUANTILE: f64 = 0.99;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceDistribution {
    pub property_type: PropertyType,
    pub listing_count: usize,
    /// Upper clip applied to the prices, `None` when there were no listings.
    pub clip_value: Option<f64>,
    pub bins: Vec<HistogramBin>,
}

/// Sturges' rule: `ceil(log2 n) + 1` bins.
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Equal-width histogram over `[min, max]` of `values`. The last bin is
/// closed on the right. Identical values fall into one bin. At most one bin
/// per value is produced.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let Some(min) = values.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = values.iter().copied().fold(min, f64::max);
    if max == min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }
    let bins = bins.clamp(1, values.len());
    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let index = (((value - min) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// Distribution of asking prices for one property type.
///
/// Prices are clipped to `[0, q]` where `q` is the `clip_quantile` of the
/// filtered prices, then binned into `bins` buckets (Sturges' rule when
/// `None`).
pub fn price_distribution(
    listings: &[PropertyListing],
    property_type: PropertyType,
    clip_quantile: f64,
    bins: Option<usize>,
) -> PriceDistribution {
    let prices: Vec<f64> = listings
        .iter()
        .filter(|listing| listing.is_property_type(property_type) && listing.price.is_finite())
        .map(|listing| listing.price)
        .collect();

    let clip_value = quantiles(&prices, &[clip_quantile]).and_then(|q| q.first().copied());
    let clipped: Vec<f64> = match clip_value {
        Some(upper) => prices.iter().map(|p| p.clamp(0.0, upper.max(0.0))).collect(),
        None => Vec::new(),
    };
    let bin_count = bins
        .unwrap_or_else(|| sturges_bins(clipped.len()))
        .clamp(1, clipped.len().max(1));
    log::info!(
        "distribution: {} {} listings into {} bins",
        clipped.len(),
        property_type,
        bin_count
    );
    PriceDistribution {
        property_type,
        listing_count: clipped.len(),
        clip_value,
        bins: histogram(&clipped, bin_count),
    }
}
