//! Shared utility functions for NIPP crates.

/// Descriptive statistics over price columns
pub mod stats {
    /// Arithmetic mean, or `None` for an empty slice.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Quantile of an ascending-sorted slice using linear interpolation
    /// between order statistics (`h = (n - 1) * p`).
    ///
    /// Returns `None` for an empty slice. `p` is clamped to `[0, 1]`.
    pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
        let last = sorted.len().checked_sub(1)?;
        let h = last as f64 * p.clamp(0.0, 1.0);
        let lower = h.floor() as usize;
        let upper = h.ceil() as usize;
        let fraction = h - lower as f64;
        Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
    }

    /// Quantiles of an unsorted column at each of `probabilities`.
    /// Non-finite values are skipped.
    pub fn quantiles(values: &[f64], probabilities: &[f64]) -> Option<Vec<f64>> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));
        probabilities
            .iter()
            .map(|p| quantile_sorted(&sorted, *p))
            .collect()
    }

}

/// Label formatting for regions and prices
pub mod labels {
    /// Lower-case a region name and capitalize its first letter,
    /// e.g. `"LONDONDERRY"` -> `"Londonderry"`.
    pub fn capitalize_region_name(name: &str) -> String {
        let lower = name.to_lowercase();
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Format a price as whole pounds with thousands separators: `"£123,457"`.
    pub fn format_price(price: f64) -> String {
        let rounded = price.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        let digits = format!("{}", rounded.abs() as u64);
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        format!("{sign}£{grouped}")
    }

}
