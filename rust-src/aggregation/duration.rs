//! Duration histogram with a kernel density overlay.

use serde::Serialize;


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}


/// Equal-width histogram plus a density curve scaled to bin counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DurationHistogram {
    pub bins: Vec<HistogramBin>,
    /// `(x, expected count per bin)` samples of the Gaussian KDE.
    pub density: Vec<(f64, f64)>,
    pub samples: usize,
    pub mean: Option<f64>,
}


impl DurationHistogram {
    /// Build a histogram of `values` with `bin_count` bins and `density_points` KDE samples.
    pub fn build(values: &[f64], bin_count: usize, density_points: usize) -> Self {
        if values.is_empty() || bin_count == 0 {
            return Self::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // A single distinct value gets a unit-wide range around it
        let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
        let width = (hi - lo) / bin_count as f64;

        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                start: lo + width * i as f64,
                end: lo + width * (i + 1) as f64,
                count: 0,
            })
            .collect();

        for &v in values {
            // Last bin is closed on the right
            let idx = (((v - lo) / width) as usize).min(bin_count - 1);
            bins[idx].count += 1;
        }

        let density = gaussian_kde(values, min, max, density_points)
            .into_iter()
            .map(|(x, d)| (x, d * values.len() as f64 * width))
            .collect();

        Self {
            bins,
            density,
            samples: values.len(),
            mean: Some(values.iter().sum::<f64>() / values.len() as f64),
        }
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}


/// Gaussian KDE with Scott's bandwidth, sampled on `[min, max]`.
///
/// Empty when there are fewer than two samples or no spread.
fn gaussian_kde(values: &[f64], min: f64, max: f64, points: usize) -> Vec<(f64, f64)> {
    let n = values.len();
    if n < 2 || points < 2 || max <= min {
        return Vec::new();
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return Vec::new();
    }

    let bandwidth = std_dev * (n as f64).powf(-0.2);
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let step = (max - min) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let x = min + step * i as f64;
            let sum: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            (x, sum * norm)
        })
        .collect()
}
