//! Plot-ready views of a terminal-price sample (histogram, empirical CDF).
//! No rendering happens here; an external plotter consumes these.
use crate::state::TerminalPriceSample;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Histogram {
    /// bins + 1 ascending edges
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DistributionData {
    pub histogram: Histogram,
    /// (price, P[S_T <= price]) pairs, ascending
    pub cdf: Vec<(f64, f64)>,
    /// Vertical marker for plots
    pub conversion_price: f64,
}

impl DistributionData {
    pub fn from_sample(sample: &TerminalPriceSample, bins: usize, conversion_price: f64) -> Self {
        Self {
            histogram: histogram(sample, bins),
            cdf: empirical_cdf(sample),
            conversion_price,
        }
    }
}

/// Equal-width bins over [min, max]. The max value lands in the last bin.
/// A constant sample gets a single unit-width bin centred on the value.
pub fn histogram(sample: &TerminalPriceSample, bins: usize) -> Histogram {
    let bins = bins.max(1);
    let sorted = sample.sorted();
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Histogram { edges: Vec::new(), counts: Vec::new() };
    };

    if max <= min {
        return Histogram {
            edges: vec![min - 0.5, min + 0.5],
            counts: vec![sorted.len() as u64],
        };
    }

    let width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { max } else { min + width * i as f64 })
        .collect();

    let mut counts = vec![0u64; bins];
    for &x in &sorted {
        let idx = (((x - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Histogram { edges, counts }
}

/// Step-function CDF: i-th smallest price paired with i / n.
pub fn empirical_cdf(sample: &TerminalPriceSample) -> Vec<(f64, f64)> {
    let n = sample.len() as f64;
    sample
        .sorted()
        .into_iter()
        .enumerate()
        .map(|(i, x)| (x, (i + 1) as f64 / n))
        .collect()
}
