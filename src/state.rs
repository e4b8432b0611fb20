use crate::config::ModelVariant;
use crate::errors::SampleAdvisory;
use portable_atomic::{AtomicU64, Ordering};
use smallvec::SmallVec;

// ── Simulation output ──

/// Full price trajectory for one trial: step_count + 1 points starting at S0.
/// Transient; the driver only keeps the terminal value.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePath {
    pub points: Vec<f64>,
}

impl PricePath {
    #[inline]
    pub fn terminal(&self) -> f64 {
        self.points.last().copied().unwrap_or(f64::NAN)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One terminal price per trial. Order carries no meaning.
/// Immutable once the driver hands it over.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalPriceSample {
    prices: Vec<f64>,
}

impl TerminalPriceSample {
    pub fn new(prices: Vec<f64>) -> Self {
        Self { prices }
    }

    #[inline]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Ascending copy (total order, so NaN cannot panic the sort).
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.prices.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }
}

// ── Aggregated outcome ──

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ConfidenceInterval {
    pub low: f64,
    pub high: f64,
}

/// Bond-level outcome of one simulation run.
///
/// Invariants: expected_dilution = conversion_probability * shares_issued,
/// expected_cash_repayment = (1 - conversion_probability) * principal.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OutcomeReport {
    pub conversion_probability: f64,
    pub expected_dilution: f64,
    pub expected_cash_repayment: f64,
    pub expected_equity_cost: f64,
    pub confidence_interval: ConfidenceInterval,

    // Diagnostics
    pub trials: usize,
    pub converted: usize,
    pub shares_issued: f64,
    pub mean_terminal: f64,
    pub std_dev_terminal: f64,
    pub min_terminal: f64,
    pub max_terminal: f64,
    pub non_positive: usize,
    pub advisories: SmallVec<[SampleAdvisory; 2]>,
}

/// Report plus run metadata, as handed to presentation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunSummary {
    pub run_id: uuid::Uuid,
    pub generated_at: String,
    pub model: &'static str,
    pub variant: ModelVariant,
    pub seed: u64,
    pub conversion_price: f64,
    pub report: OutcomeReport,
}

// ── Progress counters (lock-free, shared across rayon workers) ──

#[derive(Debug, Default)]
pub struct RunCounters {
    pub trials_completed: AtomicU64,
    pub steps_taken: AtomicU64,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_trial(&self, steps: u64) -> u64 {
        self.steps_taken.fetch_add(steps, Ordering::Relaxed);
        self.trials_completed.fetch_add(1, Ordering::Relaxed) + 1
    }

    #[inline]
    pub fn trials(&self) -> u64 {
        self.trials_completed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps_taken.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_handles_unordered_input() {
        let sample = TerminalPriceSample::new(vec![3.0, -1.0, 2.0, 0.0]);
        assert_eq!(sample.sorted(), vec![-1.0, 0.0, 2.0, 3.0]);
        assert_eq!(sample.prices(), &[3.0, -1.0, 2.0, 0.0]);
    }

    #[test]
    fn test_path_terminal() {
        let path = PricePath { points: vec![100.0, 101.0, 99.5] };
        assert_eq!(path.terminal(), 99.5);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_counters() {
        let c = RunCounters::new();
        assert_eq!(c.record_trial(126), 1);
        assert_eq!(c.record_trial(126), 2);
        assert_eq!(c.trials(), 2);
        assert_eq!(c.steps(), 252);
    }
}
