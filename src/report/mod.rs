pub mod console;
pub mod distribution;

pub use console::render_text;
pub use distribution::{empirical_cdf, histogram, DistributionData, Histogram};

use crate::errors::SimResult;
use crate::state::RunSummary;

/// JSON document for one run: the summary plus plot-ready distribution data.
#[derive(Debug, serde::Serialize)]
pub struct JsonRun<'a> {
    #[serde(flatten)]
    pub summary: &'a RunSummary,
    pub distribution: &'a DistributionData,
}

pub fn render_json(runs: &[JsonRun<'_>]) -> SimResult<String> {
    Ok(serde_json::to_string_pretty(runs)?)
}
