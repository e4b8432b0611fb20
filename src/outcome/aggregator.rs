use crate::config::BondTerms;
use crate::errors::{SampleAdvisory, SimError, SimResult};
use crate::outcome::percentile::percentile;
use crate::state::{ConfidenceInterval, OutcomeReport, TerminalPriceSample};
use smallvec::SmallVec;
use statrs::statistics::Statistics;

/// Lower and upper percentile of the reported confidence interval.
const CI_LOW_PCT: f64 = 2.5;
const CI_HIGH_PCT: f64 = 97.5;

/// Turn a terminal-price sample into bond-level outcomes.
///
/// p      = #{S_T > K} / N            (strictly greater)
/// D      = p * shares_issued
/// Cash   = (1 - p) * principal
/// Equity = p * shares_issued * mean(S_T | S_T > K), or 0 if nothing converts
/// CI     = [P2.5, P97.5] of the full sample
///
/// Pure function: no randomness, no mutation of the sample.
pub fn aggregate(
    sample: &TerminalPriceSample,
    conversion_price: f64,
    bond: &BondTerms,
) -> SimResult<OutcomeReport> {
    if sample.is_empty() {
        return Err(SimError::InvalidConfiguration(
            "cannot aggregate an empty sample".into(),
        ));
    }

    let prices = sample.prices();
    let n = prices.len();
    let shares_issued = bond.shares_issued();

    let mut converted: usize = 0;
    let mut converted_sum: f64 = 0.0;
    let mut non_positive: usize = 0;
    for &s in prices {
        if s > conversion_price {
            converted += 1;
            converted_sum += s;
        }
        if s <= 0.0 {
            non_positive += 1;
        }
    }

    let conversion_probability = converted as f64 / n as f64;
    let expected_dilution = conversion_probability * shares_issued;
    let expected_cash_repayment = (1.0 - conversion_probability) * bond.principal;

    let mut advisories: SmallVec<[SampleAdvisory; 2]> = SmallVec::new();

    let expected_equity_cost = if converted > 0 {
        let converted_mean = converted_sum / converted as f64;
        conversion_probability * shares_issued * converted_mean
    } else {
        tracing::warn!(trials = n, "no trial converted; expected equity cost set to 0");
        advisories.push(SampleAdvisory::DegenerateSample);
        0.0
    };

    if non_positive > 0 {
        tracing::warn!(
            non_positive,
            trials = n,
            "terminal prices <= 0 present (Euler discretisation, not clipped)"
        );
        advisories.push(SampleAdvisory::NonPositivePrices);
    }

    let sorted = sample.sorted();
    let confidence_interval = ConfidenceInterval {
        low: percentile(&sorted, CI_LOW_PCT),
        high: percentile(&sorted, CI_HIGH_PCT),
    };

    let std_dev_terminal = if n > 1 { prices.std_dev() } else { 0.0 };

    Ok(OutcomeReport {
        conversion_probability,
        expected_dilution,
        expected_cash_repayment,
        expected_equity_cost,
        confidence_interval,
        trials: n,
        converted,
        shares_issued,
        mean_terminal: prices.mean(),
        std_dev_terminal,
        min_terminal: sorted[0],
        max_terminal: sorted[n - 1],
        non_positive,
        advisories,
    })
}
