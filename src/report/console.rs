//! Console rendering of a run summary. Formatting only; no numbers are derived here.
use crate::state::RunSummary;
use std::fmt::Write;

pub fn render_text(summary: &RunSummary) -> String {
    let r = &summary.report;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "--- {} Convertible Bond Simulation Results ---", summary.model);
    let _ = writeln!(
        out,
        "Conversion Probability: {}",
        percent(r.conversion_probability)
    );
    let _ = writeln!(
        out,
        "Expected Dilution (Shares): {}",
        thousands(r.expected_dilution)
    );
    let _ = writeln!(
        out,
        "Expected Cash Repayment: {}",
        dollars(r.expected_cash_repayment)
    );
    let _ = writeln!(
        out,
        "Expected Equity Cost (if converted): {}",
        dollars(r.expected_equity_cost)
    );
    let _ = writeln!(
        out,
        "95% Confidence Interval (Final Price): ${:.2} - ${:.2}",
        r.confidence_interval.low, r.confidence_interval.high
    );
    let _ = writeln!(
        out,
        "Trials: {} | converted: {} | seed: {}",
        thousands(r.trials as f64),
        thousands(r.converted as f64),
        summary.seed
    );
    for advisory in &r.advisories {
        let _ = writeln!(out, "Note: {advisory}");
    }

    out
}

/// 0.1234 -> "12.34%"
fn percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Currency, whole units: 1234567.8 -> "$1,234,568"
fn dollars(v: f64) -> String {
    if v < 0.0 {
        format!("-${}", thousands(-v))
    } else {
        format!("${}", thousands(v))
    }
}

/// Rounded to a whole number with comma grouping: 6388480.4 -> "6,388,480"
fn thousands(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let rounded = format!("{:.0}", v.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if v < 0.0 && rounded != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModelVariant, RateBasis};
    use crate::errors::SampleAdvisory;
    use crate::state::{ConfidenceInterval, OutcomeReport};
    use smallvec::smallvec;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.4), "999");
        assert_eq!(thousands(1000.0), "1,000");
        assert_eq!(thousands(6_388_480.0), "6,388,480");
        assert_eq!(thousands(920_000_000.0), "920,000,000");
        assert_eq!(thousands(-12_345.0), "-12,345");
    }

    #[test]
    fn test_percent_and_dollars() {
        assert_eq!(percent(0.0512), "5.12%");
        assert_eq!(percent(1.0), "100.00%");
        assert_eq!(dollars(873_000_000.4), "$873,000,000");
    }

    #[test]
    fn test_render_contains_all_fields() {
        let summary = RunSummary {
            run_id: uuid::Uuid::nil(),
            generated_at: "2026-01-01T00:00:00+00:00".into(),
            model: "Jump-Diffusion",
            variant: ModelVariant::PlainDiffusion { rate_basis: RateBasis::RiskFree },
            seed: 42,
            conversion_price: 144.01,
            report: OutcomeReport {
                conversion_probability: 0.0512,
                expected_dilution: 327_090.2,
                expected_cash_repayment: 872_896_000.0,
                expected_equity_cost: 52_000_000.0,
                confidence_interval: ConfidenceInterval { low: 48.5, high: 170.25 },
                trials: 10_000,
                converted: 512,
                shares_issued: 6_388_480.0,
                mean_terminal: 96.0,
                std_dev_terminal: 30.0,
                min_terminal: 20.0,
                max_terminal: 260.0,
                non_positive: 0,
                advisories: smallvec![SampleAdvisory::DegenerateSample],
            },
        };

        let text = render_text(&summary);
        assert!(text.contains("Jump-Diffusion"));
        assert!(text.contains("Conversion Probability: 5.12%"));
        assert!(text.contains("Expected Dilution (Shares): 327,090"));
        assert!(text.contains("Expected Cash Repayment: $872,896,000"));
        assert!(text.contains("Expected Equity Cost (if converted): $52,000,000"));
        assert!(text.contains("$48.50 - $170.25"));
        assert!(text.contains("Trials: 10,000"));
        assert!(text.contains("Note: no trial converted"));
    }
}
