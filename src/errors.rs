/// Domain-specific error types for the simulation engine.
/// Configuration problems abort before any trial runs; there are no partial results.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Serialization(e.to_string())
    }
}

pub type SimResult<T> = Result<T, SimError>;

/// Non-fatal conditions detected while aggregating a sample.
/// Attached to the report and logged, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleAdvisory {
    /// No trial finished above the conversion price; equity cost reported as 0.
    DegenerateSample,
    /// Some terminal prices are <= 0 (Euler discretisation error, not clipped).
    NonPositivePrices,
}

impl std::fmt::Display for SampleAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateSample => write!(f, "no trial converted; equity cost defined as 0"),
            Self::NonPositivePrices => write!(f, "sample contains non-positive terminal prices"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::InvalidConfiguration("num_simulations must be > 0".into());
        assert!(err.to_string().contains("num_simulations"));

        let err = SimError::Config("SEED: invalid digit".into());
        assert!(err.to_string().starts_with("config error"));
    }

    #[test]
    fn test_advisory_serializes_snake_case() {
        let json = serde_json::to_string(&SampleAdvisory::DegenerateSample).unwrap();
        assert_eq!(json, "\"degenerate_sample\"");
    }
}
