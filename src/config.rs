use crate::errors::{SimError, SimResult};

/// Relative tolerance when checking that horizon / step size is an integer.
const STEP_RATIO_TOLERANCE: f64 = 1e-9;

/// Which base rate feeds the deterministic part of a diffusion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    /// Risk-neutral measure: risk-free rate r.
    RiskFree,
    /// Real-world measure: expected return mu.
    Drift,
}

impl std::str::FromStr for RateBasis {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "risk_free" | "riskfree" | "r" => Ok(Self::RiskFree),
            "drift" | "mu" => Ok(Self::Drift),
            other => Err(SimError::Config(format!("unknown rate basis: {other}"))),
        }
    }
}

/// Merton-style jump parameters (per year, log-scale sizes).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct JumpParams {
    pub intensity: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Convertible bond terms.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct BondTerms {
    /// Face amount, currency units
    pub principal: f64,
    /// Shares per $1000 of principal
    pub conversion_ratio: f64,
}

impl BondTerms {
    /// Shares created on full conversion.
    #[inline]
    pub fn shares_issued(&self) -> f64 {
        (self.principal / 1000.0) * self.conversion_ratio
    }
}

/// Stochastic model selection. Each variant carries its own rate basis so the
/// two models can project under different measures.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ModelVariant {
    PlainDiffusion { rate_basis: RateBasis },
    JumpDiffusion { rate_basis: RateBasis, jumps: JumpParams },
}

impl ModelVariant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PlainDiffusion { .. } => "Geometric Diffusion",
            Self::JumpDiffusion { .. } => "Jump-Diffusion",
        }
    }

    pub fn rate_basis(&self) -> RateBasis {
        match self {
            Self::PlainDiffusion { rate_basis } | Self::JumpDiffusion { rate_basis, .. } => {
                *rate_basis
            }
        }
    }
}

/// Immutable parameter bundle for one simulation run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ModelConfig {
    pub spot: f64,
    pub conversion_price: f64,
    pub drift: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub horizon_years: f64,
    pub step_size: f64,
    pub num_simulations: usize,
    pub variant: ModelVariant,
    pub bond: BondTerms,
}

impl ModelConfig {
    /// Check every parameter. Called by the driver before any trial runs.
    pub fn validate(&self) -> SimResult<()> {
        if self.num_simulations == 0 {
            return Err(invalid("num_simulations must be > 0"));
        }
        require_positive("spot", self.spot)?;
        require_positive("conversion_price", self.conversion_price)?;
        require_finite("drift", self.drift)?;
        require_finite("risk_free_rate", self.risk_free_rate)?;
        require_non_negative("volatility", self.volatility)?;
        require_positive("horizon_years", self.horizon_years)?;
        require_positive("step_size", self.step_size)?;
        require_positive("principal", self.bond.principal)?;
        require_positive("conversion_ratio", self.bond.conversion_ratio)?;

        if let ModelVariant::JumpDiffusion { jumps, .. } = &self.variant {
            require_non_negative("jump_intensity", jumps.intensity)?;
            require_finite("jump_mean", jumps.mean)?;
            require_non_negative("jump_std", jumps.std_dev)?;
        }

        self.step_count().map(|_| ())
    }

    /// Number of discrete steps, T / dt. Must be a positive integer
    /// (up to floating-point noise, e.g. 0.5 / (1/252)).
    pub fn step_count(&self) -> SimResult<usize> {
        if self.step_size <= 0.0 || !self.step_size.is_finite() {
            return Err(invalid("step_size must be positive"));
        }
        let ratio = self.horizon_years / self.step_size;
        let rounded = ratio.round();
        if !ratio.is_finite() || rounded < 1.0 {
            return Err(invalid(format!(
                "horizon / step_size = {ratio} is not a positive step count"
            )));
        }
        if (ratio - rounded).abs() > STEP_RATIO_TOLERANCE * rounded {
            return Err(invalid(format!(
                "step_size {} does not divide horizon {} into whole steps",
                self.step_size, self.horizon_years
            )));
        }
        Ok(rounded as usize)
    }

    /// Base rate used by the configured variant.
    #[inline]
    pub fn base_rate(&self) -> f64 {
        match self.variant.rate_basis() {
            RateBasis::RiskFree => self.risk_free_rate,
            RateBasis::Drift => self.drift,
        }
    }

    /// Same parameters, different model.
    pub fn with_variant(&self, variant: ModelVariant) -> Self {
        Self {
            variant,
            ..self.clone()
        }
    }
}

/// Which variants the binary runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSelection {
    Diffusion,
    Jump,
    Both,
}

/// How the driver schedules trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    Sequential,
    Parallel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Application settings loaded from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base parameters; `variant` holds the plain-diffusion model.
    pub model: ModelConfig,
    pub jump_model: ModelVariant,
    pub selection: ModelSelection,
    pub execution: Execution,
    pub report_format: ReportFormat,
    pub histogram_bins: usize,
    pub seed: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> SimResult<Self> {
        dotenvy::dotenv().ok();

        let step_size = match std::env::var("STEP_SIZE") {
            Ok(v) => parse_var::<f64>("STEP_SIZE", &v)?,
            Err(_) => {
                let per_year = parse_or::<f64>("STEPS_PER_YEAR", "252")?;
                if per_year <= 0.0 {
                    return Err(SimError::Config("STEPS_PER_YEAR must be > 0".into()));
                }
                1.0 / per_year
            }
        };

        let diffusion_basis = env_var_or("DIFFUSION_RATE_BASIS", "risk_free").parse()?;
        let jump_basis = env_var_or("JUMP_RATE_BASIS", "drift").parse()?;

        let jumps = JumpParams {
            intensity: parse_or("JUMP_INTENSITY", "1.0")?,
            mean: parse_or("JUMP_MEAN", "-0.02")?,
            std_dev: parse_or("JUMP_STD", "0.1")?,
        };

        let model = ModelConfig {
            spot: parse_or("SPOT_PRICE", "92.23")?,
            conversion_price: parse_or("CONVERSION_PRICE", "144.01")?,
            drift: parse_or("DRIFT", "0.15")?,
            risk_free_rate: parse_or("RISK_FREE_RATE", "0.05")?,
            volatility: parse_or("VOLATILITY", "0.45")?,
            horizon_years: parse_or("HORIZON_YEARS", "0.5")?,
            step_size,
            num_simulations: parse_or("NUM_SIMULATIONS", "10000")?,
            variant: ModelVariant::PlainDiffusion {
                rate_basis: diffusion_basis,
            },
            bond: BondTerms {
                principal: parse_or("PRINCIPAL", "920000000")?,
                conversion_ratio: parse_or("CONVERSION_RATIO", "6.9440")?,
            },
        };

        let selection = match env_var_or("MODEL", "both").to_ascii_lowercase().as_str() {
            "diffusion" | "gbm" => ModelSelection::Diffusion,
            "jump" | "jump_diffusion" => ModelSelection::Jump,
            "both" => ModelSelection::Both,
            other => return Err(SimError::Config(format!("MODEL: unknown value {other}"))),
        };

        let execution = match env_var_or("EXECUTION", "parallel").to_ascii_lowercase().as_str() {
            "sequential" => Execution::Sequential,
            "parallel" => Execution::Parallel,
            other => return Err(SimError::Config(format!("EXECUTION: unknown value {other}"))),
        };

        let report_format = match env_var_or("REPORT_FORMAT", "text").to_ascii_lowercase().as_str() {
            "text" => ReportFormat::Text,
            "json" => ReportFormat::Json,
            other => {
                return Err(SimError::Config(format!("REPORT_FORMAT: unknown value {other}")))
            }
        };

        let seed = match std::env::var("SEED") {
            Ok(v) => Some(parse_var::<u64>("SEED", &v)?),
            Err(_) => None,
        };

        Ok(Self {
            model,
            jump_model: ModelVariant::JumpDiffusion {
                rate_basis: jump_basis,
                jumps,
            },
            selection,
            execution,
            report_format,
            histogram_bins: parse_or("HISTOGRAM_BINS", "50")?,
            seed,
        })
    }

    /// Model configs to run, in report order.
    pub fn runs(&self) -> Vec<ModelConfig> {
        match self.selection {
            ModelSelection::Diffusion => vec![self.model.clone()],
            ModelSelection::Jump => vec![self.model.with_variant(self.jump_model)],
            ModelSelection::Both => vec![
                self.model.clone(),
                self.model.with_variant(self.jump_model),
            ],
        }
    }
}

fn invalid(msg: impl Into<String>) -> SimError {
    SimError::InvalidConfiguration(msg.into())
}

fn require_finite(name: &str, v: f64) -> SimResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {v}")))
    }
}

fn require_positive(name: &str, v: f64) -> SimResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {v}")))
    }
}

fn require_non_negative(name: &str, v: f64) -> SimResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be non-negative, got {v}")))
    }
}

fn parse_var<T>(key: &str, raw: &str) -> SimResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| SimError::Config(format!("{key}: {e}")))
}

fn parse_or<T>(key: &str, default: &str) -> SimResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parse_var(key, &env_var_or(key, default))
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
