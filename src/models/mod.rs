pub mod diffusion;
pub mod jump_diffusion;

use crate::config::{ModelConfig, ModelVariant};
use crate::rng::SimRng;

pub use diffusion::PlainDiffusion;
pub use jump_diffusion::JumpDiffusion;

/// One discrete time step of a price process.
/// The outer trial/step loop is shared; only the increment differs per model.
/// Send + Sync required so a single instance can be shared across rayon workers.
pub trait StochasticStep: Send + Sync {
    fn name(&self) -> &'static str;

    /// Advance `price` by one step of size dt, consuming draws from `rng`.
    /// Never clips: the Euler scheme may return a non-positive price.
    fn step(&self, price: f64, rng: &mut SimRng) -> f64;
}

/// Build the step model for a validated config.
pub fn build_model(config: &ModelConfig) -> Box<dyn StochasticStep> {
    let rate = config.base_rate();
    match config.variant {
        ModelVariant::PlainDiffusion { .. } => Box::new(PlainDiffusion::new(
            rate,
            config.volatility,
            config.step_size,
        )),
        ModelVariant::JumpDiffusion { jumps, .. } => Box::new(JumpDiffusion::new(
            rate,
            config.volatility,
            config.step_size,
            jumps,
        )),
    }
}
