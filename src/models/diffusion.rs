use crate::models::StochasticStep;
use crate::rng::SimRng;

/// Euler-Maruyama step for proportional (geometric) diffusion.
///
/// dS = S * (r*dt + sigma*sqrt(dt)*Z),  Z ~ N(0,1)
///
/// Increments scale with the current level; with sigma = 0 this is
/// deterministic compounding at (1 + r*dt) per step.
pub struct PlainDiffusion {
    /// r * dt, precomputed
    rate_dt: f64,
    /// sigma * sqrt(dt), precomputed
    sigma_sqrt_dt: f64,
}

impl PlainDiffusion {
    pub fn new(rate: f64, sigma: f64, dt: f64) -> Self {
        Self {
            rate_dt: rate * dt,
            sigma_sqrt_dt: sigma * dt.sqrt(),
        }
    }
}

impl StochasticStep for PlainDiffusion {
    #[inline]
    fn name(&self) -> &'static str {
        "Geometric Diffusion"
    }

    #[inline]
    fn step(&self, price: f64, rng: &mut SimRng) -> f64 {
        let z = rng.gen_normal();
        price + price * (self.rate_dt + self.sigma_sqrt_dt * z)
    }
}
