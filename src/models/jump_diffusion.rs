use crate::config::JumpParams;
use crate::models::StochasticStep;
use crate::rng::SimRng;

/// Merton-style jump-diffusion step on the Euler grid.
///
/// dS = S * (mu*dt + sigma*sqrt(dt)*Z + J)
///
/// where J ~ N(mu_j, sigma_j) with probability lambda*dt (one Bernoulli
/// trial per step), otherwise J = 0. lambda*dt is not capped at 1; the
/// caller picks dt small enough.
///
/// Draw order per step is fixed: Z, then U, then the jump size only
/// when the jump fires.
pub struct JumpDiffusion {
    rate_dt: f64,
    sigma_sqrt_dt: f64,
    /// lambda * dt
    jump_probability: f64,
    jump_mean: f64,
    jump_std: f64,
}

impl JumpDiffusion {
    pub fn new(rate: f64, sigma: f64, dt: f64, jumps: JumpParams) -> Self {
        Self {
            rate_dt: rate * dt,
            sigma_sqrt_dt: sigma * dt.sqrt(),
            jump_probability: jumps.intensity * dt,
            jump_mean: jumps.mean,
            jump_std: jumps.std_dev,
        }
    }

    #[inline]
    pub fn jump_probability(&self) -> f64 {
        self.jump_probability
    }
}

impl StochasticStep for JumpDiffusion {
    #[inline]
    fn name(&self) -> &'static str {
        "Jump-Diffusion"
    }

    #[inline]
    fn step(&self, price: f64, rng: &mut SimRng) -> f64 {
        let diffusion = self.sigma_sqrt_dt * rng.gen_normal();

        let jump = if rng.gen_uniform() < self.jump_probability {
            rng.gen_normal_with(self.jump_mean, self.jump_std)
        } else {
            0.0
        };

        price + price * (self.rate_dt + diffusion + jump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlainDiffusion;
    use approx::assert_relative_eq;

    fn jumps(intensity: f64, mean: f64, std_dev: f64) -> JumpParams {
        JumpParams { intensity, mean, std_dev }
    }

    #[test]
    fn test_no_jumps_matches_diffusion_path() {
        // With lambda = 0 the jump branch never fires, but U is still drawn,
        // so compare against a diffusion step that skips every other uniform.
        let dt = 1.0 / 252.0;
        let jd = JumpDiffusion::new(0.15, 0.45, dt, jumps(0.0, -0.02, 0.1));
        let bs = PlainDiffusion::new(0.15, 0.45, dt);

        let mut rng_jd = SimRng::from_seed(2024);
        let mut rng_bs = SimRng::from_seed(2024);

        let mut s_jd = 92.23;
        let mut s_bs = 92.23;
        for _ in 0..126 {
            s_jd = jd.step(s_jd, &mut rng_jd);
            s_bs = bs.step(s_bs, &mut rng_bs);
            let _ = rng_bs.gen_uniform();
        }
        assert_relative_eq!(s_jd, s_bs, epsilon = 1e-9);
    }

    #[test]
    fn test_certain_deterministic_jump() {
        // lambda*dt = 2 > 1: jump fires every step. sigma = 0, sigma_j = 0.
        let jd = JumpDiffusion::new(0.0, 0.0, 1.0, jumps(2.0, -0.1, 0.0));
        assert!(jd.jump_probability() > 1.0);
        let mut rng = SimRng::from_seed(3);
        let s = jd.step(100.0, &mut rng);
        assert_relative_eq!(s, 90.0, epsilon = 1e-12);
    }

    #[test]
    fn test_jump_frequency_tracks_intensity() {
        // sigma = 0, jump size fixed at +1%: count steps with a jump.
        let dt = 0.01;
        let jd = JumpDiffusion::new(0.0, 0.0, dt, jumps(10.0, 0.01, 0.0));
        let mut rng = SimRng::from_seed(11);
        let n = 100_000;
        let mut hits = 0usize;
        for _ in 0..n {
            if jd.step(1.0, &mut rng) > 1.0 {
                hits += 1;
            }
        }
        let freq = hits as f64 / n as f64;
        assert!((freq - 0.1).abs() < 0.005, "jump frequency {freq} should be near 0.1");
    }
}
