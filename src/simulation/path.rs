use crate::models::StochasticStep;
use crate::rng::SimRng;
use crate::state::PricePath;

/// Walk one trial from `spot` over `steps` increments and return the terminal price.
/// Only the running scalar is kept.
#[inline]
pub fn simulate_terminal(
    model: &dyn StochasticStep,
    spot: f64,
    steps: usize,
    rng: &mut SimRng,
) -> f64 {
    let mut price = spot;
    for _ in 0..steps {
        price = model.step(price, rng);
    }
    price
}

/// Same walk as [`simulate_terminal`], materialising every point.
/// Consumes exactly the same draws, so its terminal value matches for a given stream.
pub fn simulate_path(
    model: &dyn StochasticStep,
    spot: f64,
    steps: usize,
    rng: &mut SimRng,
) -> PricePath {
    let mut points = Vec::with_capacity(steps + 1);
    points.push(spot);
    let mut price = spot;
    for _ in 0..steps {
        price = model.step(price, rng);
        points.push(price);
    }
    PricePath { points }
}
