use crate::config::{Execution, ModelConfig, ModelVariant};
use crate::errors::SimResult;
use crate::models::{self, StochasticStep};
use crate::rng::SimRng;
use crate::simulation::path::simulate_terminal;
use crate::state::{RunCounters, TerminalPriceSample};
use rayon::prelude::*;

/// Progress is logged every this many completed trials.
const PROGRESS_EVERY: u64 = 10_000;

/// Run `num_simulations` independent trials and collect their terminal prices.
///
/// The config is validated first; on failure nothing runs. Each call
/// advances `rng`, so back-to-back runs on the same stream see fresh draws,
/// and replaying from the same seed reproduces every sample exactly.
///
/// - `Sequential`: trials consume one child stream in order.
/// - `Parallel`: trial i owns substream i of the child stream. The sample
///   is identical whatever the rayon thread count.
pub fn run_simulation(
    config: &ModelConfig,
    rng: &mut SimRng,
    execution: Execution,
) -> SimResult<TerminalPriceSample> {
    config.validate()?;
    let steps = config.step_count()?;
    let model = models::build_model(config);

    if let ModelVariant::JumpDiffusion { jumps, .. } = &config.variant {
        let p = jumps.intensity * config.step_size;
        if p > 1.0 {
            tracing::warn!(
                jump_probability = p,
                "lambda * dt exceeds 1; every step jumps (reduce step size)"
            );
        }
    }

    let n = config.num_simulations;
    let mut stream = rng.split();
    let counters = RunCounters::new();

    tracing::info!(
        model = model.name(),
        trials = n,
        steps,
        seed = stream.seed(),
        execution = ?execution,
        "simulation starting"
    );

    let prices: Vec<f64> = match execution {
        Execution::Sequential => (0..n)
            .map(|_| run_trial(model.as_ref(), config.spot, steps, &mut stream, &counters))
            .collect(),
        Execution::Parallel => (0..n)
            .into_par_iter()
            .map(|i| {
                let mut sub = stream.substream(i as u64);
                run_trial(model.as_ref(), config.spot, steps, &mut sub, &counters)
            })
            .collect(),
    };

    tracing::info!(
        model = model.name(),
        trials = counters.trials(),
        steps_taken = counters.steps(),
        "simulation complete"
    );

    Ok(TerminalPriceSample::new(prices))
}

#[inline]
fn run_trial(
    model: &dyn StochasticStep,
    spot: f64,
    steps: usize,
    rng: &mut SimRng,
    counters: &RunCounters,
) -> f64 {
    let terminal = simulate_terminal(model, spot, steps, rng);
    let done = counters.record_trial(steps as u64);
    if done % PROGRESS_EVERY == 0 {
        tracing::debug!(trials_completed = done, "simulation progress");
    }
    terminal
}
