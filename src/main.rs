use convertible_mc::config::{self, ReportFormat};
use convertible_mc::errors::SimResult;
use convertible_mc::outcome;
use convertible_mc::report::{self, DistributionData, JsonRun};
use convertible_mc::rng::SimRng;
use convertible_mc::simulation;
use convertible_mc::state::RunSummary;

fn main() {
    // Structured logging to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("convertible_mc starting");

    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cfg) {
        tracing::error!(error = %e, "run failed");
        std::process::exit(1);
    }
}

fn run(cfg: &config::AppConfig) -> SimResult<()> {
    let runs = cfg.runs();

    // Validate everything up front: a bad config must not produce partial output
    for model in &runs {
        model.validate()?;
    }

    let mut rng = match cfg.seed {
        Some(seed) => SimRng::from_seed(seed),
        None => SimRng::from_entropy(),
    };
    let master_seed = rng.seed();
    let run_id = uuid::Uuid::new_v4();

    tracing::info!(
        run_id = %run_id,
        seed = master_seed,
        models = runs.len(),
        "configuration loaded"
    );

    let mut results: Vec<(RunSummary, DistributionData)> = Vec::with_capacity(runs.len());

    for model in &runs {
        let sample = simulation::run_simulation(model, &mut rng, cfg.execution)?;
        let report = outcome::aggregate(&sample, model.conversion_price, &model.bond)?;

        tracing::info!(
            run_id = %run_id,
            model = model.variant.name(),
            conversion_probability = report.conversion_probability,
            ci_low = report.confidence_interval.low,
            ci_high = report.confidence_interval.high,
            "outcome aggregated"
        );

        let distribution =
            DistributionData::from_sample(&sample, cfg.histogram_bins, model.conversion_price);

        let summary = RunSummary {
            run_id,
            generated_at: chrono::Utc::now().to_rfc3339(),
            model: model.variant.name(),
            variant: model.variant,
            seed: master_seed,
            conversion_price: model.conversion_price,
            report,
        };
        results.push((summary, distribution));
    }

    match cfg.report_format {
        ReportFormat::Text => {
            for (summary, _) in &results {
                println!("{}", report::render_text(summary));
            }
        }
        ReportFormat::Json => {
            let docs: Vec<JsonRun<'_>> = results
                .iter()
                .map(|(summary, distribution)| JsonRun { summary, distribution })
                .collect();
            println!("{}", report::render_json(&docs)?);
        }
    }

    Ok(())
}
