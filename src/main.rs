use std::path::{Path, PathBuf};

use stablefluid::{ImageExporter, Scenario};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let scenario = match args.get(1).map(String::as_str) {
        Some("--print-default") => {
            println!("{}", Scenario::default().to_json()?);
            return Ok(());
        }
        Some(path) => Scenario::load(Path::new(path))?,
        None => Scenario::default(),
    };
    let output_dir = args.get(2).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("frames"));

    run_headless(&scenario, &output_dir)
}

fn run_headless(scenario: &Scenario, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if scenario.export_every > 0 {
        std::fs::create_dir_all(output_dir)?;
    }

    let side = 512;
    let exporter = ImageExporter::new(side, side);

    let outcome = scenario.run(|solver, metrics| {
        if scenario.export_every > 0 && metrics.frame % scenario.export_every == 0 {
            metrics.log_summary();
            exporter.export_frame(solver, output_dir, "fluid", metrics.frame)?;
        }
        Ok(())
    })?;

    if let Some(last) = outcome.recorder.metrics_history.last() {
        last.log_summary();
    }
    log::info!("finished {} steps", scenario.steps);
    Ok(())
}
