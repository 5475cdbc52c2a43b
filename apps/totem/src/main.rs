mod output;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use totem::{Analyzer, ChartPositions, ScoringTables};
use totem_config::TotemSettings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank animal totems for a birth chart")]
pub(crate) struct Args {
    /// Chart positions JSON: planet -> sign name or ecliptic longitude.
    #[arg(long)]
    chart: PathBuf,

    /// Settings file (default: $TOTEM_CONFIG or configs/totem.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Affinity table override.
    #[arg(long)]
    affinity: Option<PathBuf>,

    /// Planet weight table override.
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Sign multiplier table override.
    #[arg(long)]
    multipliers: Option<PathBuf>,

    /// Output directory override.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Also print the combined result to stdout.
    #[arg(long, default_value_t = false)]
    print_json: bool,
}

/// Settings from the file (when one can be found) with CLI overrides on top.
fn resolve_settings(args: &Args) -> anyhow::Result<TotemSettings> {
    let from_file = match &args.config {
        Some(path) => Some(totem_config::load_settings_from(path)?),
        None if args.affinity.is_some() && args.weights.is_some() => None,
        None => Some(totem_config::load_settings()?),
    };

    let pick = |cli: &Option<PathBuf>, file: Option<&PathBuf>, what: &str| {
        cli.clone()
            .or_else(|| file.cloned())
            .ok_or_else(|| anyhow::anyhow!("No {what} given (use --{what} or a settings file)"))
    };
    let settings = TotemSettings {
        affinity_path: pick(&args.affinity, from_file.as_ref().map(|s| &s.affinity_path), "affinity")?,
        weights_path: pick(&args.weights, from_file.as_ref().map(|s| &s.weights_path), "weights")?,
        multipliers_path: args
            .multipliers
            .clone()
            .or_else(|| from_file.as_ref().and_then(|s| s.multipliers_path.clone())),
        output_dir: args
            .out_dir
            .clone()
            .or_else(|| from_file.as_ref().map(|s| s.output_dir.clone()))
            .unwrap_or_else(|| PathBuf::from("outputs")),
    };
    totem_config::validate_table_paths(&settings)?;
    Ok(settings)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let settings = resolve_settings(args)?;
    log::info!(
        "Tables: affinity={} weights={} multipliers={}",
        settings.affinity_path.display(),
        settings.weights_path.display(),
        settings
            .multipliers_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    );

    let tables = ScoringTables::from_paths(
        &settings.affinity_path,
        &settings.weights_path,
        settings.multipliers_path.as_deref(),
    )
    .context("Failed to load scoring tables")?;

    let chart_text = std::fs::read_to_string(&args.chart)
        .with_context(|| format!("Failed to read chart {}", args.chart.display()))?;
    let chart = ChartPositions::from_json(&chart_text)
        .with_context(|| format!("Invalid chart positions in {}", args.chart.display()))?;

    let started = Instant::now();
    let report = Analyzer::new(Arc::new(tables)).analyze(&chart)?;
    log::info!("Analysis finished in {:?}", started.elapsed());

    let written = output::write_outputs(&settings.output_dir, &report)?;
    for path in &written {
        log::info!("Wrote {}", path.display());
    }

    if args.print_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    println!("Top {} animals:", report.top().len());
    for (i, ranked) in report.top().iter().enumerate() {
        println!("{}. {}: {:.1}", i + 1, ranked.animal, ranked.total.to_f64());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run(&args)
}
