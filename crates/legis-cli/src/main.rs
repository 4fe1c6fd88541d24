//! Legis — chunk legislative text, extract facts, rebuild the document.

use std::path::Path;

use legis_core::PipelineConfig;
use legis_runtime::Pipeline;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;
mod report;

use args::{Cli, Command};

fn load_config(path: &Path) -> anyhow::Result<PipelineConfig> {
    let config = PipelineConfig::load(path)?.with_env_overrides()?;
    Ok(config)
}

/// Apply `chunk` overrides and persist them when any were given.
fn apply_chunk_overrides(
    path: &Path,
    config: PipelineConfig,
    strategy: Option<&str>,
    max_chars: Option<&str>,
) -> anyhow::Result<PipelineConfig> {
    if strategy.is_none() && max_chars.is_none() {
        return Ok(config);
    }
    let config = config.with_overrides(max_chars, strategy)?;
    config.save(path)?;
    info!("Saved chunking options to {}", path.display());
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    if cli.command == Command::Help {
        args::print_help();
        return Ok(0);
    }

    let mut config = load_config(&cli.config_path)?;
    if let Command::Chunk {
        strategy,
        max_chars,
    } = &cli.command
    {
        config = apply_chunk_overrides(
            &cli.config_path,
            config,
            strategy.as_deref(),
            max_chars.as_deref(),
        )?;
    }

    info!("Using configuration from {}", cli.config_path.display());
    let pipeline = Pipeline::new(config);

    match cli.command {
        Command::Run => {
            let outcome = pipeline.run_all(&Default::default())?;
            report::print_run_report(&outcome);
        }
        Command::Chunk { .. } => report::print_chunk_report(&pipeline.chunk()?),
        Command::Extract => report::print_extraction_report(&pipeline.extract()?),
        Command::Reconstruct(options) => {
            report::print_reconstruction_report(&pipeline.reconstruct(&options)?)
        }
        Command::Validate(policy) => {
            let outcome = pipeline.validate(&policy)?;
            report::print_validation_report(&outcome);
            if !outcome.all_passed() {
                return Ok(1);
            }
        }
        Command::Config => println!("{}", serde_json::to_string_pretty(pipeline.config())?),
        Command::Help => args::print_help(),
    }
    Ok(0)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let cli = match args::parse_args(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}. Use 'legis help' for usage.", e);
            std::process::exit(2);
        }
    };

    let code = run(cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
