use clap::Parser;
use key_tester::cli::{Cli, ConsoleProgress, OutputFormatter};
use key_tester::core::config::Config;
use key_tester::core::{KeySource, KeyTesterError, RunSummary, TesterSettings};
use key_tester::engine::BatchRunner;
use key_tester::sources::{self, FileKeySource, RemoteKeySource};
use key_tester::validators::GptLoadTester;
use key_tester::reporters;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "key_test_results.log";

#[tokio::main]
async fn main() {
    // Load .env file if it exists
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    init_logging(cli.verbose);

    OutputFormatter::print_banner();

    if let Err(e) = run(cli).await {
        OutputFormatter::print_error(&format!("Error: {}", e));
        std::process::exit(1);
    }
}

/// Console output plus a persistent plain-text log file
fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let file_layer = match fs::OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        Ok(file) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Arc::new(file)),
        ),
        Err(_) => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(file_layer)
        .init();
}

fn load_config() -> key_tester::Result<Config> {
    let config_paths = vec!["config/default.toml", "default.toml", ".key_tester.toml"];

    for path in config_paths {
        if Path::new(path).exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!("Failed to parse config from {}: {}", path, e);
                    }
                },
                Err(e) => {
                    warn!("Failed to read config from {}: {}", path, e);
                }
            }
        }
    }

    Ok(Config::default())
}

async fn run(cli: Cli) -> key_tester::Result<()> {
    let config = load_config()?;

    let base_url = config.resolve_base_url(cli.url).ok_or_else(|| {
        KeyTesterError::Config(
            "no gateway URL: pass --url or set [gateway] base_url".to_string(),
        )
    })?;

    let auth_key = config
        .resolve_auth_key(cli.auth_key, std::env::var("GPT_LOAD_AUTH_KEY").ok())
        .ok_or_else(|| {
            KeyTesterError::Config(
                "no auth key: pass --auth-key or set GPT_LOAD_AUTH_KEY".to_string(),
            )
        })?;

    let max_concurrent = match cli.concurrent {
        Some(0) => {
            return Err(KeyTesterError::Config(
                "--concurrent must be at least 1".to_string(),
            ))
        }
        Some(n) => n,
        None => config.runner.max_concurrent.max(1),
    };

    let settings = TesterSettings::new(
        &base_url,
        auth_key,
        max_concurrent,
        Duration::from_secs(config.runner.request_timeout_secs),
    );

    // Fail fast on an unknown format before any network work
    let exporter = reporters::get_exporter(&cli.format)
        .ok_or_else(|| KeyTesterError::Config(format!("Unknown format: {}", cli.format)))?;

    let source: Box<dyn KeySource> = match cli.keys_file {
        Some(path) => Box::new(FileKeySource::new(path)),
        None => Box::new(RemoteKeySource::new(&settings)),
    };

    info!("Loading keys from {} source", source.name());
    let keys = sources::load_keys(source.as_ref()).await?;

    let progress = Arc::new(ConsoleProgress::new(keys.len() as u64));
    let tester = Arc::new(GptLoadTester::new(&settings));
    let runner = BatchRunner::new(tester, settings.max_concurrent, progress.clone());

    let started = Instant::now();
    let results = runner.run(keys).await;
    progress.finish();
    let elapsed = started.elapsed();

    let summary = RunSummary::from_results(&results);

    let output_path = cli
        .output
        .unwrap_or_else(|| reporters::default_filename(exporter.extension()));
    if let Err(e) = reporters::export(&results, Path::new(&output_path), exporter.as_ref()) {
        // Results stay valid in memory; surface the count alongside the failure
        error!("Export failed with {} results unwritten: {}", results.len(), e);
        OutputFormatter::print_summary(&summary);
        return Err(e);
    }

    info!("Results saved to {}", output_path);
    log_summary(&summary);
    info!("Total time: {:.2} seconds", elapsed.as_secs_f64());

    OutputFormatter::print_summary(&summary);
    OutputFormatter::print_success(&format!("Results saved to {}", output_path));

    Ok(())
}

/// Mirror the digest into the persistent log
fn log_summary(summary: &RunSummary) {
    info!("Total keys: {}", summary.total);
    info!(
        "Valid keys: {} ({:.1}%)",
        summary.valid, summary.valid_percentage
    );
    info!(
        "Invalid keys: {} ({:.1}%)",
        summary.invalid, summary.invalid_percentage
    );
    if let Some(avg) = summary.avg_response_time_ms {
        info!("Average response time: {:.2} ms", avg);
    }
}
