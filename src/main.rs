//! langbatch CLI entrypoint
//! Loads the configuration and runs the language cache generation once.
#![deny(unsafe_code)]

use std::panic::Location;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use langbatch::GenerationError;
use langbatch::application::LanguageBatch;
use langbatch::config::{BatchConfig, resolve_config_path};
use langbatch::infrastructure::{FileSystemCacheWriter, HttpApiTransport};

#[derive(Parser, Debug)]
#[command(name = "langbatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (YAML or TOML). Defaults to $LANGBATCH_CONFIG, then ./langbatch.yml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the cache root from the configuration
    #[arg(long)]
    root: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging with default level INFO
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            failure.report();
            ExitCode::FAILURE
        }
    }
}

/// A failed run and the place it was raised
struct Failure {
    error: anyhow::Error,
    location: &'static Location<'static>,
}

impl Failure {
    /// Keeps the location a [`GenerationError`] carries, otherwise records the caller.
    /// Call it from a closure: passing `Failure::new` by path would record `map_err`.
    #[track_caller]
    fn new(error: impl Into<anyhow::Error>) -> Self {
        let caller = Location::caller();
        let error = error.into();
        let location = error
            .downcast_ref::<GenerationError>()
            .map_or(caller, GenerationError::location);
        Self { error, location }
    }

    fn lines(&self) -> [String; 3] {
        [
            format!("Error: {:#}", self.error),
            format!("File: {}", self.location.file()),
            format!("Line: {}", self.location.line()),
        ]
    }

    /// Print the failure the way operators expect: message, then where it was raised
    fn report(&self) {
        for line in self.lines() {
            println!("{line}");
        }
    }
}

async fn run(cli: Cli) -> Result<(), Failure> {
    let config_path = resolve_config_path(cli.config.as_deref());
    let mut config = BatchConfig::load(&config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))
        .map_err(|e| Failure::new(e))?;
    if let Some(root) = cli.root {
        config.system.paths.root = root;
    }

    let transport = HttpApiTransport::new(&config.api)
        .context("Failed to set up the language API client")
        .map_err(|e| Failure::new(e))?;
    let batch = LanguageBatch::new(
        config.system,
        Arc::new(transport),
        Arc::new(FileSystemCacheWriter::new()),
    );

    let report = batch.run().await.map_err(|e| Failure::new(e))?;
    info!(
        "Cached {} language files and {} applet language XMLs",
        report.language_files.len(),
        report.applet_files.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use langbatch::GenerationErrorKind;

    #[test]
    fn test_setup_failure_records_caller() {
        let line = line!() + 1;
        let failure = Failure::new(anyhow::anyhow!("config missing"));

        let [error, file, at] = failure.lines();
        assert_eq!(error, "Error: config missing");
        assert_eq!(file, format!("File: {}", file!()));
        assert_eq!(at, format!("Line: {line}"));
    }

    #[test]
    fn test_generation_failure_keeps_its_own_location() {
        let generation = GenerationError::new(GenerationErrorKind::NoAppletLanguages {
            applet: "JSM2_MemberApplet".to_string(),
        });
        let raised_at = generation.location();

        let failure = Failure::new(generation);

        assert_eq!(failure.location, raised_at);
        assert!(failure.lines()[0].contains("JSM2_MemberApplet"));
    }
}
