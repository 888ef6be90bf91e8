//! relock - pnpm lock file regeneration CLI tool
//!
//! Regenerates `pnpm-lock.yaml` for a project directory, optionally applying
//! upgrades or a full lock file maintenance first.

use clap::Parser;
use relock::cli::CliArgs;
use relock::config::load_config;
use relock::domain::{GenerateLockFileResult, Upgrade};
use relock::error::AppError;
use relock::exec::{Env, SystemCommandRunner};
use relock::fs::TokioFs;
use relock::generator::LockFileGenerator;
use relock::manifest::lock_file_path;
use relock::output::{create_formatter, OutputConfig, RunReport};
use relock::progress::Progress;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code for failures the caller should retry (EX_TEMPFAIL)
const EXIT_TEMPORARY: u8 = 75;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "relock=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if !args.path.is_dir() {
        anyhow::bail!("{} is not a directory", args.path.display());
    }

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    let upgrades = args.upgrades();

    let mut progress = Progress::new(!args.quiet && !args.json);
    progress.spinner("Regenerating pnpm-lock.yaml");
    let outcome = generate(&args, &upgrades).await;
    progress.finish_and_clear();

    let result = match outcome {
        Ok(result) => result,
        Err(AppError::Temporary(e)) => {
            tracing::debug!("temporary failure: {}", e.reason);
            eprintln!("{}", e);
            return Ok(ExitCode::from(EXIT_TEMPORARY));
        }
        Err(e) => return Err(e.into()),
    };

    let lock_file = lock_file_path(&args.path);
    let report = RunReport {
        lock_file: &lock_file,
        upgrades: &upgrades,
        result: &result,
    };

    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    if result.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Load configuration and regenerate the lock file
async fn generate(
    args: &CliArgs,
    upgrades: &[Upgrade],
) -> Result<GenerateLockFileResult, AppError> {
    let project_dir: &Path = &args.path;
    let config = args.apply_to(load_config(args.config.as_deref(), project_dir)?);
    tracing::debug!("configuration: {:?}", config);

    let env: Env = std::env::vars().collect();
    let runner = SystemCommandRunner::new(env.clone());
    let fs = TokioFs::new();

    let result = LockFileGenerator::new(&fs, &runner)
        .generate_lock_file(project_dir, &env, &config, upgrades)
        .await?;
    Ok(result)
}
