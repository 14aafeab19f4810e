mod config;
mod render;
mod session;

use std::{process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{CubeController, HttpSolverTransport, SolveOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{load_settings, ResolvedSettings};

#[derive(Parser, Debug)]
#[command(name = "cube-cli", about = "Validate and solve cube strings with a remote solver")]
struct Cli {
    /// Solver endpoint; overrides settings file and environment.
    #[arg(long, global = true)]
    solver_url: Option<String>,
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a 54-character cube string and print it as a net.
    Validate { cube: String },
    /// Solve a cube string (the default cube when omitted).
    Solve { cube: Option<String> },
    /// Edit and solve from a line-based prompt.
    Interactive,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn settings_for(cli: &Cli) -> Result<ResolvedSettings> {
    let mut settings = load_settings();
    if let Some(url) = &cli.solver_url {
        settings.solver_url = url.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        settings.request_timeout_ms = timeout_ms;
    }
    settings.resolve().context("invalid cube-cli settings")
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let settings = settings_for(&cli)?;
    info!(solver_url = %settings.solver_url, "using solver");

    let transport = HttpSolverTransport::with_client(reqwest_client()?, settings.solver_url);
    let controller = CubeController::with_request_timeout(
        transport,
        settings.default_cube,
        settings.request_timeout,
    );

    match cli.command {
        Command::Validate { cube } => match controller.validate(&cube).await {
            Ok(cube) => {
                print!("{}", render::cube_net(&cube));
                if cube.is_solved() {
                    println!("(solved)");
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("{err}");
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Solve { cube } => {
            if let Err(err) = controller.validate(cube.as_deref().unwrap_or_default()).await {
                eprintln!("{err}");
                return Ok(ExitCode::FAILURE);
            }
            let Some(handle) = controller.solve().await else {
                return Ok(ExitCode::FAILURE);
            };
            match handle.settled().await {
                Some(SolveOutcome::Solved(solved)) => {
                    let snapshot = controller.snapshot().await;
                    print!(
                        "{}",
                        render::solve_result(snapshot.prior_cube.as_ref(), &solved.result)
                    );
                    print!("{}", render::cube_net(&solved.cube));
                    Ok(ExitCode::SUCCESS)
                }
                Some(outcome) => {
                    eprintln!("{}", outcome.alert_message().unwrap_or_default());
                    Ok(ExitCode::FAILURE)
                }
                None => Ok(ExitCode::FAILURE),
            }
        }
        Command::Interactive => {
            session::run(controller).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn reqwest_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .build()
        .context("failed to build HTTP client")
}
