use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auto_pr::agent::{run_once, RunRequest};
use auto_pr::config::AppConfig;

#[derive(Parser)]
#[command(
    name = "auto-pr",
    about = "Open a pull request from the current CI branch, once"
)]
struct Cli {
    /// Branch the pull request should merge into
    target_branch: String,

    /// Text placed after "[Automated]" in the title
    title_prefix: String,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Probe only; report what would be created
    #[arg(long)]
    dry_run: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Wrong argument count exits 2 here
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::load(cli.config.as_deref())?;

    let request = RunRequest {
        target_branch: cli.target_branch.clone(),
        title_prefix: cli.title_prefix.clone(),
        dry_run: cli.dry_run,
    };

    println!(
        "Ensuring pull request {} -> {} in {}",
        config.pipeline.branch, request.target_branch, config.pipeline.repository
    );

    let outcome = run_once(&config, &request).await?;
    println!("{}", outcome.summary());

    Ok(ExitCode::from(outcome.exit_code()))
}
