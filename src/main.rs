use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use debwatch::config::DEFAULT_CONFIG_PATH;
use debwatch::run::{RunOptions, run};

#[derive(Parser)]
#[command(name = "debwatch")]
#[command(version, about = "Report Debian packages that moved past a recorded version")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config_path: PathBuf,

    /// Save raised watermarks back to the configuration file
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    update_config: bool,

    /// Print the report to stdout instead of sending email
    #[arg(long)]
    dry_run: bool,
}

fn init_logging() -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("debwatch=info"),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let options = RunOptions {
        config_path: cli.config_path,
        update_config: cli.update_config,
        dry_run: cli.dry_run,
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(&options))?;

    Ok(())
}
