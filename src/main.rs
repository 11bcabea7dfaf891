mod agent;
mod cli;
mod config;
mod download;
mod install;
mod migrate;
mod path_env;
mod platform;
mod preflight;
mod prompt;
mod release;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::InstallConfig;
use console::style;
use platform::Arch;
use preflight::Preflight;
use prompt::{Answer, Confirm, TerminalPrompt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(&cli);

    if let Err(e) = run(&cli).await {
        eprintln!("{} {:?}", style("error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = InstallConfig::resolve()?;
    let arch = Arch::detect();

    let prompt: Box<dyn Confirm> = if cli.yes {
        Box::new(Answer(true))
    } else {
        Box::new(TerminalPrompt)
    };

    if preflight::run(&config, prompt.as_ref())? == Preflight::Cancelled {
        return Ok(());
    }

    migrate::migrate_legacy_install(&config);

    let version = release::resolve_latest_version(&config.release_api).await?;

    let artifact_name = download::artifact_file_name(&version, arch);
    let url = download::build_artifact_url(&config.artifact_base, &version, arch);
    let archive_path = download::download_with_retries(&config, &url, &artifact_name).await?;

    install::install_artifact(&config, &archive_path, &artifact_name)?;

    path_env::update_path(&config, !cli.no_modify_path);

    println!(
        "{} lode {} installed to {}",
        style("✓").green(),
        version,
        config.install_dir.display()
    );
    println!(
        "Open a new shell, or run `. \"{}\"` to use it right away.",
        config.env_script_path().display()
    );

    if !cli.no_agent {
        agent::offer_agent_install(&config, prompt.as_ref()).await;
    }

    Ok(())
}

fn setup_logging(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.quiet {
        "error"
    } else if cli.verbose == 0 {
        "warn"
    } else if cli.verbose == 1 {
        "info"
    } else {
        "debug"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();
}
