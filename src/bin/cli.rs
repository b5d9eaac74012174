//! lecture-watch CLI
//!
//! Meant to be invoked periodically by an external scheduler (cron).
//! Exit code 0 means normal completion, with or without new lectures;
//! exit code 1 means a fatal failure this run.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lecture_watch::{
    error::Result,
    models::{Config, MailCredentials, recipients_from_env},
    pipeline::run_pipeline,
    storage::SeenStore,
    utils::log,
};

/// lecture-watch - Lecture summary watcher
#[derive(Parser, Debug)]
#[command(
    name = "lecture-watch",
    version,
    about = "Watches course pages for new lecture summaries and emails them"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the watcher once: probe, fetch, diff, notify, persist
    Run,

    /// Validate the configuration file
    Validate,

    /// Show seen-set summary
    Info,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    log::init(if cli.verbose { "debug" } else { "info" });

    let config = Config::load_or_default(&cli.config);

    match dispatch(&cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error(&format!("Failed: {e}"));
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: &Cli, config: &Config) -> Result<()> {
    match cli.command {
        Command::Run => {
            config.validate()?;
            let credentials = MailCredentials::from_env()?;
            let recipients = recipients_from_env()?;

            let outcome = run_pipeline(config, &credentials, &recipients).await?;
            log::summary(
                "Run complete",
                &[
                    ("New lectures", outcome.new_count.to_string()),
                    ("Notified", outcome.notified.to_string()),
                    ("Persisted", outcome.persisted.to_string()),
                ],
            );
        }

        Command::Validate => {
            log::info("Validating configuration...");
            config.validate()?;
            log::success("Config OK");
            log::sub_item(&format!("Sources: {}", config.sources.len()));
            log::sub_item(&format!("State file: {}", config.paths.state_file));
            log::sub_item(&format!(
                "Mail relay: {}:{}",
                config.mail.smtp_host, config.mail.smtp_port
            ));
        }

        Command::Info => {
            let store = SeenStore::load(&config.paths.state_file, &config.sources).await?;
            log::info(&format!("Seen-set file: {}", store.path().display()));
            for source in &config.sources {
                log::sub_item(&format!(
                    "{} ({}): {} lectures seen",
                    source.name,
                    source.key,
                    store.source_count(&source.key)
                ));
            }
            log::info(&format!("Total: {} lectures", store.total_count()));
        }
    }

    Ok(())
}
