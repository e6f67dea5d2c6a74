//! Zenta - mindfulness for terminal users
//!
//! A calm breathing and reflection tool for the terminal:
//! - `now`: a guided breathing animation
//! - `anchor`: breathing paced by the space bar
//! - `reflect`: a gentle end-of-day reflection

use std::io;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::debug;

use zenta::breathing::{install_signal_watcher, BreathingSession, SessionError};
use zenta::cli::{BuildInfo, Cli, Commands, Display};
use zenta::quotes::QuoteService;
use zenta::reflection::{PromptSet, ReflectionPacing};
use zenta::types::SessionConfig;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Restore the terminal and exit on SIGINT/SIGTERM/SIGHUP until the command ends
    install_signal_watcher();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{e:#}"));
        if let Some(session_error) = e.downcast_ref::<SessionError>() {
            Display::show_hint(session_error.suggestion());
        }
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
        log_build_info(&BuildInfo::current())?;
    }

    match cli.command {
        Some(Commands::Now(args)) => run_now(args.to_config()).await?,
        Some(Commands::Anchor(args)) => run_anchor(args.to_config()).await?,
        Some(Commands::Reflect) => {
            PromptSet::default()
                .run(&mut io::stdout(), &ReflectionPacing::default())
                .await
                .context("failed to write the reflection")?;
        }
        Some(Commands::Version) => {
            Display::show_version(&BuildInfo::current());
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Plays the fixed breathing timeline, then a quote or the closing line.
async fn run_now(config: SessionConfig) -> Result<()> {
    log_config(&config)?;
    let session = BreathingSession::new(config)?;
    let summary = session.start().await;
    debug!(frames = summary.frames, pauses = summary.pauses, "now finished");

    if session.should_show_quote() {
        Display::show_quote(QuoteService::new().random_quote()).await;
    } else {
        Display::show_calm_closing();
    }
    Display::show_bottom_padding();
    Ok(())
}

/// Runs the user-paced anchor mode, then a quote unless silenced.
async fn run_anchor(config: SessionConfig) -> Result<()> {
    log_config(&config)?;
    let session = BreathingSession::new(config)?;
    let exit = session.start_anchor().await?;
    debug!(?exit, "anchor finished");

    if session.should_show_quote() {
        Display::show_quote(QuoteService::new().random_quote()).await;
    }
    Ok(())
}

fn log_config(config: &SessionConfig) -> Result<()> {
    let json = serde_json::to_string(config).context("failed to serialize session config")?;
    debug!(config = %json, "session config");
    Ok(())
}

fn log_build_info(info: &BuildInfo) -> Result<()> {
    let json = serde_json::to_string(info).context("failed to serialize build info")?;
    debug!(build = %json, "build info");
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["zenta"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_now() {
        let cli = Cli::parse_from(["zenta", "now"]);
        assert!(matches!(cli.command, Some(Commands::Now(_))));
    }

    #[test]
    fn test_cli_parse_now_with_options() {
        let cli = Cli::parse_from(["zenta", "now", "--quick", "--silent"]);
        match cli.command {
            Some(Commands::Now(args)) => {
                let config = args.to_config();
                assert_eq!(config.cycles, 1);
                assert!(!config.show_quote);
            }
            _ => panic!("Expected Now command"),
        }
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["zenta", "--verbose", "reflect"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_log_config_serializes() {
        assert!(log_config(&SessionConfig::default()).is_ok());
    }

    #[test]
    fn test_log_build_info_serializes() {
        assert!(log_build_info(&BuildInfo::current()).is_ok());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
