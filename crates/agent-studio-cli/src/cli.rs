use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::app_config::{AppConfig, AppSettings};
use crate::cli_commands;
use crate::context::CliContext;
use crate::{print_err, print_warn};

#[derive(Parser, Debug)]
#[clap(name = "agent-studio", version, about = "Agent Studio - a framework for building agent-based workflows", long_about = None)]
pub struct CliArgs {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
    /// Settings file path override
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Agent Studio project.
    Init(cli_commands::init::InitArgs),
    /// Run Agent Studio workflows or agents.
    Run(cli_commands::run::RunArgs),
    /// Show Agent Studio status and configuration.
    Status,
    /// List all available management commands.
    Commands(cli_commands::commands::CommandsArgs),
    /// Execute a management command.
    Manage(cli_commands::manage::ManageArgs),
    /// Show command execution history.
    History(cli_commands::history::HistoryArgs),
}

pub fn cli_main() -> ExitCode {
    let args = CliArgs::parse();

    let settings = load_settings(args.config.as_deref());
    let filter = if args.debug || settings.debug_mode {
        "debug"
    } else {
        settings.log_level.as_str()
    };
    crate::logging::init_logging(filter);

    let context = match CliContext::new(settings).init() {
        Ok(context) => context,
        Err(e) => {
            print_err!("Failed to initialize the command registry: {e}");
            return ExitCode::FAILURE;
        }
    };

    match handle_command(args.command, context) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_err!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_command(command: Commands, context: CliContext) -> anyhow::Result<()> {
    match command {
        Commands::Init(args) => cli_commands::init::handle_command(args, context),
        Commands::Run(args) => cli_commands::run::handle_command(args, context),
        Commands::Status => cli_commands::status::handle_command(context),
        Commands::Commands(args) => cli_commands::commands::handle_command(args, context),
        Commands::Manage(args) => cli_commands::manage::handle_command(args, context),
        Commands::History(args) => cli_commands::history::handle_command(args, context),
    }
}

/// Settings load failures fall back to defaults so the CLI stays usable
/// with a broken or missing settings file. A fresh install writes the
/// defaults out so the file exists for editing.
fn load_settings(path: Option<&Path>) -> AppSettings {
    let loaded = match path {
        Some(path) => AppSettings::load_from(path).map(|settings| (settings, None)),
        None => AppConfig::new()
            .and_then(|config| config.load_settings().map(|settings| (settings, Some(config)))),
    };

    match loaded {
        Ok((Some(settings), _)) => settings,
        Ok((None, config)) => {
            let settings = AppSettings::default();
            if let Some(config) = config {
                if let Err(e) = config.save_settings(&settings) {
                    log::debug!("Could not write default settings: {e}");
                }
            }
            settings
        }
        Err(e) => {
            print_warn!("Failed to load settings, using defaults: {e}");
            AppSettings::default()
        }
    }
}
