pub mod app_config;
pub mod cli;
pub mod cli_commands;
pub mod context;
pub mod logging;

mod commands;
mod generation;
