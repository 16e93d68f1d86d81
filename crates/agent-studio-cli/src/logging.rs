#![allow(dead_code)]

use colored::{Colorize, CustomColor};

pub const STUDIO_BLUE: CustomColor = CustomColor {
    r: 82,
    g: 128,
    b: 250,
};

/// Initializes the `log` backend. User-facing output goes through the
/// `print_*` macros below; `log` records are developer diagnostics.
pub fn init_logging(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}

pub fn print_err(err_message: &str) {
    eprintln!(
        "[{}] {}: {}",
        "agent-studio".custom_color(STUDIO_BLUE),
        "error".red().bold(),
        err_message
    );
}

#[macro_export]
macro_rules! print_err {
    ($($arg:tt)*) => {
        $crate::logging::print_err(&format!($($arg)*));
    };
}

pub fn print_warn(warn_message: &str) {
    println!(
        "[{}] {}: {}",
        "agent-studio".custom_color(STUDIO_BLUE),
        "warning".yellow().bold(),
        warn_message
    );
}

#[macro_export]
macro_rules! print_warn {
    ($($arg:tt)*) => {
        $crate::logging::print_warn(&format!($($arg)*));
    };
}

pub fn print_info(info_message: &str) {
    println!(
        "[{}] {}: {}",
        "agent-studio".custom_color(STUDIO_BLUE),
        "info".cyan().bold(),
        info_message
    );
}

#[macro_export]
macro_rules! print_info {
    ($($arg:tt)*) => {
        $crate::logging::print_info(&format!($($arg)*));
    };
}

pub fn print_success(success_message: &str) {
    println!(
        "[{}] {}: {}",
        "agent-studio".custom_color(STUDIO_BLUE),
        "success".green().bold(),
        success_message
    );
}

#[macro_export]
macro_rules! print_success {
    ($($arg:tt)*) => {
        $crate::logging::print_success(&format!($($arg)*));
    };
}
