use clap::Args;
use colored::Colorize;

use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Number of history entries to show
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

pub fn handle_command(args: HistoryArgs, context: CliContext) -> anyhow::Result<()> {
    let records = context.registry().get_execution_history(Some(args.limit));

    if records.is_empty() {
        println!("No command execution history found");
        return Ok(());
    }

    println!("Recent Command Executions");
    println!("========================");
    for record in records {
        let marker = if record.success {
            "ok".green()
        } else {
            "failed".red()
        };
        println!(
            "[{marker}] {} - {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.command
        );
        if let Some(error) = &record.error {
            println!("    Error: {error}");
        }
    }
    Ok(())
}
