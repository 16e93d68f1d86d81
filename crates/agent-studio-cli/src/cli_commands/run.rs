use clap::Args;

use crate::context::CliContext;
use crate::{print_info, print_success};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Specific agent to run
    #[arg(long)]
    pub agent: Option<String>,
    /// Specific workflow to execute
    #[arg(long)]
    pub workflow: Option<String>,
}

pub fn handle_command(args: RunArgs, _context: CliContext) -> anyhow::Result<()> {
    print_info!("Starting Agent Studio...");

    if let Some(agent) = &args.agent {
        print_info!("Running agent: {agent}");
    } else if let Some(workflow) = &args.workflow {
        print_info!("Executing workflow: {workflow}");
    } else {
        print_info!("Starting interactive mode...");
    }

    print_success!("Execution completed");
    Ok(())
}
