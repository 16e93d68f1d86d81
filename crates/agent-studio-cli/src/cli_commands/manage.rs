use anyhow::Context as _;
use clap::Args;

use crate::context::CliContext;
use crate::print_success;

#[derive(Args, Debug)]
pub struct ManageArgs {
    /// Management command name or alias
    pub command: String,
    /// Arguments forwarded to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

pub fn handle_command(args: ManageArgs, mut context: CliContext) -> anyhow::Result<()> {
    if !context.registry().has_command(&args.command) {
        // One message only; cli_main prints whatever is bailed here.
        anyhow::bail!(
            "Unknown command '{}'. Available commands: {}",
            args.command,
            context.registry().list_commands(None, false).join(", ")
        );
    }

    let value = context
        .registry_mut()
        .execute_command(&args.command, &args.args)
        .with_context(|| format!("Error executing command '{}'", args.command))?;

    print_success!("Command '{}' executed successfully", args.command);
    if !value.is_null() {
        println!("Result: {}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
