use clap::Args;

use crate::context::CliContext;

#[derive(Args, Debug)]
pub struct CommandsArgs {
    /// Filter commands by category
    #[arg(long)]
    pub category: Option<String>,
    /// Include deprecated commands
    #[arg(long)]
    pub include_deprecated: bool,
}

pub fn handle_command(args: CommandsArgs, context: CliContext) -> anyhow::Result<()> {
    let registry = context.registry();
    let names = registry.list_commands(args.category.as_deref(), args.include_deprecated);

    match &args.category {
        Some(category) => println!("Commands in category '{category}':"),
        None => println!("All available commands:"),
    }

    if names.is_empty() {
        println!("  No commands found");
        return Ok(());
    }

    for name in names {
        let info = registry.get_command_info(&name)?;
        println!("  {:<20} {} ({})", info.name, info.description, info.status());
        if !info.aliases.is_empty() {
            println!("  {:<20} aliases: {}", "", info.aliases.join(", "));
        }
    }
    Ok(())
}
