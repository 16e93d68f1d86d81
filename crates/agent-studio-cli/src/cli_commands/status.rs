use crate::context::{CliContext, VERSION};

pub fn handle_command(context: CliContext) -> anyhow::Result<()> {
    let registry = context.registry();
    let stats = registry.get_registry_stats();

    println!("Agent Studio Status");
    println!("==================");
    println!("Version: {VERSION}");
    println!("Registry stats: {}", serde_json::to_string_pretty(&stats)?);
    println!(
        "Available categories: {}",
        registry.list_categories().join(", ")
    );
    Ok(())
}
