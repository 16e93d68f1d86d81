use std::path::PathBuf;

use clap::Args;

use crate::context::CliContext;
use crate::generation::scaffold_project;
use crate::{print_info, print_success};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the project to create
    pub project_name: String,
    /// Directory to create the project in (defaults to the configured project path)
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Project template to use
    #[arg(long, default_value = "basic")]
    pub template: String,
}

pub fn handle_command(args: InitArgs, context: CliContext) -> anyhow::Result<()> {
    let base = args
        .path
        .unwrap_or_else(|| context.settings().default_project_path.clone());
    let project_path = scaffold_project(&args.project_name, &base, &args.template)?;

    print_success!(
        "Project '{}' initialized successfully in {}",
        args.project_name,
        project_path.display()
    );
    print_info!("Project structure created with template: {}", args.template);
    print_info!("Next steps:");
    print_info!("  cd {}", project_path.display());
    print_info!("  pip install -r requirements.txt");
    print_info!("  agent-studio run");
    Ok(())
}
