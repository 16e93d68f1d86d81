use std::path::{Path, PathBuf};

use agent_studio_core::{CommandRegistry, CommandResult, CommandSpec, RegistryError};
use anyhow::Context as _;
use serde_json::json;
use walkdir::WalkDir;

use crate::generation::scaffold_project;

const PROJECT_DIRS: [&str; 4] = ["agents", "workflows", "config", "tests"];

/// Installs the built-in project management commands. Called once at
/// startup, before any dispatch.
pub fn register_builtin_commands(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register(
        CommandSpec::new("init")
            .category("project")
            .description("Initialize a new Agent Studio project")
            .alias("new"),
        |args| {
            let name = args
                .first()
                .map(String::as_str)
                .unwrap_or("my_agent_project");
            let base = args
                .get(1)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            init_project(name, &base)
        },
    )?;
    registry.register(
        CommandSpec::new("status")
            .category("project")
            .description("Show project status and information")
            .alias("st"),
        |_args| project_status(&current_dir()?),
    )?;
    registry.register(
        CommandSpec::new("validate")
            .category("project")
            .description("Validate project structure and configuration"),
        |_args| validate_project(&current_dir()?),
    )?;
    registry.register(
        CommandSpec::new("clean")
            .category("project")
            .description("Clean project temporary files and caches"),
        |_args| clean_project(&current_dir()?),
    )?;
    Ok(())
}

fn current_dir() -> anyhow::Result<PathBuf> {
    std::env::current_dir().context("Failed to resolve the current directory")
}

fn init_project(name: &str, base: &Path) -> CommandResult {
    let project_path = scaffold_project(name, base, "basic")?;
    Ok(json!({
        "status": "success",
        "project_name": name,
        "path": project_path.display().to_string(),
    }))
}

fn project_status(base: &Path) -> CommandResult {
    let config_file = base.join("config").join("project.json");
    if !config_file.exists() {
        anyhow::bail!(
            "No Agent Studio project found in {}. Use 'manage init <project_name>' to create one.",
            base.display()
        );
    }

    let contents = std::fs::read_to_string(&config_file)
        .with_context(|| format!("Failed to read {}", config_file.display()))?;
    let config: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid project config at {}", config_file.display()))?;

    let missing_dirs: Vec<&str> = PROJECT_DIRS
        .iter()
        .filter(|dir| !base.join(dir).is_dir())
        .copied()
        .collect();

    Ok(json!({
        "status": "success",
        "config": config,
        "missing_dirs": missing_dirs,
    }))
}

fn validate_project(base: &Path) -> CommandResult {
    let mut issues = Vec::new();

    for dir in PROJECT_DIRS {
        if !base.join(dir).is_dir() {
            issues.push(format!("Missing directory: {dir}"));
        }
    }

    let config_file = base.join("config").join("project.json");
    if !config_file.exists() {
        issues.push("Missing project configuration file: config/project.json".to_string());
    } else {
        match std::fs::read_to_string(&config_file)
            .map_err(anyhow::Error::from)
            .and_then(|contents| {
                serde_json::from_str::<serde_json::Value>(&contents).map_err(Into::into)
            }) {
            Ok(config) => {
                for field in ["project_name", "version", "agent_studio_version"] {
                    if config.get(field).is_none() {
                        issues.push(format!("Missing configuration field: {field}"));
                    }
                }
            }
            Err(e) => issues.push(format!("Invalid configuration file: {e}")),
        }
    }

    for init_file in [
        "__init__.py",
        "agents/__init__.py",
        "workflows/__init__.py",
        "tests/__init__.py",
    ] {
        if !base.join(init_file).is_file() {
            issues.push(format!("Missing {init_file}"));
        }
    }

    let status = if issues.is_empty() { "success" } else { "failed" };
    Ok(json!({ "status": status, "issues": issues }))
}

fn clean_project(base: &Path) -> CommandResult {
    let mut targets: Vec<(PathBuf, bool)> = Vec::new();

    for entry in WalkDir::new(base).into_iter().filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir() && (name == "__pycache__" || name == ".pytest_cache") {
            targets.push((entry.into_path(), true));
        } else if entry.file_type().is_file() && (name.ends_with(".pyc") || name.ends_with(".pyo"))
        {
            targets.push((entry.into_path(), false));
        }
    }

    let mut cleaned_items = Vec::new();
    for (path, is_dir) in targets {
        let result = if is_dir {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        match result {
            Ok(()) => cleaned_items.push(path.display().to_string()),
            // Already gone when its parent cache directory was removed first.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not clean {}: {e}", path.display()),
        }
    }

    Ok(json!({
        "status": "success",
        "cleaned_count": cleaned_items.len(),
        "cleaned_items": cleaned_items,
    }))
}
