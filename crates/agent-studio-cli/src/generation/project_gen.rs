use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::json;

use super::FileTree;

#[derive(thiserror::Error, Debug)]
pub enum ScaffoldError {
    #[error("Directory '{0}' already exists")]
    AlreadyExists(PathBuf),
    #[error("Unknown project template '{0}'")]
    UnknownTemplate(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Materializes a new agent project under `base` and returns its path.
///
/// The target directory must not exist yet; nothing is written when it does.
pub fn scaffold_project(
    name: &str,
    base: &Path,
    template: &str,
) -> Result<PathBuf, ScaffoldError> {
    if template != "basic" {
        return Err(ScaffoldError::UnknownTemplate(template.to_string()));
    }

    let project_path = base.join(name);
    if project_path.exists() {
        return Err(ScaffoldError::AlreadyExists(project_path));
    }

    log::debug!("Scaffolding project '{name}' at {}", project_path.display());
    std::fs::create_dir_all(base)?;
    basic_project_tree(name).write_to(base)?;
    Ok(project_path)
}

fn basic_project_tree(name: &str) -> FileTree {
    FileTree::new_dir(
        name,
        vec![
            FileTree::new_file("__init__.py", ""),
            FileTree::new_file("main.py", main_template(name)),
            FileTree::new_file("README.md", readme_template(name)),
            FileTree::new_file("requirements.txt", REQUIREMENTS_TEMPLATE),
            FileTree::new_dir("agents", vec![FileTree::new_file("__init__.py", "")]),
            FileTree::new_dir("workflows", vec![FileTree::new_file("__init__.py", "")]),
            FileTree::new_dir("tests", vec![FileTree::new_file("__init__.py", "")]),
            FileTree::new_dir(
                "config",
                vec![
                    FileTree::new_file("settings.py", SETTINGS_TEMPLATE),
                    FileTree::new_file("project.json", project_config(name)),
                ],
            ),
        ],
    )
}

fn project_config(name: &str) -> String {
    let config = json!({
        "project_name": name,
        "version": "1.0.0",
        "agent_studio_version": crate::context::VERSION,
        "created_at": Utc::now().to_rfc3339(),
    });
    serde_json::to_string_pretty(&config).expect("Project config should serialize.")
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn main_template(name: &str) -> String {
    MAIN_TEMPLATE
        .replace("{ProjectName}", &capitalize(name))
        .replace("{project_name}", name)
}

fn readme_template(name: &str) -> String {
    README_TEMPLATE.replace("{project_name}", name)
}

const MAIN_TEMPLATE: &str = r#""""
{project_name} - Agent Studio Project

Main entry point for the {project_name} agent system.
"""

import asyncio
import logging

from agent_studio import BaseAgent

logger = logging.getLogger(__name__)


class {ProjectName}Agent(BaseAgent):
    """Main agent for {project_name}."""

    async def _setup_resources(self):
        logger.info("Setting up {project_name} agent resources")

    async def process_message(self, query: str, session_id: str = None, context: dict = None):
        yield {
            "success": True,
            "content": f"Hello from {project_name}! Your query: {query}",
            "metadata": {"agent": "{project_name}"},
        }


async def main():
    agent = {ProjectName}Agent(agent_id="{project_name}")

    async for result in agent.stream("Hello, Agent Studio!"):
        print(result)


if __name__ == "__main__":
    asyncio.run(main())
"#;

const SETTINGS_TEMPLATE: &str = r#""""
Project Settings

Configuration settings for the Agent Studio project.
"""

import os

# Debug mode
DEBUG = os.getenv("DEBUG", "false").lower() == "true"

# Logging configuration
LOG_LEVEL = os.getenv("LOG_LEVEL", "INFO")

# Agent configuration
AGENT_CONFIG = {
    "timeout": 30,
    "max_retries": 3,
}

# Workflow configuration
WORKFLOW_CONFIG = {
    "debug_mode": DEBUG,
}
"#;

const README_TEMPLATE: &str = r#"# {project_name}

Agent Studio project for building intelligent agent workflows.

## Quick Start

1. Install dependencies:
   ```bash
   pip install -r requirements.txt
   ```

2. Run the project:
   ```bash
   python main.py
   ```

3. Use the CLI:
   ```bash
   agent-studio run --agent {project_name}
   ```

## Project Structure

- `agents/` - Agent implementations
- `workflows/` - Workflow definitions
- `config/` - Configuration files
- `tests/` - Test cases

## Development

- Use `agent-studio commands` to see available management commands
- Enable debug mode with `--debug` flag
- Check status with `agent-studio status`
"#;

const REQUIREMENTS_TEMPLATE: &str = r#"# Agent Studio core requirements
agent-studio>=1.0.0

# CLI framework
click>=8.0.0

# Logging and utilities
pydantic>=2.0.0
python-dotenv>=1.0.0
"#;
