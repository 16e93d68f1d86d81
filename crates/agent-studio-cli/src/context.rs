use agent_studio_core::CommandRegistry;

use crate::app_config::AppSettings;
use crate::commands::register_builtin_commands;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything a subcommand handler needs: the loaded settings and the
/// management command registry. Constructed once in `cli_main` and passed
/// by value to the handler of the invoked subcommand.
pub struct CliContext {
    settings: AppSettings,
    registry: CommandRegistry,
}

impl CliContext {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            registry: CommandRegistry::new(),
        }
    }

    /// Populates the registry with the built-in management commands.
    pub fn init(mut self) -> anyhow::Result<Self> {
        register_builtin_commands(&mut self.registry)?;
        Ok(self)
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }
}
