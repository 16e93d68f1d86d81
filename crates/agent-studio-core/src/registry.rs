use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::RegistryError;
use crate::history::{ExecutionHistory, ExecutionRecord};

/// Result of a command implementation. Commands return a JSON value so the
/// CLI can render them uniformly; failures are reported through `anyhow`.
pub type CommandResult = anyhow::Result<serde_json::Value>;

/// A registered command implementation.
pub type CommandFn = Box<dyn Fn(&[String]) -> CommandResult + Send + Sync>;

/// Declarative metadata for a command registration.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    name: String,
    category: String,
    description: String,
    aliases: BTreeSet<String>,
    deprecated: bool,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: "general".to_string(),
            description: String::new(),
            aliases: BTreeSet::new(),
            deprecated: false,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.insert(alias.into());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }
}

struct CommandEntry {
    implementation: CommandFn,
    category: String,
    description: String,
    aliases: BTreeSet<String>,
    deprecated: bool,
    registered_at: DateTime<Utc>,
    execution_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CommandStatus {
    Active,
    Deprecated,
}

/// Read-only snapshot of a command's metadata, for display.
#[derive(Debug, Clone, Serialize)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
    pub category: String,
    pub aliases: Vec<String>,
    pub deprecated: bool,
    pub registered_at: DateTime<Utc>,
    pub execution_count: usize,
}

impl CommandInfo {
    pub fn status(&self) -> CommandStatus {
        if self.deprecated {
            CommandStatus::Deprecated
        } else {
            CommandStatus::Active
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegistryStats {
    pub total_commands: usize,
    pub active_commands: usize,
    pub deprecated_commands: usize,
    pub total_aliases: usize,
    pub commands_per_category: BTreeMap<String, usize>,
    pub total_executions: usize,
    pub successful_executions: usize,
    pub failed_executions: usize,
}

/// Process-wide catalog of management commands.
///
/// Owns the name-to-entry map, the alias index, and the execution history.
/// Mutating operations take `&mut self`; a multi-threaded host wraps the
/// whole registry in a single `Mutex` so registration and execution cannot
/// race on the alias index.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandEntry>,
    aliases: HashMap<String, String>,
    history: ExecutionHistory,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command, replacing any previous registration with the
    /// same name. Replacement drops the old alias set entirely.
    ///
    /// Fails with [`RegistryError::Configuration`] when an alias already
    /// belongs to a different command; the registry is left untouched in
    /// that case.
    pub fn register(
        &mut self,
        spec: CommandSpec,
        implementation: impl Fn(&[String]) -> CommandResult + Send + Sync + 'static,
    ) -> Result<(), RegistryError> {
        let CommandSpec {
            name,
            category,
            description,
            aliases,
            deprecated,
        } = spec;

        // Validate the name and every alias before touching any state, so a
        // rejected registration leaves no partial mutation behind.
        if let Some(owner) = self.aliases.get(&name) {
            if owner != &name {
                return Err(RegistryError::Configuration(format!(
                    "command name '{name}' is already an alias of command '{owner}'"
                )));
            }
        }
        for alias in &aliases {
            self.check_alias_free(alias, &name)?;
        }

        if self.commands.contains_key(&name) {
            log::warn!("Command '{name}' is already registered, overriding");
            self.aliases.retain(|_, owner| owner != &name);
        }
        for alias in &aliases {
            log::debug!("Registered alias '{alias}' for command '{name}'");
            self.aliases.insert(alias.clone(), name.clone());
        }

        log::info!("Registered command '{name}' in category '{category}'");
        self.commands.insert(
            name,
            CommandEntry {
                implementation: Box::new(implementation),
                category,
                description,
                aliases,
                deprecated,
                registered_at: Utc::now(),
                execution_count: 0,
            },
        );
        Ok(())
    }

    /// Adds an alias to an already registered command.
    pub fn add_alias(
        &mut self,
        alias: impl Into<String>,
        command: &str,
    ) -> Result<(), RegistryError> {
        let alias = alias.into();
        if !self.commands.contains_key(command) {
            return Err(RegistryError::UnknownCommand(command.to_string()));
        }
        self.check_alias_free(&alias, command)?;

        self.aliases.insert(alias.clone(), command.to_string());
        if let Some(entry) = self.commands.get_mut(command) {
            entry.aliases.insert(alias.clone());
        }
        log::info!("Added alias '{alias}' for command '{command}'");
        Ok(())
    }

    /// Removes a command and all of its aliases. Execution history records
    /// for the command are retained.
    pub fn remove_command(&mut self, name: &str) -> Result<(), RegistryError> {
        if self.commands.remove(name).is_none() {
            return Err(RegistryError::UnknownCommand(name.to_string()));
        }
        let before = self.aliases.len();
        self.aliases.retain(|_, owner| owner != name);
        log::info!(
            "Removed command '{name}' and {} aliases",
            before - self.aliases.len()
        );
        Ok(())
    }

    pub fn has_command(&self, identifier: &str) -> bool {
        self.commands.contains_key(identifier) || self.aliases.contains_key(identifier)
    }

    /// Resolves a name or alias to the canonical command name.
    pub fn resolve(&self, identifier: &str) -> Result<String, RegistryError> {
        if self.commands.contains_key(identifier) {
            return Ok(identifier.to_string());
        }
        if let Some(name) = self.aliases.get(identifier) {
            return Ok(name.clone());
        }
        Err(RegistryError::UnknownCommand(identifier.to_string()))
    }

    pub fn get_command_info(&self, identifier: &str) -> Result<CommandInfo, RegistryError> {
        let name = self.resolve(identifier)?;
        let entry = &self.commands[&name];
        Ok(CommandInfo {
            name,
            description: entry.description.clone(),
            category: entry.category.clone(),
            aliases: entry.aliases.iter().cloned().collect(),
            deprecated: entry.deprecated,
            registered_at: entry.registered_at,
            execution_count: entry.execution_count,
        })
    }

    /// Canonical command names, sorted. Deprecated commands are hidden
    /// unless asked for.
    pub fn list_commands(&self, category: Option<&str>, include_deprecated: bool) -> Vec<String> {
        let mut names: Vec<String> = self
            .commands
            .iter()
            .filter(|(_, entry)| category.is_none_or(|c| entry.category == c))
            .filter(|(_, entry)| include_deprecated || !entry.deprecated)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn list_categories(&self) -> Vec<String> {
        let categories: BTreeSet<String> = self
            .commands
            .values()
            .map(|entry| entry.category.clone())
            .collect();
        categories.into_iter().collect()
    }

    /// Resolves and runs a command. Exactly one history record is appended
    /// per invocation that reached an implementation, on both exit paths;
    /// an unknown identifier appends nothing. Implementation failures are
    /// surfaced as [`RegistryError::Execution`] after being logged.
    pub fn execute_command(
        &mut self,
        identifier: &str,
        args: &[String],
    ) -> Result<serde_json::Value, RegistryError> {
        let name = self.resolve(identifier)?;
        let entry = self
            .commands
            .get_mut(&name)
            .ok_or_else(|| RegistryError::UnknownCommand(name.clone()))?;

        if entry.deprecated {
            log::warn!("Command '{name}' is deprecated");
        }
        entry.execution_count += 1;

        log::debug!("Dispatching '{name}' with {} argument(s)", args.len());
        let result = (entry.implementation)(args);

        let (record, outcome) = match result {
            Ok(value) => (ExecutionRecord::success(&name, args), Ok(value)),
            Err(source) => {
                log::error!("Command '{name}' execution failed: {source}");
                (
                    ExecutionRecord::failure(&name, args, source.to_string()),
                    Err(RegistryError::Execution {
                        command: name.clone(),
                        source,
                    }),
                )
            }
        };
        self.history.push(record);
        outcome
    }

    /// The most recent `limit` execution records (all when `None`), most
    /// recent first.
    pub fn get_execution_history(&self, limit: Option<usize>) -> Vec<&ExecutionRecord> {
        self.history.recent(limit)
    }

    pub fn get_registry_stats(&self) -> RegistryStats {
        let deprecated_commands = self
            .commands
            .values()
            .filter(|entry| entry.deprecated)
            .count();
        let mut commands_per_category = BTreeMap::new();
        for entry in self.commands.values() {
            *commands_per_category
                .entry(entry.category.clone())
                .or_insert(0) += 1;
        }
        RegistryStats {
            total_commands: self.commands.len(),
            active_commands: self.commands.len() - deprecated_commands,
            deprecated_commands,
            total_aliases: self.aliases.len(),
            commands_per_category,
            total_executions: self.history.len(),
            successful_executions: self.history.successes(),
            failed_executions: self.history.failures(),
        }
    }

    fn check_alias_free(&self, alias: &str, owner: &str) -> Result<(), RegistryError> {
        if let Some(existing) = self.aliases.get(alias) {
            if existing != owner {
                return Err(RegistryError::Configuration(format!(
                    "alias '{alias}' already maps to command '{existing}'"
                )));
            }
        }
        if alias != owner && self.commands.contains_key(alias) {
            return Err(RegistryError::Configuration(format!(
                "alias '{alias}' collides with registered command '{alias}'"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn registry_with_status() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry
            .register(
                CommandSpec::new("status")
                    .category("core")
                    .description("Show project status")
                    .alias("st"),
                |_args| Ok(json!({"status": "ok"})),
            )
            .unwrap();
        registry
    }

    #[rstest]
    #[case("status")]
    #[case("st")]
    fn resolves_name_and_alias_to_canonical_name(#[case] identifier: &str) {
        let registry = registry_with_status();
        assert!(registry.has_command(identifier));
        assert_eq!(registry.resolve(identifier).unwrap(), "status");
    }

    #[test]
    fn unknown_identifier_fails_to_resolve() {
        let registry = registry_with_status();
        assert!(!registry.has_command("missing"));
        assert!(matches!(
            registry.resolve("missing"),
            Err(RegistryError::UnknownCommand(name)) if name == "missing"
        ));
    }

    #[test]
    fn alias_collision_is_rejected_without_partial_mutation() {
        let mut registry = registry_with_status();
        let result = registry.register(
            CommandSpec::new("state").alias("st"),
            |_args| Ok(json!(null)),
        );

        assert!(matches!(result, Err(RegistryError::Configuration(_))));
        assert!(!registry.has_command("state"));
        assert_eq!(registry.resolve("st").unwrap(), "status");
    }

    #[test]
    fn alias_colliding_with_a_command_name_is_rejected() {
        let mut registry = registry_with_status();
        let result = registry.register(
            CommandSpec::new("clean").alias("status"),
            |_args| Ok(json!(null)),
        );

        assert!(matches!(result, Err(RegistryError::Configuration(_))));
        assert!(!registry.has_command("clean"));
    }

    #[test]
    fn command_name_shadowing_an_existing_alias_is_rejected() {
        let mut registry = registry_with_status();
        let result = registry.register(CommandSpec::new("st"), |_args| Ok(json!(null)));

        assert!(matches!(result, Err(RegistryError::Configuration(_))));

        // The alias still resolves to its original owner and the owner's
        // metadata is unchanged.
        assert_eq!(registry.resolve("st").unwrap(), "status");
        let info = registry.get_command_info("status").unwrap();
        assert_eq!(info.aliases, vec!["st".to_string()]);
        assert_eq!(registry.get_registry_stats().total_aliases, 1);
        assert_eq!(registry.get_registry_stats().total_commands, 1);
    }

    #[test]
    fn reregistration_replaces_the_entry_and_drops_old_aliases() {
        let mut registry = registry_with_status();
        registry
            .register(
                CommandSpec::new("status").category("project").alias("info"),
                |_args| Ok(json!("replaced")),
            )
            .unwrap();

        assert!(!registry.has_command("st"));
        assert_eq!(registry.resolve("info").unwrap(), "status");

        let info = registry.get_command_info("status").unwrap();
        assert_eq!(info.category, "project");
        assert_eq!(info.aliases, vec!["info".to_string()]);

        let value = registry.execute_command("status", &[]).unwrap();
        assert_eq!(value, json!("replaced"));
    }

    #[test]
    fn a_command_may_redeclare_its_own_aliases() {
        let mut registry = registry_with_status();
        let result = registry.register(
            CommandSpec::new("status").category("core").alias("st"),
            |_args| Ok(json!(null)),
        );
        assert!(result.is_ok());
        assert_eq!(registry.resolve("st").unwrap(), "status");
    }

    #[test]
    fn executing_through_an_alias_records_the_canonical_name() {
        let mut registry = registry_with_status();
        let value = registry.execute_command("st", &[]).unwrap();
        assert_eq!(value, json!({"status": "ok"}));

        let history = registry.get_execution_history(None);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].command, "status");
        assert!(history[0].success);
    }

    #[test]
    fn unknown_command_execution_appends_no_history() {
        let mut registry = registry_with_status();
        let result = registry.execute_command("missing", &[]);
        assert!(matches!(result, Err(RegistryError::UnknownCommand(_))));
        assert!(registry.get_execution_history(None).is_empty());
    }

    #[test]
    fn failing_command_appends_one_failure_record_and_wraps_the_error() {
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandSpec::new("clean"), |_args| {
                Err(anyhow::anyhow!("permission denied"))
            })
            .unwrap();

        let result = registry.execute_command("clean", &[]);
        match result {
            Err(RegistryError::Execution { command, source }) => {
                assert_eq!(command, "clean");
                assert_eq!(source.to_string(), "permission denied");
            }
            other => panic!("expected execution error, got {other:?}"),
        }

        let history = registry.get_execution_history(Some(1));
        assert_eq!(history.len(), 1);
        assert!(!history[0].success);
        assert_eq!(history[0].error.as_deref(), Some("permission denied"));
    }

    #[test]
    fn successful_command_passes_its_result_through() {
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandSpec::new("echo"), |args| Ok(json!(args)))
            .unwrap();

        let args = vec!["hello".to_string(), "world".to_string()];
        let value = registry.execute_command("echo", &args).unwrap();
        assert_eq!(value, json!(["hello", "world"]));

        let history = registry.get_execution_history(None);
        assert_eq!(history.len(), 1);
        assert!(history[0].success);
        assert_eq!(history[0].args, args);
    }

    #[test]
    fn list_commands_hides_deprecated_entries_unless_asked() {
        let mut registry = registry_with_status();
        registry
            .register(
                CommandSpec::new("legacy").category("core").deprecated(true),
                |_args| Ok(json!(null)),
            )
            .unwrap();

        assert_eq!(registry.list_commands(None, false), vec!["status"]);
        assert_eq!(registry.list_commands(None, true), vec!["legacy", "status"]);
    }

    #[test]
    fn list_commands_filters_by_category() {
        let mut registry = registry_with_status();
        registry
            .register(CommandSpec::new("clean").category("project"), |_args| {
                Ok(json!(null))
            })
            .unwrap();

        assert_eq!(registry.list_commands(Some("project"), false), vec!["clean"]);
        assert_eq!(registry.list_commands(Some("core"), false), vec!["status"]);
        assert!(registry.list_commands(Some("missing"), false).is_empty());
        assert_eq!(registry.list_categories(), vec!["core", "project"]);
    }

    #[test]
    fn history_limit_returns_the_most_recent_records_first() {
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandSpec::new("echo"), |args| Ok(json!(args)))
            .unwrap();

        for i in 0..5 {
            registry
                .execute_command("echo", &[format!("run{i}")])
                .unwrap();
        }

        let history = registry.get_execution_history(Some(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].args, vec!["run4".to_string()]);
        assert_eq!(history[1].args, vec!["run3".to_string()]);
    }

    #[test]
    fn stats_reflect_commands_aliases_and_outcomes() {
        let mut registry = registry_with_status();
        registry
            .register(
                CommandSpec::new("legacy").category("core").deprecated(true),
                |_args| Err(anyhow::anyhow!("gone")),
            )
            .unwrap();

        registry.execute_command("status", &[]).unwrap();
        let _ = registry.execute_command("legacy", &[]);

        let stats = registry.get_registry_stats();
        assert_eq!(stats.total_commands, 2);
        assert_eq!(stats.active_commands, 1);
        assert_eq!(stats.deprecated_commands, 1);
        assert_eq!(stats.total_aliases, 1);
        assert_eq!(stats.commands_per_category["core"], 2);
        assert_eq!(stats.total_executions, 2);
        assert_eq!(stats.successful_executions, 1);
        assert_eq!(stats.failed_executions, 1);
    }

    #[test]
    fn add_alias_rejects_collisions_and_unknown_targets() {
        let mut registry = registry_with_status();
        registry
            .register(CommandSpec::new("clean"), |_args| Ok(json!(null)))
            .unwrap();

        registry.add_alias("cl", "clean").unwrap();
        assert_eq!(registry.resolve("cl").unwrap(), "clean");

        assert!(matches!(
            registry.add_alias("st", "clean"),
            Err(RegistryError::Configuration(_))
        ));
        assert!(matches!(
            registry.add_alias("x", "missing"),
            Err(RegistryError::UnknownCommand(_))
        ));
    }

    #[test]
    fn remove_command_drops_the_entry_and_its_aliases() {
        let mut registry = registry_with_status();
        registry.execute_command("status", &[]).unwrap();

        registry.remove_command("status").unwrap();
        assert!(!registry.has_command("status"));
        assert!(!registry.has_command("st"));

        // History survives removal.
        assert_eq!(registry.get_execution_history(None).len(), 1);

        assert!(matches!(
            registry.remove_command("status"),
            Err(RegistryError::UnknownCommand(_))
        ));
    }

    #[test]
    fn execution_count_tracks_dispatches() {
        let mut registry = registry_with_status();
        registry.execute_command("status", &[]).unwrap();
        registry.execute_command("st", &[]).unwrap();

        let info = registry.get_command_info("status").unwrap();
        assert_eq!(info.execution_count, 2);
        assert_eq!(info.status(), CommandStatus::Active);
    }
}
