#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("Invalid command configuration: {0}")]
    Configuration(String),
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("Command '{command}' failed: {source}")]
    Execution {
        command: String,
        #[source]
        source: anyhow::Error,
    },
}
