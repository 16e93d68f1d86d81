pub mod error;
pub mod history;
pub mod registry;

pub use error::RegistryError;
pub use history::ExecutionRecord;
pub use registry::{
    CommandFn, CommandInfo, CommandRegistry, CommandResult, CommandSpec, CommandStatus,
    RegistryStats,
};
