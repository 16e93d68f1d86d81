mod project;

pub use project::register_builtin_commands;
