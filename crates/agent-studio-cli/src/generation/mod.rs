mod filetree;
mod project_gen;

pub use filetree::FileTree;
pub use project_gen::{scaffold_project, ScaffoldError};
