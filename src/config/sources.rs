//! Configuration sources, lowest precedence first: user file, workspace files, environment.

pub mod env_vars;
pub mod global_file;
pub mod workspace_file;
