//! CLI help and command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string for log records (e.g. "locate", "contexts").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Contexts { .. } => "contexts",
        Commands::Locate { .. } => "locate",
        Commands::Validate => "validate",
    }
}
