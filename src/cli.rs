//! CLI domain: parse, route, help, output, and presentation only.
//! No resolution logic; a single route table dispatches to the locator.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, SourceArgs, StoreArg, TargetArgs};
pub use presentation::{
    format_contexts_json, format_contexts_text, format_resolution_json, format_resolution_text,
    format_validate_result_text,
};
pub use route::RunContext;
