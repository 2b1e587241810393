//! CLI domain: parse, route, output, and presentation only.
//! No compilation logic; the route table dispatches to the prompt engine.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_blocks_json, format_blocks_table, format_compiled_json, format_compiled_text,
    format_draft_status_json, format_draft_status_text,
};
pub use route::{load_config, RunContext};
