//! CLI domain: parse, route, output, and presentation only.
//! Comparison logic lives in the library; the route hands results to presentation.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error};
pub use parse::Cli;
pub use presentation::{format_item, OutputFormat};
pub use route::RunContext;
