pub mod commands;
pub mod output;

pub use commands::{ClassifyArgs, CliArgs, Commands, DiscoverArgs};
pub use output::{OutputFormat, OutputFormatter};
