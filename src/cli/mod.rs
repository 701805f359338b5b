pub mod commands;
pub mod output;
pub mod selectors;

pub use commands::run_cli;
