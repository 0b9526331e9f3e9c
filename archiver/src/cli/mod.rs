//! CLI argument parsing module.

mod args;
mod commands;

pub use args::Cli;
pub use commands::{
    execute, exit_status, session_from, usage_status, EXIT_FAILURE, EXIT_LOCAL_UPDATE_FAILED,
    EXIT_OK,
};
