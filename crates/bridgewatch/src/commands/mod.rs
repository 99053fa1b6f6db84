//! Command dispatch: CLI args -> engine -> output formatting.

pub mod config_cmd;
pub mod resources;
pub mod watch;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Bridges => resources::handle_bridges(global).await,
        Command::Ports => resources::handle_ports(global).await,
        Command::Watch(args) => watch::handle(args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
