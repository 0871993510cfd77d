//! Command dispatch: bridges CLI args -> resource managers -> output formatting.

pub mod config_cmd;
pub mod connector;
pub mod flow;
pub mod node;
pub mod table;
pub mod util;

use odlctl_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Node(args) => node::handle(controller, args, global).await,
        Command::Connector(args) => connector::handle(controller, args, global).await,
        Command::Table(args) => table::handle(controller, args, global).await,
        Command::Flow(args) => flow::handle(controller, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
