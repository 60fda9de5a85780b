//! Command handlers, one module per command group.

pub mod config_cmd;
pub mod send;
pub mod session;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Route a session-backed command to its handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::resolve(global)?;
    let session = config::open_session(&cfg)?;

    match cmd {
        Command::Select(args) => session::select(&session, &args, global),
        Command::Show => session::show(&session, global),
        Command::Pair(args) => session::pair(&session, args, global),
        Command::Forget => session::forget(&session, global),
        Command::Send(args) => {
            let dispatcher = config::dispatcher(&cfg, session)?;
            send::handle(&dispatcher, &args, global).await
        }
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
