//! Session command handlers: select, show, pair, forget.

use secrecy::SecretString;

use tvlink_core::Session;

use crate::cli::{GlobalOpts, PairArgs, SelectArgs};
use crate::error::CliError;
use crate::output::{self, SessionView};

pub fn select(session: &Session, args: &SelectArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let address = args.address.trim();
    if address.is_empty() {
        return Err(CliError::Validation {
            field: "address".into(),
            reason: "must not be empty".into(),
        });
    }

    session.select_tv(address, args.brand.as_str())?;
    show(session, global)
}

pub fn show(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let view = SessionView::new(&session.snapshot(), session.scope());
    let out = output::render_session(global.output, &view)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn pair(session: &Session, args: PairArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if args.credential.is_empty() {
        return Err(CliError::Validation {
            field: "credential".into(),
            reason: "must not be empty".into(),
        });
    }

    session.set_credential(SecretString::from(args.credential))?;
    show(session, global)
}

pub fn forget(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    session.clear_credential()?;
    show(session, global)
}
