//! `tvlink send`: forward keys to the selected TV, in order.

use tvlink_core::Dispatcher;

use crate::cli::{GlobalOpts, OutputFormat, SendArgs};
use crate::error::CliError;
use crate::output::{self, KeyReport};

/// Plain output is printed key by key, so a failure midway still shows
/// what went through. JSON output is printed once all keys succeeded.
pub async fn handle(
    dispatcher: &Dispatcher,
    args: &SendArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut reports = Vec::with_capacity(args.keys.len());

    for key in &args.keys {
        let outcome = dispatcher.send_key(key).await?;
        let report = KeyReport::new(key, &outcome);

        if matches!(global.output, OutputFormat::Plain) {
            output::print_output(&output::render_key_plain(&report), global.quiet);
        }
        reports.push(report);
    }

    if matches!(global.output, OutputFormat::Json) {
        output::print_output(&output::render_json(&reports)?, global.quiet);
    }
    Ok(())
}
