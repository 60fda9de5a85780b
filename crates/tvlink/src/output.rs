//! Output formatting: plain text or JSON.

use serde::Serialize;

use tvlink_core::{CredentialScope, ExecutorReply, SendOutcome, SessionState};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Views ────────────────────────────────────────────────────────────

/// Public view of the session. The credential itself is never rendered.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub address: Option<String>,
    pub brand: String,
    pub paired: bool,
    pub scope: String,
}

impl SessionView {
    pub fn new(state: &SessionState, scope: CredentialScope) -> Self {
        Self {
            address: state.is_selected().then(|| state.address.clone()),
            brand: state.brand.to_string(),
            paired: state.is_paired(),
            scope: scope.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOutcome {
    Skipped,
    Acknowledged,
    Paired,
}

/// Result of one key sent by `tvlink send`.
#[derive(Debug, Serialize)]
pub struct KeyReport {
    pub key: String,
    pub outcome: KeyOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
}

impl KeyReport {
    pub fn new(key: &str, outcome: &SendOutcome) -> Self {
        let (kind, reply) = match outcome {
            SendOutcome::Skipped => (KeyOutcome::Skipped, None),
            SendOutcome::Paired => (KeyOutcome::Paired, None),
            SendOutcome::Acknowledged(ExecutorReply::PlainText(text)) => {
                (KeyOutcome::Acknowledged, Some(text.clone()))
            }
            SendOutcome::Acknowledged(ExecutorReply::Structured(payload)) => (
                KeyOutcome::Acknowledged,
                Some(serde_json::Value::Object(payload.fields.clone()).to_string()),
            ),
        };
        Self {
            key: key.to_owned(),
            outcome: kind,
            reply,
        }
    }
}

// ── Renderers ────────────────────────────────────────────────────────

pub fn render_session(format: OutputFormat, view: &SessionView) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
        OutputFormat::Plain => Ok(format!(
            "address: {}\nbrand:   {}\npaired:  {}\nscope:   {}",
            view.address.as_deref().unwrap_or("(none)"),
            view.brand,
            if view.paired { "yes" } else { "no" },
            view.scope,
        )),
    }
}

pub fn render_key_plain(report: &KeyReport) -> String {
    match (report.outcome, report.reply.as_deref()) {
        (KeyOutcome::Skipped, _) => format!("{}: skipped, no TV selected", report.key),
        (KeyOutcome::Paired, _) => format!("{}: paired, credential stored", report.key),
        (KeyOutcome::Acknowledged, Some(reply)) => format!("{}: {reply}", report.key),
        (KeyOutcome::Acknowledged, None) => format!("{}: acknowledged", report.key),
    }
}

pub fn render_json<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    println!("{output}");
}
