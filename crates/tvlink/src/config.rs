//! Config resolution for the CLI: file + env from `tvlink-config`, then
//! command-line overrides, then wiring into a session and dispatcher.

use std::path::PathBuf;
use std::sync::Arc;

use tvlink_api::HttpExecutor;
use tvlink_config::{Config, FileStore};
use tvlink_core::{Dispatcher, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file in effect: `--config` / `TVLINK_CONFIG`, else the platform path.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(tvlink_config::config_path)
}

/// Load the config file and apply command-line overrides on top.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = match global.config {
        Some(ref path) => tvlink_config::load_config_from(path)?,
        None => tvlink_config::load_config()?,
    };
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.executor {
        cfg.executor_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if let Some(ref path) = global.state_file {
        cfg.state_file = Some(path.clone());
    }
    if let Some(policy) = global.missing_device {
        cfg.missing_device = policy;
    }
    if let Some(scope) = global.credential_scope {
        cfg.credential_scope = scope;
    }
    if global.insecure {
        cfg.insecure = true;
    }
}

/// Restore the session from the configured session file.
pub fn open_session(cfg: &Config) -> Result<Session, CliError> {
    let store = FileStore::open(cfg.state_path())?;
    tracing::debug!(path = %store.path().display(), "session file opened");
    Ok(Session::load(Arc::new(store), cfg.credential_scope)?)
}

/// Build a dispatcher that forwards keys to the configured HTTP executor.
pub fn dispatcher(cfg: &Config, session: Session) -> Result<Dispatcher, CliError> {
    let dispatch = cfg.dispatch_config()?;
    let url = cfg.executor_url()?;
    let executor = HttpExecutor::new(&url, &cfg.transport())?;
    tracing::debug!(endpoint = %executor.endpoint(), "executor configured");
    Ok(Dispatcher::new(session, Arc::new(executor), dispatch))
}
