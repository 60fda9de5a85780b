// ── Key dispatcher ──
//
// Turns a logical keypress into one executor call and folds the reply
// back into the session. The executor call is the only suspension
// point; it is bounded by the configured timeout and abandoned when the
// selection it was issued under is replaced.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, info, warn};

use tvlink_api::{CommandExecutor, KeyRequest};

use crate::config::{DispatchConfig, MissingDevicePolicy};
use crate::error::CoreError;
use crate::reply::ExecutorReply;
use crate::session::{Session, Ticket};

/// What a successful `send_key` did.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// No TV was selected and the policy is [`MissingDevicePolicy::Skip`].
    Skipped,
    /// The executor accepted the key; the session is unchanged.
    Acknowledged(ExecutorReply),
    /// The TV handed out a new pairing credential, now stored.
    Paired,
}

/// Dispatches keypresses for a [`Session`].
///
/// Cheaply cloneable via `Arc<DispatcherInner>`.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    session: Session,
    executor: Arc<dyn CommandExecutor>,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(session: Session, executor: Arc<dyn CommandExecutor>, config: DispatchConfig) -> Self {
        Self {
            inner: Arc::new(DispatcherInner {
                session,
                executor,
                config,
            }),
        }
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.inner.config
    }

    /// Send one key to the selected TV.
    ///
    /// Executor failures are returned unchanged inside
    /// [`CoreError::Executor`] and leave the session untouched.
    pub async fn send_key(&self, key: &str) -> Result<SendOutcome, CoreError> {
        let (state, ticket) = self.inner.session.checkout();

        if !state.is_selected() {
            return match self.inner.config.missing_device {
                MissingDevicePolicy::Skip => {
                    warn!(key, "no TV selected, key dropped");
                    Ok(SendOutcome::Skipped)
                }
                MissingDevicePolicy::Reject => Err(CoreError::NoDeviceSelected),
            };
        }

        let request = KeyRequest {
            address: state.address,
            key: key.to_owned(),
            brand: state.brand.to_string(),
            credential: state.credential,
        };

        debug!(
            address = %request.address,
            key,
            brand = %request.brand,
            paired = request.has_credential(),
            "dispatching key"
        );
        if !request.has_credential() && state.brand.requires_pairing() {
            info!(address = %request.address, "unpaired TV, accept the pairing prompt on screen");
        }

        let raw = self.invoke(&request, &ticket).await?;
        let reply = ExecutorReply::parse(&raw);

        match reply.new_key() {
            Some(new_key) => {
                self.inner
                    .session
                    .store_paired_credential(&ticket, SecretString::from(new_key.to_owned()))?;
                info!(address = %request.address, "pairing key received and stored");
                Ok(SendOutcome::Paired)
            }
            None => Ok(SendOutcome::Acknowledged(reply)),
        }
    }

    /// Send several keys in order, stopping at the first failure.
    pub async fn send_keys<I, K>(&self, keys: I) -> Result<Vec<SendOutcome>, CoreError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut outcomes = Vec::new();
        for key in keys {
            outcomes.push(self.send_key(key.as_ref()).await?);
        }
        Ok(outcomes)
    }

    async fn invoke(&self, request: &KeyRequest, ticket: &Ticket) -> Result<String, CoreError> {
        let timeout = self.inner.config.timeout;

        tokio::select! {
            biased;
            () = ticket.superseded() => {
                warn!(address = %ticket.address(), key = %request.key, "selection changed, command abandoned");
                Err(CoreError::Superseded {
                    address: ticket.address().to_owned(),
                })
            }
            result = tokio::time::timeout(timeout, self.inner.executor.execute(request)) => {
                match result {
                    Ok(Ok(raw)) => Ok(raw),
                    Ok(Err(e)) => {
                        warn!(address = %request.address, key = %request.key, error = %e, "error sending command");
                        Err(CoreError::Executor(e))
                    }
                    Err(_) => {
                        warn!(address = %request.address, key = %request.key, ?timeout, "command timed out");
                        Err(CoreError::Timeout { timeout })
                    }
                }
            }
        }
    }
}
