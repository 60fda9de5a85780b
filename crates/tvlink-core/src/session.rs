// ── TV session ──
//
// Single source of truth for "which TV, which brand, which credential".
// In-memory state lives in a `watch` channel so UI bindings can observe
// it; every mutation is written through to the durable store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::CredentialScope;
use crate::error::CoreError;
use crate::model::{Brand, SessionState, TvDevice};
use crate::store::{SessionStore, StoreError, keys};

// ── Session ──────────────────────────────────────────────────────

/// Owned session context shared by the dispatcher and any UI binding.
///
/// Cheaply cloneable via `Arc<SessionInner>`; all clones observe the same
/// state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    store: Arc<dyn SessionStore>,
    scope: CredentialScope,
    state: watch::Sender<SessionState>,
    selection: Mutex<Selection>,
}

/// Bookkeeping for the current selection. Bumped whenever the selected
/// TV changes so work issued under an older selection can be detected.
struct Selection {
    epoch: u64,
    cancel: CancellationToken,
}

impl Selection {
    fn supersede(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.epoch = self.epoch.wrapping_add(1);
    }
}

/// Ties an in-flight dispatch to the selection it was issued under.
pub(crate) struct Ticket {
    epoch: u64,
    cancel: CancellationToken,
    address: String,
}

impl Ticket {
    /// Resolves once the selection this ticket belongs to is replaced.
    pub(crate) async fn superseded(&self) {
        self.cancel.cancelled().await;
    }

    pub(crate) fn address(&self) -> &str {
        &self.address
    }
}

impl Session {
    /// Restore a session from the durable store.
    ///
    /// Missing fields fall back to their defaults: no address, the generic
    /// brand, no credential.
    pub fn load(store: Arc<dyn SessionStore>, scope: CredentialScope) -> Result<Self, CoreError> {
        let address = read(store.as_ref(), keys::ADDRESS)?.unwrap_or_default();
        let brand = read(store.as_ref(), keys::BRAND)?
            .filter(|b| !b.is_empty())
            .map_or_else(Brand::default, Brand::from);
        let credential = match credential_key(scope, &address) {
            Some(name) => read_credential(store.as_ref(), &name)?,
            None => None,
        };

        debug!(
            address = %address,
            brand = %brand,
            paired = credential.is_some(),
            %scope,
            "session restored"
        );

        let (state, _) = watch::channel(SessionState {
            address,
            brand,
            credential,
        });

        Ok(Self {
            inner: Arc::new(SessionInner {
                store,
                scope,
                state,
                selection: Mutex::new(Selection {
                    epoch: 0,
                    cancel: CancellationToken::new(),
                }),
            }),
        })
    }

    pub fn scope(&self) -> CredentialScope {
        self.inner.scope
    }

    // ── Selection ────────────────────────────────────────────────

    /// Select the TV to control.
    ///
    /// Overwrites address and brand in memory, then in the durable store.
    /// An empty brand selects the default one.
    /// In global scope the credential is left alone; in per-device scope
    /// the new address's stored credential is loaded. Selecting a
    /// different TV cancels any dispatch still in flight for the old one.
    pub fn select_tv(
        &self,
        address: impl Into<String>,
        brand: impl Into<Brand>,
    ) -> Result<(), CoreError> {
        let address = address.into();
        let brand = Some(brand.into())
            .filter(|b| !b.as_str().is_empty())
            .unwrap_or_default();

        let mut selection = self.lock_selection();
        let (changed, address_changed) = {
            let current = self.inner.state.borrow();
            (
                current.address != address || current.brand != brand,
                current.address != address,
            )
        };

        if changed {
            selection.supersede();

            let reloaded = (self.inner.scope == CredentialScope::PerDevice && address_changed)
                .then(|| self.stored_credential(&address));

            self.inner.state.send_modify(|s| {
                s.address.clone_from(&address);
                s.brand = brand.clone();
                if let Some(credential) = reloaded {
                    s.credential = credential;
                }
            });
            info!(address = %address, brand = %brand, "TV selected");
        } else {
            debug!(address = %address, "TV already selected");
        }
        drop(selection);

        self.persist(keys::ADDRESS, &address)?;
        self.persist(keys::BRAND, brand.as_str())
    }

    /// Select a TV reported by discovery, using its model as the brand.
    pub fn select_device(&self, device: &TvDevice) -> Result<(), CoreError> {
        self.select_tv(device.ip.clone(), device.model.as_str())
    }

    // ── Credential ───────────────────────────────────────────────

    /// Replace the credential for the current selection.
    pub fn set_credential(&self, credential: SecretString) -> Result<(), CoreError> {
        let _selection = self.lock_selection();
        self.write_credential(Some(credential))
    }

    /// Forget the credential for the current selection.
    pub fn clear_credential(&self) -> Result<(), CoreError> {
        let _selection = self.lock_selection();
        self.write_credential(None)
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Point-in-time copy of the session state.
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn address(&self) -> String {
        self.inner.state.borrow().address.clone()
    }

    pub fn brand(&self) -> Brand {
        self.inner.state.borrow().brand.clone()
    }

    pub fn credential(&self) -> Option<SecretString> {
        self.inner.state.borrow().credential.clone()
    }

    // ── Dispatch support ─────────────────────────────────────────

    /// Snapshot the state together with a ticket for the same selection.
    pub(crate) fn checkout(&self) -> (SessionState, Ticket) {
        let selection = self.lock_selection();
        let state = self.snapshot();
        let ticket = Ticket {
            epoch: selection.epoch,
            cancel: selection.cancel.clone(),
            address: state.address.clone(),
        };
        (state, ticket)
    }

    /// Store a credential handed out by the TV, unless the selection has
    /// moved on since the request was issued.
    pub(crate) fn store_paired_credential(
        &self,
        ticket: &Ticket,
        credential: SecretString,
    ) -> Result<(), CoreError> {
        let selection = self.lock_selection();
        if selection.epoch != ticket.epoch {
            warn!(address = %ticket.address, "selection changed, discarding new pairing key");
            return Err(CoreError::Superseded {
                address: ticket.address.clone(),
            });
        }
        self.write_credential(Some(credential))
    }

    // ── Internals ────────────────────────────────────────────────

    fn lock_selection(&self) -> MutexGuard<'_, Selection> {
        self.inner
            .selection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Caller holds the selection lock.
    /// An empty credential is the same as none.
    fn write_credential(&self, credential: Option<SecretString>) -> Result<(), CoreError> {
        let credential = credential.filter(|c| !c.expose_secret().is_empty());
        let address = self.address();
        let Some(name) = credential_key(self.inner.scope, &address) else {
            return Err(CoreError::NoDeviceSelected);
        };

        let value = credential
            .as_ref()
            .map(|c| c.expose_secret().to_owned())
            .unwrap_or_default();
        let paired = credential.is_some();

        self.inner.state.send_modify(|s| s.credential = credential);
        debug!(address = %address, paired, "credential updated");

        self.persist(&name, &value)
    }

    fn stored_credential(&self, address: &str) -> Option<SecretString> {
        let name = credential_key(self.inner.scope, address)?;
        match read_credential(self.inner.store.as_ref(), &name) {
            Ok(credential) => credential,
            Err(e) => {
                warn!(address = %address, error = %e, "failed to load stored credential");
                None
            }
        }
    }

    fn persist(&self, name: &str, value: &str) -> Result<(), CoreError> {
        self.inner.store.set(name, value).map_err(|source| {
            warn!(name, error = %source, "failed to persist session field");
            store_error(name, source)
        })
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// Durable name of the credential slot for `address`, or `None` if the
/// scope has no slot for it.
fn credential_key(scope: CredentialScope, address: &str) -> Option<String> {
    match scope {
        CredentialScope::Global => Some(keys::CREDENTIAL.to_owned()),
        CredentialScope::PerDevice if address.is_empty() => None,
        CredentialScope::PerDevice => Some(format!("{}:{address}", keys::CREDENTIAL)),
    }
}

fn read(store: &dyn SessionStore, name: &str) -> Result<Option<String>, CoreError> {
    store.get(name).map_err(|source| store_error(name, source))
}

/// Empty values read back as "not paired".
fn read_credential(store: &dyn SessionStore, name: &str) -> Result<Option<SecretString>, CoreError> {
    Ok(read(store, name)?
        .filter(|v| !v.is_empty())
        .map(SecretString::from))
}

fn store_error(name: &str, source: StoreError) -> CoreError {
    CoreError::Persistence {
        name: name.to_owned(),
        source,
    }
}
