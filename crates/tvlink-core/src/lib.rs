//! Session state and key dispatch between UI consumers and a TV command executor.
//!
//! - **[`Session`]**: Owned, cheaply cloneable session context: the selected
//!   TV's address and brand plus its pairing credential. Every mutation is
//!   written through to a [`SessionStore`]; consumers observe changes via
//!   [`Session::subscribe`].
//!
//! - **[`Dispatcher`]**: [`send_key()`](Dispatcher::send_key) validates the
//!   selection, builds a [`KeyRequest`](tvlink_api::KeyRequest), calls the
//!   executor under a timeout and folds the reply back into the session.
//!
//! - **[`ExecutorReply`]**: Tagged classification of the executor's reply
//!   string: a JSON object (which may carry `new_key`) or plain text.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod reply;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CredentialScope, DispatchConfig, MissingDevicePolicy};
pub use dispatcher::{Dispatcher, SendOutcome};
pub use error::CoreError;
pub use model::{Brand, SessionState, TvDevice};
pub use reply::{ExecutorReply, ReplyPayload};
pub use session::Session;
pub use store::{MemoryStore, SessionStore, StoreError};
