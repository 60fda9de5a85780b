// tvlink-api: Boundary toward the native command executor that talks to the TV.

pub mod error;
pub mod executor;
pub mod request;
pub mod transport;

pub use error::Error;
pub use executor::{CommandExecutor, HttpExecutor};
pub use request::KeyRequest;
