//! Identity provider and profile store contracts, with the two backends
//! selectable at startup: a hosted provider over HTTP and a single-record
//! local file for development.

pub mod backend;
pub mod gateway;
pub mod local;
pub mod persist;
pub mod remote;
pub mod session_change;

pub use backend::{Backend, BackendError, build_backend, credential_policy};
pub use gateway::{IdentityGateway, ProfileStore, Session};
pub use local::{LocalIdentityGateway, LocalProfileStore, LocalRecord, SessionMarker, local_backend};
pub use persist::{JsonFile, LoadResult, PersistError};
pub use remote::{CachedSession, RemoteIdentityGateway, RemoteProfileStore, remote_backend};
pub use session_change::{SessionChange, SessionNotifier, SessionSubscription, UnsubscribeToken};

#[cfg(test)]
mod tests;
