//! Storage backends for uploaded files, built on Apache OpenDAL.
//!
//! Two stores cooperate here:
//!
//! - [`LocalStore`] writes uploads to a directory on disk under
//!   timestamp-prefixed names; the same directory is served back over HTTP.
//! - [`RemoteStore`] pushes uploads into an S3-compatible object store
//!   through a single OpenDAL [`opendal::Operator`] constructed at startup.
//!
//! Keys for remote objects live under the `public/` prefix. The streaming
//! path timestamps its keys, the staged path does not; see the key builders
//! in [`remote`].

mod config;
mod error;
pub mod local;
pub mod remote;

pub use config::{RemoteStoreConfig, StorageProvider};
pub use error::StorageError;
pub use local::{LocalStore, StoredFile};
pub use remote::{RemoteStore, StoredObject};
