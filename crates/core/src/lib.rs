//! Storage engine for Depot.
//!
//! This crate contains the storage backends with ZERO web dependencies:
//!
//! - `storage::local` - timestamped writes to the local uploads directory
//! - `storage::remote` - OpenDAL-backed S3-compatible object store client

pub mod storage;
