//! Shared configuration types for Depot.
//!
//! This crate provides the environment-layered configuration used by the
//! server binary to wire up the storage backends and the HTTP listener.

pub mod config;

pub use config::AppConfig;
