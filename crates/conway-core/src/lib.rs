//! Board storage, coordination, and configuration for the Conway board service.
//!
//! This crate sits between the pure [`conway_engine`] and the HTTP
//! transport. It owns the only shared mutable resource in the system,
//! the id-to-grid mapping.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `conway-config.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- [`ServiceError`] and the [`ErrorKind`] taxonomy the
//!   transport maps to status codes.
//! - [`log`] -- The injected [`EventLog`] capability and its
//!   implementations.
//! - [`store`] -- The [`BoardStore`] contract and the in-memory store.
//! - [`file_store`] -- JSON snapshot persistence on top of the in-memory
//!   store.
//! - [`service`] -- [`BoardService`], the upload/next/steps/final
//!   coordinator.
//!
//! [`BoardStore`]: store::BoardStore
//! [`BoardService`]: service::BoardService
//! [`EventLog`]: log::EventLog

pub mod config;
pub mod error;
pub mod file_store;
pub mod log;
pub mod service;
pub mod store;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ErrorKind, ServiceError, StoreError};
pub use file_store::FileBoardStore;
pub use log::{EventLog, LogLevel, MemoryLog, NoopLog, TracingLog};
pub use service::{BoardLimits, BoardService};
pub use store::{BoardStore, MemoryBoardStore};
