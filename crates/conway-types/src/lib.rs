//! Shared type definitions for the Conway board service.
//!
//! This crate is the single source of truth for the data that crosses
//! crate boundaries: the validated [`Grid`], board identifiers, the stored
//! [`Board`] record, and the JSON wire shapes exchanged with clients.
//!
//! # Modules
//!
//! - [`grid`] -- Rectangular boolean matrix with row-stride indexing.
//! - [`ids`] -- Type-safe [`BoardId`] wrapper around a UUID v7.
//! - [`board`] -- The stored [`Board`] record (id, state, generation).
//! - [`wire`] -- Request and response bodies for the HTTP API.
//! - [`error`] -- [`GridError`] for absent and irregular matrices.

pub mod board;
pub mod error;
pub mod grid;
pub mod ids;
pub mod wire;

pub use board::Board;
pub use error::GridError;
pub use grid::Grid;
pub use ids::BoardId;
pub use wire::{BoardCreated, BoardStateDto, BoardView};
