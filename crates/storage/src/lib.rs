//! Storage abstraction and implementations for AquaTrack.
//!
//! This crate provides a trait-based repository interface with a JSON file
//! backend and an in-memory backend, plus export/import of the whole data set.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;
pub mod export;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
pub use export::{ExportBundle, ImportSummary, export_bundle, import_bundle, times_csv, workouts_csv};
