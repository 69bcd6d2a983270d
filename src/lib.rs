//! Call Recording Renamer
//!
//! A Rust library for batch-renaming call-recorder media files into
//! human-readable names, with persistent contact resolution.
//!
//! # Features
//!
//! - Structural parsing of two historical recorder filename grammars
//! - Locale-aware phone number normalization with raw fallback
//! - Persistent known/unknown contact database (TOML, human-editable)
//! - Sequential rename pipeline with per-file error isolation
//! - Dry-run mode that still discovers unknown numbers

/// Filename parsing and rendering
pub mod codec;
/// Configuration management
pub mod config;
/// Persistent contact store
pub mod contacts;
/// Error types
pub mod error;
/// Logging setup and utilities
pub mod logging;
/// Data models and structures
pub mod models;
/// Phone number normalization
pub mod phone;
/// Rename pipeline orchestration
pub mod pipeline;
/// Input validation
pub mod validation;

// Re-export key components for easier access
pub use codec::{CodecVariant, FilenameCodec};
pub use contacts::{ContactDatabase, ContactStore};
pub use error::{RenamerError, Result};
pub use models::{Direction, FileOutcome, ParsedCallRecord, PhoneField, RawFilenameRecord, RunSummary};
pub use phone::PhoneNumberNormalizer;
pub use pipeline::RenamePipeline;
