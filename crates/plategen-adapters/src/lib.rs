//! Infrastructure adapters for Plategen.
//!
//! This crate implements the ports defined in `plategen-core::application::ports`.
//! It contains all process and filesystem I/O.

pub mod compiler;
pub mod filesystem;
pub mod script_store;

// Re-export commonly used adapters
pub use compiler::OpenScadCompiler;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use script_store::{DirectoryScriptStore, EmbeddedScriptStore};
