//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `plategen-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: Scratch and artifact file operations
//!   - `ScriptStore`: Template source scripts
//!   - `GeometryCompiler`: The external model compiler
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (`GenerationService`, consumed by the CLI or any other transport)

pub mod output;

pub use output::{CompileOutcome, CompileStatus, Filesystem, GeometryCompiler, ScriptStore};

#[cfg(test)]
pub use output::{MockFilesystem, MockGeometryCompiler, MockScriptStore};
