//! Application layer for Plategen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, RenderInvoker, TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod response;
pub mod services;

// Re-export main services
pub use services::{
    DEFAULT_RENDER_TIMEOUT, GenerationService, RenderInvoker, RenderSettings, TemplateCheck,
    TemplateInfo, TemplateService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CompileOutcome, CompileStatus, Filesystem, GeometryCompiler, ScriptStore};

pub use error::ApplicationError;
pub use response::GenerationResponse;
