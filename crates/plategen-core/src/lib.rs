//! Plategen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Plategen
//! number-plate model generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           plategen-cli (CLI)            │
//! │       (Drives GenerationService)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (GenerationService, RenderInvoker, ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (ScriptStore, Filesystem, GeometryComp.)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    plategen-adapters (Infrastructure)   │
//! │ (EmbeddedScriptStore, OpenScadCompiler) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Registry, Validator, Layout, Composer) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plategen_core::prelude::*;
//!
//! let invoker = RenderInvoker::new(compiler, filesystem, RenderSettings::default());
//! let service = GenerationService::try_new(scripts, invoker)?;
//!
//! let artifact = service.generate(&RawPlateRequest::new("dubai_new", "a", "12345"))?;
//! assert_eq!(artifact.output_file_name.as_str(), "A-12345.stl");
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationResponse, GenerationService, RenderInvoker, RenderSettings, TemplateService,
        ports::{CompileOutcome, CompileStatus, Filesystem, GeometryCompiler, ScriptStore},
    };
    pub use crate::domain::{
        ArtifactFormat, ArtifactName, ComposedScript, GenerationArtifact, PlateRequest,
        RawPlateRequest, ResolvedLayout, TemplateConfig, TemplateId,
    };
    pub use crate::error::{ErrorKind, PlateError, PlateResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
