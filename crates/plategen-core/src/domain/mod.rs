// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Plategen.
//!
//! This module contains the pure generation logic: which templates exist,
//! what input they accept, where glyphs go, and how a source script becomes
//! a concrete one. All I/O (script files, scratch files, the compiler
//! process) is handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or network calls
//! - **Static registry**: Template layouts are `static` data, never mutated
//! - **Immutable entities**: Requests, layouts and scripts are built once
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod registry;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    artifact::{ArtifactName, ArtifactStatus, GenerationArtifact},
    layout::ResolvedLayout,
    request::{PlateCode, PlateNumber, PlateRequest, RawPlateRequest},
    script::{ComposedScript, Placeholder, ScriptComposer, find_unresolved, format_decimal},
};

pub use error::{DomainError, ErrorCategory};

pub use registry::{
    BranchRule, CodeRule, TEMPLATE_REGISTRY, TemplateConfig, find as find_template, is_multi_char,
    lookup as lookup_template,
};

pub use value_objects::{ArtifactFormat, CodeAlphabet, Point, TemplateId};

pub use validation::PlateValidator;
