//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a plate" or "list templates".

pub mod generation_service;
pub mod render_invoker;
pub mod template_service;

pub use generation_service::{GenerationService, TemplateCheck, verify_sources};
pub use render_invoker::{DEFAULT_RENDER_TIMEOUT, RenderInvoker, RenderSettings, ScratchPaths};
pub use template_service::{TemplateInfo, TemplateService};
