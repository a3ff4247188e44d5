//! Generation Service - main application orchestrator.
//!
//! This service coordinates one plate generation:
//! 1. Validate the raw request
//! 2. Resolve the layout for the template and code length
//! 3. Compose the concrete script from the template's source
//! 4. Render it through the [`RenderInvoker`]
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).
//! The service holds no per-request state and is shared freely across threads.

use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, GenerationResponse,
        ports::ScriptStore,
        services::render_invoker::{RenderInvoker, RenderSettings},
    },
    domain::{
        ArtifactName, CodeAlphabet, ComposedScript, GenerationArtifact, PlateRequest,
        PlateValidator, RawPlateRequest, ResolvedLayout, ScriptComposer, TEMPLATE_REGISTRY,
        TemplateConfig, TemplateId,
    },
    error::{ErrorCategory, PlateResult},
};

/// Result of checking one template's script against its layout.
#[derive(Debug, Clone)]
pub struct TemplateCheck {
    pub template: TemplateId,
    pub result: PlateResult<()>,
}

/// Main generation service.
pub struct GenerationService {
    scripts: Box<dyn ScriptStore>,
    invoker: RenderInvoker,
}

impl GenerationService {
    /// Create a service, refusing to start if any registered template lacks
    /// a source script.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use plategen_core::application::{GenerationService, RenderInvoker, RenderSettings};
    ///
    /// let invoker = RenderInvoker::new(
    ///     compiler,   // impl GeometryCompiler
    ///     filesystem, // impl Filesystem
    ///     RenderSettings::default(),
    /// );
    /// let service = GenerationService::try_new(
    ///     scripts,    // impl ScriptStore
    ///     invoker,
    /// )?;
    /// ```
    pub fn try_new(scripts: Box<dyn ScriptStore>, invoker: RenderInvoker) -> PlateResult<Self> {
        verify_sources(scripts.as_ref())?;
        Ok(Self { scripts, invoker })
    }

    pub fn settings(&self) -> &RenderSettings {
        self.invoker.settings()
    }

    pub fn invoker(&self) -> &RenderInvoker {
        &self.invoker
    }

    /// Generate one plate model.
    ///
    /// Invalid input is rejected before the compiler is ever started.
    #[instrument(
        skip_all,
        fields(
            template = %raw.template,
            code = %raw.plate_code,
            number = %raw.plate_number
        )
    )]
    pub fn generate(&self, raw: &RawPlateRequest) -> PlateResult<GenerationArtifact> {
        let request = PlateValidator::validate(raw)?;
        debug!(request = %request, "request validated");

        let script = self.compose(&request)?;
        let name = self.artifact_name(&request);

        let artifact = self.invoker.render(&script, &name)?;
        info!(file = %artifact.output_file_name, "plate generated");
        Ok(artifact)
    }

    /// Generate and fold the outcome into a transport response.
    ///
    /// Every failure is logged here with its full detail; the response only
    /// carries the public message.
    pub fn handle(&self, raw: &RawPlateRequest) -> GenerationResponse {
        let result = self.generate(raw);
        if let Err(e) = &result {
            match e.category() {
                ErrorCategory::Validation | ErrorCategory::NotFound => {
                    info!(error = %e, "request rejected");
                }
                ErrorCategory::Render => warn!(error = %e, "render failed"),
                _ => error!(error = %e, "generation failed"),
            }
        }
        GenerationResponse::from_result(&result)
    }

    /// Compose the script for an already validated request.
    pub fn compose(&self, request: &PlateRequest) -> PlateResult<ComposedScript> {
        let config = request.config();
        let source = self.scripts.load(config.source_script)?;
        let layout = ResolvedLayout::resolve(config, request.code().len());
        debug!(?layout, "layout resolved");

        Ok(ScriptComposer::compose(&source, request, &layout)?)
    }

    /// Validate and compose without rendering.
    pub fn compose_raw(&self, raw: &RawPlateRequest) -> PlateResult<ComposedScript> {
        let request = PlateValidator::validate(raw)?;
        self.compose(&request)
    }

    pub fn artifact_name(&self, request: &PlateRequest) -> ArtifactName {
        ArtifactName::for_request(request, self.invoker.settings().format)
    }

    /// Compose a sample request for every template and code-length branch.
    ///
    /// Catches scripts that lost a placeholder or gained an unknown one
    /// without running the compiler.
    pub fn check_templates(&self) -> Vec<TemplateCheck> {
        TEMPLATE_REGISTRY
            .iter()
            .map(|config| TemplateCheck {
                template: config.id,
                result: self.check_template(config),
            })
            .collect()
    }

    fn check_template(&self, config: &TemplateConfig) -> PlateResult<()> {
        let rule = config.code_rule;
        let glyph = match rule.alphabet {
            CodeAlphabet::Letters => 'A',
            CodeAlphabet::Digits => '1',
        };
        let number = "9".repeat(config.max_number_digits);

        for len in [rule.min_len, rule.max_len] {
            let code: String = std::iter::repeat_n(glyph, len).collect();
            let request = PlateRequest::parse(config.id.as_str(), &code, &number)?;
            self.compose(&request)?;
        }
        Ok(())
    }
}

/// Every registered template must resolve to a loadable script.
pub fn verify_sources(scripts: &dyn ScriptStore) -> PlateResult<()> {
    for config in TEMPLATE_REGISTRY {
        if !scripts.contains(config.source_script) {
            error!(
                template = %config.id,
                script = config.source_script,
                "template script missing"
            );
            return Err(ApplicationError::ScriptSourceMissing {
                template: config.id.to_string(),
                reference: config.source_script.to_string(),
            }
            .into());
        }
    }
    Ok(())
}
