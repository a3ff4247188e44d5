//! Script composition: placeholder substitution into OpenSCAD sources.
//!
//! Source scripts carry a closed set of `<token>` markers. Composition
//! replaces every occurrence of every token and then proves nothing that
//! looks like a token survived.
//!
//! ## Injection
//!
//! Only validated codes and numbers reach this module, so no quote,
//! parenthesis or semicolon can be spliced into a script. The composer still
//! re-checks each substituted value against `[A-Za-z0-9.]` on its own.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    TemplateId,
    entities::{PlateRequest, ResolvedLayout},
    error::DomainError,
};

/// `<identifier>` markers, skipping `include <...>` / `use <...>` lines.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z_][A-Za-z0-9_]*>").expect("token pattern is valid"));

/// The closed set of placeholders a source script may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    PlateNumber,
    PlateCode,
    CodeSize,
    NumberSize,
    CodeX,
    CodeY,
    NumberX,
    NumberY,
    Baseline,
}

impl Placeholder {
    pub const ALL: [Placeholder; 9] = [
        Self::PlateNumber,
        Self::PlateCode,
        Self::CodeSize,
        Self::NumberSize,
        Self::CodeX,
        Self::CodeY,
        Self::NumberX,
        Self::NumberY,
        Self::Baseline,
    ];

    /// The literal marker as it appears in a source script.
    pub const fn token(&self) -> &'static str {
        match self {
            Self::PlateNumber => "<plateNum>",
            Self::PlateCode => "<plateCode>",
            Self::CodeSize => "<plateCodeSize>",
            Self::NumberSize => "<plateNumSize>",
            Self::CodeX => "<x_pCode>",
            Self::CodeY => "<y_pCode>",
            Self::NumberX => "<x_pNum>",
            Self::NumberY => "<y_pNum>",
            Self::Baseline => "<z_pCodeNum>",
        }
    }

    fn value(&self, request: &PlateRequest, layout: &ResolvedLayout) -> Result<String, DomainError> {
        match self {
            Self::PlateNumber => Ok(request.number().as_str().to_string()),
            Self::PlateCode => Ok(request.code().as_str().to_string()),
            Self::CodeSize => self.decimal(layout.code_size),
            Self::NumberSize => self.decimal(layout.number_size),
            Self::CodeX => self.decimal(layout.code_position.x),
            Self::CodeY => self.decimal(layout.code_position.y),
            Self::NumberX => self.decimal(layout.number_position.x),
            Self::NumberY => self.decimal(layout.number_position.y),
            Self::Baseline => self.decimal(layout.baseline),
        }
    }

    fn decimal(&self, value: f64) -> Result<String, DomainError> {
        format_decimal(value).ok_or_else(|| DomainError::NonFiniteValue {
            token: self.token().to_string(),
        })
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Plain decimal rendering: no exponent, `.` separator, no trailing `.0`.
///
/// `f64`'s `Display` never switches to scientific notation and ignores
/// locale, so it already has the required shape.
pub fn format_decimal(value: f64) -> Option<String> {
    value.is_finite().then(|| format!("{value}"))
}

/// Whether a substituted value is inert inside an OpenSCAD string or
/// expression.
pub fn is_safe_value(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '.')
}

/// A source script with every placeholder resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedScript {
    template: TemplateId,
    text: String,
    bindings: Vec<(Placeholder, String)>,
}

impl ComposedScript {
    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// The value substituted for `placeholder`.
    pub fn binding(&self, placeholder: Placeholder) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(p, _)| *p == placeholder)
            .map(|(_, v)| v.as_str())
    }

    pub fn bindings(&self) -> &[(Placeholder, String)] {
        &self.bindings
    }
}

/// Substitutes request and layout values into a template's source script.
pub struct ScriptComposer;

impl ScriptComposer {
    pub fn compose(
        source: &str,
        request: &PlateRequest,
        layout: &ResolvedLayout,
    ) -> Result<ComposedScript, DomainError> {
        let template = request.template();

        let mut bindings = Vec::with_capacity(Placeholder::ALL.len());
        for placeholder in Placeholder::ALL {
            let value = placeholder.value(request, layout)?;
            if !is_safe_value(&value) {
                return Err(DomainError::UnsafeValue {
                    token: placeholder.token().to_string(),
                });
            }
            if !source.contains(placeholder.token()) {
                return Err(DomainError::MissingPlaceholder {
                    template: template.to_string(),
                    token: placeholder.token().to_string(),
                });
            }
            bindings.push((placeholder, value));
        }

        let text = bindings
            .iter()
            .fold(source.to_string(), |text, (placeholder, value)| {
                text.replace(placeholder.token(), value)
            });

        if let Some(token) = find_unresolved(&text) {
            return Err(DomainError::UnresolvedPlaceholder {
                template: template.to_string(),
                token,
            });
        }

        Ok(ComposedScript {
            template,
            text,
            bindings,
        })
    }
}

/// First `<identifier>` left in `text`, ignoring library imports.
pub fn find_unresolved(text: &str) -> Option<String> {
    text.lines()
        .filter(|line| {
            let line = line.trim_start();
            !(line.starts_with("include") || line.starts_with("use"))
        })
        .find_map(|line| TOKEN_PATTERN.find(line).map(|m| m.as_str().to_string()))
}
