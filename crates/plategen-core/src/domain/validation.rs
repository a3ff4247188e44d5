use crate::domain::{
    TemplateId,
    entities::{PlateCode, PlateNumber, PlateRequest, RawPlateRequest},
    error::DomainError,
};

/// Centralized request validation.
///
/// All syntactic rules live here, not scattered across transports. Pure:
/// no I/O, no registry mutation, no logging.
pub struct PlateValidator;

impl PlateValidator {
    /// Validate a raw request.
    ///
    /// The template is checked first because the code rule depends on it,
    /// then the number, then the code.
    pub fn validate(raw: &RawPlateRequest) -> Result<PlateRequest, DomainError> {
        let template: TemplateId = raw.template.parse()?;
        let number = Self::validate_number(template, &raw.plate_number)?;
        let code = Self::validate_code(template, &raw.plate_code)?;
        Ok(PlateRequest::from_parts(template, code, number))
    }

    pub fn validate_number(template: TemplateId, number: &str) -> Result<PlateNumber, DomainError> {
        if number.is_empty() {
            return Err(DomainError::InvalidPlateNumber {
                reason: "number cannot be empty".into(),
            });
        }
        if !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidPlateNumber {
                reason: "only digits 0-9 are allowed".into(),
            });
        }
        let max = template.config().max_number_digits;
        if number.len() > max {
            return Err(DomainError::InvalidPlateNumber {
                reason: format!("at most {max} digits are allowed"),
            });
        }
        Ok(PlateNumber::new_unchecked(number.to_string()))
    }

    /// Upper-case `code` and check it against the template's code rule.
    pub fn validate_code(template: TemplateId, code: &str) -> Result<PlateCode, DomainError> {
        let upper = code.to_ascii_uppercase();
        template
            .config()
            .code_rule
            .check(&upper)
            .map_err(|reason| DomainError::InvalidPlateCode {
                template: template.to_string(),
                reason,
            })?;
        Ok(PlateCode::new_unchecked(upper))
    }
}
