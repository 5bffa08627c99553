// ABOUTME: Boundary validation for project and calculation payloads
// ABOUTME: Turns optional request fields into validated store inputs

use thiserror::Error;

use crate::types::{CalculationInput, ProjectInput};

/// Maximum length of a project name (in characters)
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length of a calculation expression (in characters)
pub const MAX_EXPRESSION_LENGTH: usize = 1000;

/// Maximum length of a calculation description (in characters)
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} contains invalid null bytes")]
    NullByte { field: &'static str },
}

/// Validate a required text field. Blankness is judged on the trimmed value,
/// but the value is returned as sent.
fn required_text(
    value: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    if value.contains('\0') {
        return Err(ValidationError::NullByte { field });
    }

    Ok(value.to_string())
}

/// Validate a project payload. The name is required and must not be blank.
pub fn validate_project_input(name: Option<&str>) -> Result<ProjectInput, ValidationError> {
    let name = required_text(name, "name", MAX_NAME_LENGTH)?;
    Ok(ProjectInput { name })
}

/// Validate a calculation payload for the given owning project.
///
/// The expression is required; a blank description is stored as absent.
pub fn validate_calculation_input(
    project_id: i64,
    description: Option<&str>,
    expression: Option<&str>,
) -> Result<CalculationInput, ValidationError> {
    let expression = required_text(expression, "expression", MAX_EXPRESSION_LENGTH)?;

    let description = match description {
        Some(d) if !d.trim().is_empty() => {
            if d.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(ValidationError::TooLong {
                    field: "description",
                    max: MAX_DESCRIPTION_LENGTH,
                });
            }
            if d.contains('\0') {
                return Err(ValidationError::NullByte {
                    field: "description",
                });
            }
            Some(d.to_string())
        }
        _ => None,
    };

    Ok(CalculationInput {
        project_id,
        description,
        expression,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_required() {
        assert_eq!(
            validate_project_input(None),
            Err(ValidationError::Missing { field: "name" })
        );
        assert_eq!(
            validate_project_input(Some("   ")),
            Err(ValidationError::Empty { field: "name" })
        );
    }

    #[test]
    fn test_project_name_kept_as_sent() {
        let input = validate_project_input(Some("  Test name ")).unwrap();
        assert_eq!(input.name, "  Test name ");
    }

    #[test]
    fn test_description_kept_as_sent() {
        let input = validate_calculation_input(1, Some(" area "), Some(" 2 * 3")).unwrap();
        assert_eq!(input.description.as_deref(), Some(" area "));
        assert_eq!(input.expression, " 2 * 3");
    }

    #[test]
    fn test_project_name_too_long() {
        let name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(
            validate_project_input(Some(&name)),
            Err(ValidationError::TooLong {
                field: "name",
                max: MAX_NAME_LENGTH
            })
        );
    }

    #[test]
    fn test_expression_required() {
        assert_eq!(
            validate_calculation_input(1, Some("desc"), None),
            Err(ValidationError::Missing {
                field: "expression"
            })
        );
        assert_eq!(
            validate_calculation_input(1, None, Some("")),
            Err(ValidationError::Empty {
                field: "expression"
            })
        );
    }

    #[test]
    fn test_blank_description_dropped() {
        let input = validate_calculation_input(7, Some("  "), Some("1 + 1")).unwrap();
        assert_eq!(input.project_id, 7);
        assert_eq!(input.description, None);
        assert_eq!(input.expression, "1 + 1");
    }

    #[test]
    fn test_null_byte_rejected() {
        assert_eq!(
            validate_calculation_input(1, None, Some("1\0+2")),
            Err(ValidationError::NullByte {
                field: "expression"
            })
        );
    }

    #[test]
    fn test_error_display() {
        let error = ValidationError::Missing { field: "name" };
        assert_eq!(error.to_string(), "name is required");
    }
}
