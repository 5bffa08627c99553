// ABOUTME: Core types, validation and expression evaluation for the calculator service
// ABOUTME: Foundational package shared by storage, service and HTTP layers

pub mod constants;
pub mod evaluator;
pub mod types;
pub mod validation;

// Re-export main types
pub use types::{Calculation, CalculationInput, Project, ProjectInput};

// Re-export constants
pub use constants::{calculator_dir, default_database_path, DATABASE_FILE_NAME};

// Re-export evaluator
pub use evaluator::{ArithmeticEvaluator, EvalError, Evaluator};

// Re-export validation
pub use validation::{
    validate_calculation_input, validate_project_input, ValidationError, MAX_DESCRIPTION_LENGTH,
    MAX_EXPRESSION_LENGTH, MAX_NAME_LENGTH,
};
