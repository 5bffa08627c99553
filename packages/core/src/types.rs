// ABOUTME: Domain type definitions for projects and calculations
// ABOUTME: Persisted shapes plus the validated inputs accepted by the stores

use serde::{Deserialize, Serialize};

/// A named container of calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub calculations: Vec<Calculation>,
}

/// An expression scoped to one project, with its (eventually) computed result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub id: i64,
    pub project_id: i64,
    pub description: Option<String>,
    pub expression: String,
    pub result: Option<f64>,
}

/// Validated input for creating or replacing a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInput {
    pub name: String,
}

/// Validated input for creating or replacing a calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationInput {
    pub project_id: i64,
    pub description: Option<String>,
    pub expression: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_serializes_camel_case() {
        let project = Project {
            id: 13,
            name: "Test name".to_string(),
            calculations: vec![Calculation {
                id: 5,
                project_id: 13,
                description: Some("area".to_string()),
                expression: "2 * 3".to_string(),
                result: None,
            }],
        };

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 13,
                "name": "Test name",
                "calculations": [{
                    "id": 5,
                    "projectId": 13,
                    "description": "area",
                    "expression": "2 * 3",
                    "result": null
                }]
            })
        );
    }

    #[test]
    fn test_project_deserializes_without_calculations() {
        let project: Project = serde_json::from_value(json!({"id": 1, "name": "x"})).unwrap();
        assert!(project.calculations.is_empty());
    }
}
