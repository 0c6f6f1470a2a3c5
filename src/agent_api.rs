//! JSON request/response surface for driving the solver from another tool's
//! pipeline (file, inline string, or piped input) instead of raw CLI flags.
//!
//! Mirrors this codebase's existing convention of a small serde-derived
//! request/response pair at the edge of the library, kept separate from the
//! CLI's own natural-language input dialects in `main.rs`.

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::forcer::Forcer;
use crate::truth::{self, TruthTable};
use crate::{DEFAULT_COMPLEXITY, DEFAULT_TABLE};

/// A solve request: the table text and an optional complexity override.
#[derive(Debug, Clone, Deserialize)]
pub struct SolveRequest {
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default)]
    pub complexity: Option<usize>,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

impl Default for SolveRequest {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            complexity: None,
        }
    }
}

/// The response to a [`SolveRequest`]: the parsed table echoed back, the
/// complexity the solutions share, their rendered notation, and how much of
/// the search space was explored to find them.
#[derive(Debug, Clone, Serialize)]
pub struct SolveResponse {
    pub table: String,
    pub complexity: usize,
    pub solutions: Vec<String>,
    pub explored: usize,
}

/// Parses `request.table`, runs the enumerator, and formats the result.
///
/// Returns [`TableError`] for a malformed table; an empty `solutions` list
/// (not an error at this layer) if no term matches within the budget.
pub fn solve_request(request: &SolveRequest) -> Result<SolveResponse, TableError> {
    let table: TruthTable = truth::parse_table(&request.table)?;
    let max_complexity = request.complexity.unwrap_or(DEFAULT_COMPLEXITY);

    let forcer = Forcer::new(&table);
    let result = forcer.run(max_complexity as u32);

    Ok(SolveResponse {
        table: table.to_string(),
        complexity: result.complexity().unwrap_or(0) as usize,
        solutions: result.terms.iter().map(|t| t.render()).collect(),
        explored: result.explored,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_request_round_trips_through_json() {
        let json = r#"{"table": "0110", "complexity": 8}"#;
        let request: SolveRequest = serde_json::from_str(json).unwrap();
        let response = solve_request(&request).unwrap();
        assert!(!response.solutions.is_empty());
        assert_eq!(response.complexity, 3);

        let serialized = serde_json::to_string(&response).unwrap();
        assert!(serialized.contains("\"explored\""));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let request: SolveRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.table, DEFAULT_TABLE);
        assert_eq!(request.complexity, None);

        let response = solve_request(&request).unwrap();
        assert!(!response.solutions.is_empty());
    }

    #[test]
    fn invalid_table_surfaces_as_table_error() {
        let request = SolveRequest {
            table: "01z".to_string(),
            complexity: None,
        };
        let err = solve_request(&request).unwrap_err();
        assert_eq!(
            err,
            TableError::InvalidToken {
                index: 2,
                token: "z".to_string(),
            }
        );
    }

    #[test]
    fn no_match_within_budget_is_an_empty_list_not_an_error() {
        let request = SolveRequest {
            table: "0001".to_string(),
            complexity: Some(0),
        };
        let response = solve_request(&request).unwrap();
        assert!(response.solutions.is_empty());
    }
}
