//! Minimal Boolean term enumerator.
//!
//! Given a partial truth table over up to six variables, synthesises every
//! syntactically distinct Boolean term of the smallest [`term::Term::complexity`]
//! that satisfies it. The search is brute-force iterative deepening, pruned
//! by semantic (evaluation-vector) equivalence; see [`forcer`] for the
//! algorithm itself. [`term`] and [`truth`] are its two building blocks.

pub mod agent_api;
pub mod error;
pub mod forcer;
pub mod term;
pub mod truth;

pub use error::TableError;
pub use forcer::{Forcer, Solutions};
pub use term::Term;
pub use truth::{TruthTable, TruthValue};

/// Default truth table used by the CLI when none is supplied.
pub const DEFAULT_TABLE: &str = "1110100010000000";
/// Default complexity budget used by the CLI when none is supplied.
pub const DEFAULT_COMPLEXITY: usize = 16;

/// Convenience entry point: parses `table` and runs the enumerator up to
/// `max_complexity`, returning every minimal-complexity matching term.
pub fn solve(table: &str, max_complexity: usize) -> Result<Vec<Term>, TableError> {
    let table = truth::parse_table(table)?;
    let forcer = Forcer::new(&table);
    Ok(forcer.run(max_complexity as u32).terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_finds_a_matching_minimal_term() {
        let terms = solve("0110", 16).unwrap();
        assert!(!terms.is_empty());
        let table = truth::parse_table("0110").unwrap();
        let (mask, eval) = table.evaluation();
        for term in &terms {
            assert_eq!(term.evaluation() & mask, eval);
        }
    }

    #[test]
    fn solve_surfaces_parse_errors() {
        let err = solve("01z", 16).unwrap_err();
        assert_eq!(
            err,
            TableError::InvalidToken {
                index: 2,
                token: "z".to_string(),
            }
        );
    }

    #[test]
    fn solve_returns_empty_when_budget_too_small() {
        let terms = solve("0001", 0).unwrap();
        assert!(terms.is_empty());
    }
}
