//! The enumerator: iterative-deepening search over syntactically distinct
//! [`Term`]s, pruned by semantic (evaluation-vector) equivalence.
//!
//! [`Forcer`] holds the fixed `(mask, eval)` specification for a run. For a
//! complexity budget `Lmax`, [`Forcer::run`] grows one working set level by
//! level, in order: constants, then variables, then negations, then
//! commutative binary combinations. It stops the instant any level produces
//! a match, so every returned solution shares the smallest complexity at
//! which a match exists.

use std::collections::HashSet;
use std::rc::Rc;

use crate::term::{Term, MAX_VARS};
use crate::truth::TruthTable;

const CONST_COMPLEXITY: u32 = 0;
const VAR_COMPLEXITY: u32 = 1;
const UNARY_COMPLEXITY: u32 = 1;
const BINARY_COMPLEXITY: u32 = 1;

/// Preallocated capacity for the working set, matching the reference
/// implementation's starting size; it grows from here as needed.
const INITIAL_CAPACITY: usize = 256;

/// A term paired with its precomputed evaluation vector and complexity, so
/// that repeated observation while combining deeper terms is free.
struct CachedTerm {
    term: Rc<Term>,
    eval: u64,
    complexity: u32,
}

/// The deduplicated working set: cached terms plus a membership index of
/// their (unmasked) evaluation vectors. Append-only within a run.
struct WorkingSet {
    evals: HashSet<u64>,
    terms: Vec<CachedTerm>,
}

impl WorkingSet {
    fn with_capacity(cap: usize) -> Self {
        Self {
            evals: HashSet::with_capacity(cap),
            terms: Vec::with_capacity(cap),
        }
    }
}

/// The result of a [`Forcer::run`] call.
pub struct Solutions {
    /// Every minimal-complexity term that matches the specification
    /// (possibly empty if none exists within the given budget).
    pub terms: Vec<Term>,
    /// Size of the working set by the time the search stopped, a cheap
    /// proxy for how much of the search space was explored.
    pub explored: usize,
}

impl Solutions {
    /// The shared complexity of every returned term, if any were found.
    pub fn complexity(&self) -> Option<u32> {
        self.terms.first().map(Term::complexity)
    }
}

/// A brute-force Boolean term enumerator fixed to one `(mask, eval)`
/// specification.
pub struct Forcer {
    mask: u64,
    eval: u64,
}

impl Forcer {
    /// Builds a `Forcer` from the `(mask, eval)` encoding of `table`.
    pub fn new(table: &TruthTable) -> Self {
        let (mask, eval) = table.evaluation();
        Self { mask, eval }
    }

    /// Runs the search up to `max_complexity`, stopping at the first level
    /// with any match.
    pub fn run(&self, max_complexity: u32) -> Solutions {
        self.run_with(max_complexity, |_level, _new_terms| {})
    }

    /// Like [`Forcer::run`], but invokes `on_level(level, new_terms)` after
    /// each complexity level is processed, where `new_terms` is the number
    /// of working-set entries added at that level. Useful for a verbose
    /// trace of the search without threading state through the recursion.
    pub fn run_with(&self, max_complexity: u32, mut on_level: impl FnMut(u32, usize)) -> Solutions {
        let mut solutions: Vec<Rc<Term>> = Vec::new();
        let mut working = WorkingSet::with_capacity(INITIAL_CAPACITY);

        let before = working.terms.len();
        self.add(&mut solutions, &mut working, vec![Term::True, Term::False]);
        on_level(CONST_COMPLEXITY, working.terms.len() - before);

        for level in 1..=max_complexity {
            if !solutions.is_empty() {
                break;
            }
            let before = working.terms.len();

            // Snapshot of every non-constant term cached through the
            // previous level. New entries produced while processing this
            // level are deliberately excluded from it.
            let lower: Vec<(Rc<Term>, u32)> = working.terms[2..]
                .iter()
                .map(|c| (Rc::clone(&c.term), c.complexity))
                .collect();

            if level == VAR_COMPLEXITY {
                let vars: Vec<Term> = (0..MAX_VARS).map(Term::var).collect();
                self.add(&mut solutions, &mut working, vars);
                if !solutions.is_empty() {
                    on_level(level, working.terms.len() - before);
                    break;
                }
            }

            if level >= UNARY_COMPLEXITY + VAR_COMPLEXITY {
                let negations: Vec<Term> = lower
                    .iter()
                    .filter(|(p, complexity)| {
                        *complexity + UNARY_COMPLEXITY == level && !matches!(p.as_ref(), Term::Not(_))
                    })
                    .map(|(p, _)| Term::not(Rc::clone(p)))
                    .collect();
                self.add(&mut solutions, &mut working, negations);
                if !solutions.is_empty() {
                    on_level(level, working.terms.len() - before);
                    break;
                }
            }

            if level >= BINARY_COMPLEXITY + 2 * VAR_COMPLEXITY {
                let mut binaries = Vec::new();
                for (i, (p, p_complexity)) in lower.iter().enumerate() {
                    // Cheapest possible completion (combine with a bare
                    // variable) already exceeds the budget: skip this p
                    // entirely rather than scanning every q.
                    if *p_complexity + VAR_COMPLEXITY + BINARY_COMPLEXITY > level {
                        continue;
                    }
                    for (q, q_complexity) in &lower[i + 1..] {
                        if *p_complexity + *q_complexity + BINARY_COMPLEXITY != level {
                            continue;
                        }
                        binaries.push(Term::and(Rc::clone(p), Rc::clone(q)));
                        binaries.push(Term::or(Rc::clone(p), Rc::clone(q)));
                        binaries.push(Term::xor(Rc::clone(p), Rc::clone(q)));
                    }
                }
                self.add(&mut solutions, &mut working, binaries);
            }

            on_level(level, working.terms.len() - before);
        }

        Solutions {
            terms: solutions.into_iter().map(|rc| (*rc).clone()).collect(),
            explored: working.terms.len(),
        }
    }

    /// Folds each candidate into `solutions`/`working`: a masked match is
    /// recorded first (undefined cells are free), then the term is kept as
    /// a new working-set entry only if its *unmasked* evaluation vector is
    /// novel. Two terms with the same unmasked vector are truly equivalent
    /// Boolean functions, and only the cheaper (first-seen) one is useful
    /// as a building block for deeper terms.
    fn add(&self, solutions: &mut Vec<Rc<Term>>, working: &mut WorkingSet, candidates: Vec<Term>) {
        for t in candidates {
            let full_eval = t.evaluation();
            let masked = full_eval & self.mask;
            let complexity = t.complexity();
            let term = Rc::new(t);

            if masked == self.eval {
                solutions.push(Rc::clone(&term));
            }

            if !working.evals.insert(full_eval) {
                continue;
            }
            working.terms.push(CachedTerm {
                term,
                eval: full_eval,
                complexity,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::truth::parse_table;

    fn run(table_str: &str, max_complexity: u32) -> Solutions {
        let table = parse_table(table_str).unwrap();
        Forcer::new(&table).run(max_complexity)
    }

    fn assert_matches_and_shares_complexity(solutions: &Solutions, table_str: &str) {
        let table = parse_table(table_str).unwrap();
        let (mask, eval) = table.evaluation();
        assert!(!solutions.terms.is_empty(), "expected a solution for {table_str}");
        let complexity = solutions.terms[0].complexity();
        for term in &solutions.terms {
            assert_eq!(term.evaluation() & mask, eval, "term {term} does not match {table_str}");
            assert_eq!(term.complexity(), complexity, "term {term} has a different complexity");
        }
    }

    #[test]
    fn scenario_constant_true() {
        let solutions = run("1", 0);
        assert_matches_and_shares_complexity(&solutions, "1");
        assert_eq!(solutions.complexity(), Some(0));
    }

    #[test]
    fn scenario_constant_false() {
        let solutions = run("0", 0);
        assert_matches_and_shares_complexity(&solutions, "0");
        assert_eq!(solutions.complexity(), Some(0));
    }

    #[test]
    fn scenario_single_variable() {
        let solutions = run("01", 16);
        assert_matches_and_shares_complexity(&solutions, "01");
        assert_eq!(solutions.complexity(), Some(1));
    }

    #[test]
    fn scenario_negated_variable() {
        let solutions = run("10", 16);
        assert_matches_and_shares_complexity(&solutions, "10");
        assert_eq!(solutions.complexity(), Some(2));
    }

    #[test]
    fn scenario_and() {
        let solutions = run("0001", 16);
        assert_matches_and_shares_complexity(&solutions, "0001");
        assert_eq!(solutions.complexity(), Some(3));
    }

    #[test]
    fn scenario_or() {
        let solutions = run("0111", 16);
        assert_matches_and_shares_complexity(&solutions, "0111");
        assert_eq!(solutions.complexity(), Some(3));
    }

    #[test]
    fn scenario_xor() {
        let solutions = run("0110", 16);
        assert_matches_and_shares_complexity(&solutions, "0110");
        assert_eq!(solutions.complexity(), Some(3));
    }

    #[test]
    fn scenario_negated_xor() {
        let solutions = run("1001", 16);
        assert_matches_and_shares_complexity(&solutions, "1001");
        assert_eq!(solutions.complexity(), Some(4));
    }

    #[test]
    fn scenario_default_four_variable_table() {
        let solutions = run("1110100010000000", 16);
        assert_matches_and_shares_complexity(&solutions, "1110100010000000");
        assert!(solutions.terms[0].complexity() <= 16);
    }

    #[test]
    fn no_solution_within_budget_is_empty_not_an_error() {
        // A 7-variable-shaped function cannot exist at all (tables only
        // cover 6 variables), but a budget of 0 on a non-constant function
        // simply yields no matches yet.
        let solutions = run("0001", 0);
        assert!(solutions.terms.is_empty());
    }

    #[test]
    fn working_set_has_no_duplicate_evaluation_vectors() {
        let table = parse_table("1110100010000000").unwrap();
        let forcer = Forcer::new(&table);
        // Drive the internal working set through a few levels and check
        // dedup by reaching into the same construction the public API uses.
        let solutions = forcer.run(6);
        // No direct handle on the internal set from here; instead verify
        // indirectly that no two returned solutions are commutative
        // reorderings or double negations of one another, which would
        // indicate a dedup failure upstream.
        for term in &solutions.terms {
            assert!(!is_double_negation(term));
        }
    }

    fn is_double_negation(term: &Term) -> bool {
        match term {
            Term::Not(p) => matches!(p.as_ref(), Term::Not(_)),
            Term::And(p, q) | Term::Or(p, q) | Term::Xor(p, q) => {
                is_double_negation(p) || is_double_negation(q)
            }
            _ => false,
        }
    }

    #[test]
    fn explored_count_is_monotonic_in_budget() {
        let small = run("0001", 3).explored;
        let large = run("0001", 6).explored;
        assert!(large >= small);
    }
}
