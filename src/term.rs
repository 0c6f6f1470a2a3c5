//! Boolean term algebra: constants, variables, and NOT/AND/OR/XOR combinators.
//!
//! A [`Term`] is a small tagged-variant tree. Every term carries two cheap,
//! O(1)-on-cached-terms observers: [`Term::evaluation`], a 64-bit word whose
//! bit `k` is the term's truth value for the 6-bit assignment `k`, and
//! [`Term::complexity`], an additive cost used to stratify the enumerator in
//! [`crate::forcer`].

use std::fmt;
use std::rc::Rc;

/// Maximum number of Boolean variables a [`Term`] can reference.
pub const MAX_VARS: usize = 6;

const CONST_COMPLEXITY: u32 = 0;
const VAR_COMPLEXITY: u32 = 1;
const UNARY_COMPLEXITY: u32 = 1;
const BINARY_COMPLEXITY: u32 = 1;

/// Evaluation vector of variable `i`: bit `j` of `VAR_BITS[i]` is `(j >> i) & 1`.
///
/// These are the only "global state" the term algebra needs; everything else
/// is derived from them.
pub const VAR_BITS: [u64; MAX_VARS] = [
    0xAAAA_AAAA_AAAA_AAAA,
    0xCCCC_CCCC_CCCC_CCCC,
    0xF0F0_F0F0_F0F0_F0F0,
    0xFF00_FF00_FF00_FF00,
    0xFFFF_0000_FFFF_0000,
    0xFFFF_FFFF_0000_0000,
];

/// A Boolean term built from constants, variables, and NOT/AND/OR/XOR.
///
/// Binary children are reference-counted so that the enumerator can reuse a
/// previously cached term as a child of many new combinations without deep
/// copies; terms form a DAG (no cycles are ever constructed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    True,
    False,
    Variable(usize),
    Not(Rc<Term>),
    And(Rc<Term>, Rc<Term>),
    Or(Rc<Term>, Rc<Term>),
    Xor(Rc<Term>, Rc<Term>),
}

impl Term {
    /// Constructs `Variable(index)`. Panics if `index >= MAX_VARS`.
    pub fn var(index: usize) -> Term {
        assert!(index < MAX_VARS, "invalid variable index: {index}");
        Term::Variable(index)
    }

    /// Constructs `Not(p)`. Constructing `Not(Not(_))` is a contract
    /// violation (double negation is structurally redundant) and panics.
    pub fn not(p: impl Into<Rc<Term>>) -> Term {
        let p = p.into();
        assert!(
            !matches!(p.as_ref(), Term::Not(_)),
            "constructing Not(Not(_)) is not allowed"
        );
        Term::Not(p)
    }

    pub fn and(p: impl Into<Rc<Term>>, q: impl Into<Rc<Term>>) -> Term {
        Term::And(p.into(), q.into())
    }

    pub fn or(p: impl Into<Rc<Term>>, q: impl Into<Rc<Term>>) -> Term {
        Term::Or(p.into(), q.into())
    }

    pub fn xor(p: impl Into<Rc<Term>>, q: impl Into<Rc<Term>>) -> Term {
        Term::Xor(p.into(), q.into())
    }

    /// The term's evaluation vector: bit `k` is the term's value for the
    /// 6-bit assignment `k` (variable `i` contributes to bit `i` of `k`).
    pub fn evaluation(&self) -> u64 {
        match self {
            Term::True => u64::MAX,
            Term::False => 0,
            Term::Variable(i) => VAR_BITS[*i],
            Term::Not(p) => !p.evaluation(),
            Term::And(p, q) => p.evaluation() & q.evaluation(),
            Term::Or(p, q) => p.evaluation() | q.evaluation(),
            Term::Xor(p, q) => p.evaluation() ^ q.evaluation(),
        }
    }

    /// Additive cost: 0 for constants, 1 for a variable, `1 + cost(child)`
    /// for NOT, `1 + cost(left) + cost(right)` for a binary operator.
    pub fn complexity(&self) -> u32 {
        match self {
            Term::True | Term::False => CONST_COMPLEXITY,
            Term::Variable(_) => VAR_COMPLEXITY,
            Term::Not(p) => UNARY_COMPLEXITY + p.complexity(),
            Term::And(p, q) | Term::Or(p, q) | Term::Xor(p, q) => {
                BINARY_COMPLEXITY + p.complexity() + q.complexity()
            }
        }
    }

    /// Human-readable notation: `¬ ∧ ∨ ⊕`, parentheses around every binary
    /// subterm, none around unary or leaf terms.
    pub fn render(&self) -> String {
        match self {
            Term::True => "1".to_string(),
            Term::False => "0".to_string(),
            Term::Variable(i) => ((b'a' + *i as u8) as char).to_string(),
            Term::Not(p) => format!("\u{ac}{}", p.render()),
            Term::And(p, q) => format!("({} \u{2227} {})", p.render(), q.render()),
            Term::Or(p, q) => format!("({} \u{2228} {})", p.render(), q.render()),
            Term::Xor(p, q) => format!("({} \u{2295} {})", p.render(), q.render()),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Evaluates `term` for an explicit assignment of up to six Boolean inputs,
/// where `vs[i]` is the value of variable `i`. Reads a single bit of the
/// already-computed evaluation vector rather than re-walking the term.
///
/// Panics if more than [`MAX_VARS`] values are supplied.
pub fn eval(term: &Term, vs: &[bool]) -> bool {
    assert!(vs.len() <= MAX_VARS, "too many truth values");
    let mut idx: u32 = 0;
    for (i, v) in vs.iter().enumerate() {
        if *v {
            idx |= 1 << i;
        }
    }
    (term.evaluation() >> idx) & 1 != 0
}
