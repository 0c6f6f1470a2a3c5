//! Partial truth tables and their encoding into an `(mask, eval)` pair.
//!
//! A [`TruthTable`] holds one [`TruthValue`] per possible 6-variable
//! assignment. [`TruthTable::evaluation`] converts it into the two 64-bit
//! words the enumerator needs: `mask` marks the defined positions, `eval`
//! gives the values required there. A candidate term matches the table iff
//! `term.evaluation() & mask == eval`.

use std::fmt;

use crate::error::TableError;
use crate::term::{MAX_VARS, VAR_BITS};

/// Number of cells in a [`TruthTable`]: one per 6-bit assignment.
pub const TABLE_SIZE: usize = 1 << MAX_VARS;

/// A single truth-table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruthValue {
    Undefined,
    False,
    True,
}

impl TruthValue {
    fn canonical_char(self) -> char {
        match self {
            TruthValue::Undefined => 'x',
            TruthValue::False => '0',
            TruthValue::True => '1',
        }
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_char())
    }
}

/// Parses a single token as a [`TruthValue`]. Accepts the canonical
/// single-character encoding (`0`, `1`, `x`) as well as the longer aliases
/// `f`/`F`/`false`/`FALSE`/`False`, `t`/`T`/`true`/`TRUE`/`True`, and
/// `undefined`/`UNDEFINED`/`Undefined`. Returns `None` for anything else.
pub fn parse_value(token: &str) -> Option<TruthValue> {
    Some(match token {
        "x" | "undefined" | "UNDEFINED" | "Undefined" => TruthValue::Undefined,
        "0" | "f" | "F" | "false" | "FALSE" | "False" => TruthValue::False,
        "1" | "t" | "T" | "true" | "TRUE" | "True" => TruthValue::True,
        _ => return None,
    })
}

/// A full table of 64 [`TruthValue`] cells, indexed `0 <= idx < 64` so that
/// for an assignment where variable `i` has value `vᵢ`,
/// `idx = Σ vᵢ · 2^i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthTable {
    cells: [TruthValue; TABLE_SIZE],
}

impl Default for TruthTable {
    fn default() -> Self {
        Self {
            cells: [TruthValue::Undefined; TABLE_SIZE],
        }
    }
}

impl TruthTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, idx: usize) -> TruthValue {
        self.cells[idx]
    }

    pub fn set(&mut self, idx: usize, value: TruthValue) {
        self.cells[idx] = value;
    }

    /// Computes the `(mask, eval)` encoding of this table. For every bit
    /// position `k`, the table index `idx(k)` is reassembled from
    /// `VAR_BITS` (`idx(k) = Σ ((VAR_BITS[i] >> k) & 1) · 2^i`), then:
    /// - `Undefined` contributes 0 to both `mask` and `eval`,
    /// - `False` sets bit `k` of `mask` only,
    /// - `True` sets bit `k` of both `mask` and `eval`.
    pub fn evaluation(&self) -> (u64, u64) {
        let mut mask = 0u64;
        let mut eval = 0u64;
        for k in 0..64u32 {
            let mut idx = 0usize;
            for j in 0..MAX_VARS {
                idx |= (((VAR_BITS[j] >> k) & 1) as usize) << j;
            }
            match self.cells[idx] {
                TruthValue::Undefined => {}
                TruthValue::False => mask |= 1 << k,
                TruthValue::True => {
                    eval |= 1 << k;
                    mask |= 1 << k;
                }
            }
        }
        (mask, eval)
    }

    /// Number of variables actually exercised by the table: the bit-length
    /// of the highest-indexed defined cell, scanned from the end backward.
    /// Returns 0 if the table is entirely undefined. Used only for
    /// pretty-printing, never by the enumerator.
    pub fn num_vars(&self) -> usize {
        for i in (0..TABLE_SIZE).rev() {
            if self.cells[i] != TruthValue::Undefined {
                return bit_len(i);
            }
        }
        0
    }

    /// Renders a header row of uppercase variable letters followed by
    /// `OUTPUT`, then one row per assignment over `0..num_vars()`.
    pub fn format_table(&self) -> String {
        let n = self.num_vars();
        let mut columns: Vec<String> = (0..n).map(|j| ((b'A' + j as u8) as char).to_string()).collect();
        columns.push("OUTPUT".to_string());
        let header = columns.join(" ");

        let mut out = String::new();
        out.push_str(&header);
        out.push('\n');
        out.push_str(&"-".repeat(header.len()));
        out.push('\n');
        for i in 0..(1usize << n) {
            let mut row: Vec<String> = (0..n).map(|j| ((i >> j) & 1).to_string()).collect();
            row.push(self.cells[i].to_string());
            out.push_str(&row.join(" "));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.cells {
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Parses a textual truth table. At most [`TABLE_SIZE`] characters; missing
/// trailing cells default to [`TruthValue::Undefined`]. Each character is
/// parsed individually via [`parse_value`] (so only the single-character
/// aliases are ever reachable through this entry point).
pub fn parse_table(s: &str) -> Result<TruthTable, TableError> {
    let len = s.chars().count();
    if len > TABLE_SIZE {
        return Err(TableError::InvalidLength { len });
    }
    let mut table = TruthTable::new();
    for (i, c) in s.chars().enumerate() {
        let token = c.to_string();
        let value = parse_value(&token).ok_or_else(|| TableError::InvalidToken {
            index: i,
            token,
        })?;
        table.set(i, value);
    }
    Ok(table)
}

fn bit_len(x: usize) -> usize {
    if x == 0 {
        0
    } else {
        (usize::BITS - x.leading_zeros()) as usize
    }
}
