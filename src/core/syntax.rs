//! Structural checks run on the raw formula, before any normalization.
//!
//! The checks form an ordered bank: later checks assume the earlier ones passed,
//! and `check_syntax` reports the first one that fails. The operator and bracket
//! adjacency checks look at the non-whitespace characters only, but every
//! reported position indexes the original formula.

use crate::core::chars::{
    are_all_characters_spaces, is_closing_delimiter, is_delimiter, is_digit, is_identifier_char,
    is_opening_delimiter, is_operator, is_parenthesis, is_sign, longest_alpha_run,
};
use crate::core::error::{ErrorKind, SyntaxError, SyntaxErrorIndexes};
use crate::core::variables::Bindings;

pub type Check = fn(&[char], &dyn Bindings) -> Option<SyntaxErrorIndexes>;

pub const CHECKS: [(ErrorKind, Check); 8] = [
    (ErrorKind::UnrecognizedCharacters, unrecognized_characters),
    (ErrorKind::UnknownIdentifiers, unknown_identifiers),
    (ErrorKind::UnmatchedDelimiters, unmatched_delimiters),
    (ErrorKind::MultipleOperators, multiple_operators),
    (ErrorKind::EmptyDelimiters, empty_delimiters),
    (ErrorKind::AloneOperators, alone_operators),
    (ErrorKind::CommasOutsideNumber, commas_outside_number),
    (ErrorKind::MultipleCommas, multiple_commas),
];

fn non_empty(indexes: SyntaxErrorIndexes) -> Option<SyntaxErrorIndexes> {
    if indexes.is_empty() {
        None
    } else {
        Some(indexes)
    }
}

/// Non-whitespace characters paired with their original position.
fn significant(chars: &[char]) -> Vec<(usize, char)> {
    chars
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .collect()
}

pub fn unrecognized_characters(chars: &[char], vars: &dyn Bindings) -> Option<SyntaxErrorIndexes> {
    let mut indexes = SyntaxErrorIndexes::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if is_identifier_char(c) {
            let identifier = longest_alpha_run(chars, i);
            if vars.lookup(&identifier).is_some() {
                i += identifier.len();
                continue;
            }
            // unbound identifiers are reported by `unknown_identifiers`
        } else if !(is_digit(c) || is_delimiter(c) || c == '.' || is_operator(c) || c.is_whitespace()) {
            indexes.push(i);
        }
        i += 1;
    }
    non_empty(indexes)
}

// Runs are read with whitespace dropped: "pi r" becomes the identifier "pir",
// which is exactly what the normalizer would later see.
pub fn unknown_identifiers(chars: &[char], vars: &dyn Bindings) -> Option<SyntaxErrorIndexes> {
    let sig = significant(chars);
    let compact: Vec<char> = sig.iter().map(|&(_, c)| c).collect();
    let mut indexes = SyntaxErrorIndexes::new();
    let mut n = 0;
    while n < compact.len() {
        if is_identifier_char(compact[n]) {
            let identifier = longest_alpha_run(&compact, n);
            if vars.lookup(&identifier).is_none() {
                indexes.push(sig[n].0);
            }
            n += identifier.len();
        } else {
            n += 1;
        }
    }
    non_empty(indexes)
}

pub fn unmatched_delimiters(chars: &[char], _vars: &dyn Bindings) -> Option<SyntaxErrorIndexes> {
    let mut parentheses: Vec<usize> = Vec::new();
    let mut brackets: Vec<usize> = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        if !is_delimiter(c) {
            continue;
        }
        let open = if is_parenthesis(c) { &mut parentheses } else { &mut brackets };
        if is_opening_delimiter(c) {
            open.push(i);
        } else if open.pop().is_none() {
            return Some(vec![i]);
        }
    }

    let mut residual: SyntaxErrorIndexes = parentheses.into_iter().chain(brackets).collect();
    residual.sort_unstable();
    non_empty(residual)
}

pub fn multiple_operators(chars: &[char], _vars: &dyn Bindings) -> Option<SyntaxErrorIndexes> {
    let mut indexes = SyntaxErrorIndexes::new();
    for pair in significant(chars).windows(2) {
        let ((first_pos, first), (second_pos, second)) = (pair[0], pair[1]);
        // 3+-2 <=> 3-2 ; 3--2 <=> 3+2
        if is_operator(first) && is_operator(second) && !is_sign(second) {
            indexes.push(first_pos);
            indexes.push(second_pos);
        }
    }
    non_empty(indexes)
}

pub fn empty_delimiters(chars: &[char], _vars: &dyn Bindings) -> Option<SyntaxErrorIndexes> {
    let mut indexes = SyntaxErrorIndexes::new();
    for pair in significant(chars).windows(2) {
        let ((open_pos, open), (close_pos, close)) = (pair[0], pair[1]);
        if matches!((open, close), ('(', ')') | ('[', ']')) {
            indexes.push(open_pos);
            indexes.push(close_pos);
        }
    }
    non_empty(indexes)
}

// assumes delimiters match and no forbidden operator pair is left
pub fn alone_operators(chars: &[char], _vars: &dyn Bindings) -> Option<SyntaxErrorIndexes> {
    let sig = significant(chars);
    let mut indexes = SyntaxErrorIndexes::new();

    for (n, &(pos, c)) in sig.iter().enumerate() {
        if !is_operator(c) {
            continue;
        }
        let previous = n.checked_sub(1).map(|p| sig[p].1);
        let next = sig.get(n + 1).map(|&(_, c)| c);

        // only the formula start admits a unary sign, a group start admits nothing
        let misplaced_start = match previous {
            None => !is_sign(c),
            Some(p) => is_opening_delimiter(p),
        };
        let misplaced_end = next.map_or(true, is_closing_delimiter);

        if misplaced_start || misplaced_end {
            indexes.push(pos);
        }
    }
    non_empty(indexes)
}

// reads the raw text: "2 .5" is a stray dot
pub fn commas_outside_number(chars: &[char], _vars: &dyn Bindings) -> Option<SyntaxErrorIndexes> {
    let mut indexes = SyntaxErrorIndexes::new();

    for (pos, &c) in chars.iter().enumerate() {
        if c != '.' {
            continue;
        }
        // "2." is fine, the trailing dot needs no zero after it
        let attached = pos
            .checked_sub(1)
            .is_some_and(|p| is_digit(chars[p]) || chars[p] == '.');
        if !attached {
            indexes.push(pos);
        }
    }
    non_empty(indexes)
}

pub fn multiple_commas(chars: &[char], _vars: &dyn Bindings) -> Option<SyntaxErrorIndexes> {
    let mut indexes = SyntaxErrorIndexes::new();
    let mut first_comma: Option<usize> = None;

    // a run only ends at an operator, so "(1.5)(2.5)" is one run
    for (pos, &c) in chars.iter().enumerate() {
        if c == '.' {
            match first_comma {
                Some(first) => {
                    indexes.push(first);
                    indexes.push(pos);
                }
                None => first_comma = Some(pos),
            }
        } else if is_operator(c) {
            first_comma = None;
        }
    }
    non_empty(indexes)
}

pub fn is_syntax_correct(formula: &str, vars: &dyn Bindings) -> bool {
    check_syntax(formula, vars).is_ok()
}

/// Runs the bank in order and reports the first failing check.
pub fn check_syntax(formula: &str, vars: &dyn Bindings) -> Result<(), SyntaxError> {
    if are_all_characters_spaces(formula) {
        return Ok(());
    }
    let chars: Vec<char> = formula.chars().collect();
    for (kind, check) in CHECKS {
        if let Some(indexes) = check(&chars, vars) {
            crate::debug_log!("syntax: {:?} at {:?} in {:?}", kind, indexes, formula);
            return Err(SyntaxError::new(kind, indexes));
        }
    }
    Ok(())
}
