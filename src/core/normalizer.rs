//! Rewrites a syntactically valid formula into the flat form the evaluator reads.

use crate::core::chars::{
    is_closing_delimiter, is_identifier_char, is_opening_delimiter, is_operator, is_sign,
    longest_alpha_run,
};
use crate::core::error::EvalError;
use crate::core::evaluator::operand_text;
use crate::core::variables::Bindings;

pub fn remove_spaces(formula: &str) -> String {
    formula.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Substitutes every identifier run with the bare text of its bound value:
/// `x` -> `-2.0`. The sign is left to `simplify_operators` and the lexer.
pub fn replace_variables(formula: &str, vars: &dyn Bindings) -> Result<String, EvalError> {
    let chars: Vec<char> = formula.chars().collect();
    let mut out = String::with_capacity(formula.len());
    let mut i = 0;

    while i < chars.len() {
        if !is_identifier_char(chars[i]) {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let identifier = longest_alpha_run(&chars, i);
        let value = vars
            .lookup(&identifier)
            .ok_or_else(|| EvalError::contract(format!("unbound identifier '{}'", identifier)))?;
        out.push_str(&operand_text(value));
        i += identifier.len();
    }
    Ok(out)
}

/// `3(4)` -> `3*(4)`, `(4)[5]` -> `(4)*[5]`, `(5)7` -> `(5)*7`.
pub fn add_implicit_multiplication(formula: &str) -> String {
    let chars: Vec<char> = formula.chars().collect();
    if chars.len() < 4 {
        return formula.to_string();
    }

    let mut out = String::with_capacity(formula.len() + 4);
    out.push(chars[0]);
    for pair in chars.windows(2) {
        let (prev, c) = (pair[0], pair[1]);
        let before_group = is_opening_delimiter(c) && !is_opening_delimiter(prev) && !is_operator(prev);
        let after_group = is_closing_delimiter(prev) && !is_closing_delimiter(c) && !is_operator(c);
        if before_group || after_group {
            out.push('*');
        }
        out.push(c);
    }
    out
}

/// Collapses each run of `+`/`-` into one sign, then drops `+` where it is unary
/// at the start of the formula or of a group.
pub fn simplify_operators(formula: &str) -> String {
    let mut collapsed = String::with_capacity(formula.len());
    let mut minus_count: Option<usize> = None;

    for c in formula.chars() {
        if is_sign(c) {
            *minus_count.get_or_insert(0) += usize::from(c == '-');
            continue;
        }
        if let Some(count) = minus_count.take() {
            collapsed.push(if count % 2 == 0 { '+' } else { '-' });
        }
        collapsed.push(c);
    }
    if let Some(count) = minus_count {
        collapsed.push(if count % 2 == 0 { '+' } else { '-' });
    }

    let mut out = String::with_capacity(collapsed.len());
    let mut prev: Option<char> = None;
    for c in collapsed.chars() {
        let useless_plus = c == '+' && prev.map_or(true, is_opening_delimiter);
        if !useless_plus {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

pub fn normalize(formula: &str, vars: &dyn Bindings) -> Result<String, EvalError> {
    let compact = remove_spaces(formula);
    let substituted = replace_variables(&compact, vars)?;
    let explicit = add_implicit_multiplication(&substituted);
    let simplified = simplify_operators(&explicit);
    crate::debug_log!(
        "normalize: {:?} -> {:?} -> {:?} -> {:?}",
        compact,
        substituted,
        explicit,
        simplified
    );
    Ok(simplified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variables::Variables;
    use std::collections::HashMap;

    #[test]
    fn strips_every_kind_of_whitespace() {
        assert_eq!(remove_spaces(" 5 %\t2 "), "5%2");
    }

    #[test]
    fn substitutes_bound_values() {
        let mut vars = HashMap::new();
        vars.insert("x".to_string(), 2.5);
        vars.insert("neg".to_string(), -2.0);
        assert_eq!(replace_variables("x*3", &vars).unwrap(), "2.5*3");
        assert_eq!(replace_variables("3-neg", &vars).unwrap(), "3--2.0");
        assert_eq!(replace_variables("2neg", &vars).unwrap(), "2-2.0");
        assert_eq!(replace_variables("x%2", &vars).unwrap(), "2.5%2");
        assert!(matches!(
            replace_variables("y", &vars),
            Err(EvalError::Contract(_))
        ));
    }

    #[test]
    fn constants_use_full_precision() {
        let vars = Variables::new();
        assert_eq!(replace_variables("pi", &vars).unwrap(), "3.141592653589793");
    }

    #[test]
    fn implicit_multiplication_at_group_boundaries() {
        assert_eq!(add_implicit_multiplication("3(4)"), "3*(4)");
        assert_eq!(add_implicit_multiplication("(4)[5]"), "(4)*[5]");
        assert_eq!(add_implicit_multiplication("(5)7"), "(5)*7");
        assert_eq!(add_implicit_multiplication("((1))"), "((1))");
        assert_eq!(add_implicit_multiplication("2+(3)-4"), "2+(3)-4");
        assert_eq!(add_implicit_multiplication("(2)"), "(2)");
    }

    #[test]
    fn sign_runs_collapse() {
        assert_eq!(simplify_operators("3+-2"), "3-2");
        assert_eq!(simplify_operators("3--2"), "3+2");
        assert_eq!(simplify_operators("--3"), "3");
        assert_eq!(simplify_operators("(+3)*[+-1]"), "(3)*[-1]");
        assert_eq!(simplify_operators("2*+3"), "2*+3");
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let vars = Variables::new();
        for formula in ["3 (4)", "-(2+3)", "--[1]+ +2", "2*pi(1)", "7 % 4 + 1"] {
            let once = normalize(formula, &vars).unwrap();
            assert_eq!(normalize(&once, &vars).unwrap(), once, "formula {formula}");
        }
    }
}
