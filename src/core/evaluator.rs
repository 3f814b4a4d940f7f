// evaluator.rs
//! Recursive token-reduction evaluator for normalized formulas.
//!
//! There is no tree: the most nested group is cut out, evaluated as a fresh
//! formula and spliced back as a number, until no delimiter is left. The flat
//! remainder is then reduced one binary operation at a time, always picking the
//! leftmost operator of highest priority (`%` < `+` < `-` < `*` < `/` < `^`).

use crate::core::error::EvalError;
use crate::core::lexer::tokenize;
use crate::core::token::{stringify, Token};

/// Decimal text of a value, as shown to the user.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Decimal text of a computed or substituted value, as spliced into a formula.
/// It always carries a '.', so `%` never takes it for an integer literal.
pub fn operand_text(value: f64) -> String {
    let text = format_number(value);
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

fn parse_number(text: &str) -> Result<f64, EvalError> {
    text.parse::<f64>()
        .map_err(|_| EvalError::contract(format!("'{}' is not a number", text)))
}

fn operand<'a>(tokens: &'a [Token], index: usize) -> Result<&'a str, EvalError> {
    tokens
        .get(index)
        .and_then(Token::number_text)
        .ok_or_else(|| EvalError::contract(format!("missing operand at token {}", index)))
}

/// Evaluates a normalized formula (no whitespace, no identifiers).
pub fn evaluate(formula: &str) -> Result<f64, EvalError> {
    let mut tokens = tokenize(formula);
    if tokens.is_empty() {
        return Err(EvalError::contract("empty formula"));
    }

    while let Some((open, close)) = most_nested_span(&tokens)? {
        resolve_group(&mut tokens, open, close)?;
    }

    while tokens.len() > 1 {
        reduce_once(&mut tokens)?;
    }

    match tokens[0].number_text() {
        Some(text) => parse_number(text),
        None => Err(EvalError::contract(format!("lone token '{}'", tokens[0].lexeme()))),
    }
}

/// Token indexes of the first most nested opening delimiter and its closing one.
pub fn most_nested_span(tokens: &[Token]) -> Result<Option<(usize, usize)>, EvalError> {
    if !tokens.iter().any(Token::is_delimiter) {
        return Ok(None);
    }

    let mut level: i64 = 0;
    let levels: Vec<i64> = tokens
        .iter()
        .map(|token| {
            if token.is_opening() {
                level += 1;
            } else if token.is_closing() {
                level -= 1;
            }
            level
        })
        .collect();

    let max = levels.iter().copied().max().unwrap_or(0);
    let open = levels
        .iter()
        .position(|&l| l == max)
        .filter(|&i| tokens[i].is_opening())
        .ok_or_else(|| EvalError::contract("unbalanced delimiters"))?;
    let close = levels[open..]
        .iter()
        .position(|&l| l < max)
        .map(|offset| open + offset)
        .filter(|&i| tokens[i].is_closing())
        .ok_or_else(|| EvalError::contract("unclosed group"))?;

    Ok(Some((open, close)))
}

/// Replaces `tokens[open..=close]` with the value of the group interior. A unary
/// sign right before the group is folded into that value.
fn resolve_group(tokens: &mut Vec<Token>, open: usize, close: usize) -> Result<(), EvalError> {
    let interior = stringify(&tokens[open + 1..close]);
    let mut value = evaluate(&interior)?;
    let mut start = open;

    if let Some(sign) = unary_sign_before(tokens, open) {
        if sign == '-' {
            value = -value;
        }
        start = open - 1;
    }

    let text = operand_text(value);
    crate::debug_log!("group: ({}) = {}", interior, text);
    let position = tokens[start].position;
    tokens.splice(start..=close, [Token::number(text, position)]);
    Ok(())
}

fn unary_sign_before(tokens: &[Token], index: usize) -> Option<char> {
    let sign_index = index.checked_sub(1)?;
    let sign = tokens[sign_index].operator().filter(|_| tokens[sign_index].is_sign())?;
    let unary = match sign_index.checked_sub(1) {
        None => true,
        Some(prev) => tokens[prev].operator().is_some() || tokens[prev].is_opening(),
    };
    unary.then_some(sign)
}

/// Leftmost token with the highest priority.
pub fn max_priority_operator_index(tokens: &[Token]) -> Option<usize> {
    let max = tokens.iter().map(Token::priority).max()?;
    if max == 0 {
        return None;
    }
    tokens.iter().position(|t| t.priority() == max)
}

/// Applies one binary operation and splices its result over `lhs op rhs`.
pub fn reduce_once(tokens: &mut Vec<Token>) -> Result<(), EvalError> {
    let index = max_priority_operator_index(tokens)
        .ok_or_else(|| EvalError::contract(format!("no operator in '{}'", stringify(tokens))))?;
    let lhs_index = index
        .checked_sub(1)
        .ok_or_else(|| EvalError::contract("operator without left operand"))?;
    let op = tokens[index]
        .operator()
        .ok_or_else(|| EvalError::contract("expected an operator"))?;

    let lhs = operand(tokens, lhs_index)?;
    let rhs = operand(tokens, index + 1)?;
    let result = apply(op, lhs, rhs)?;
    crate::debug_log!("reduce: {} {} {} = {}", lhs, op, rhs, result);

    let position = tokens[lhs_index].position;
    tokens.splice(lhs_index..=index + 1, [Token::number(result, position)]);
    Ok(())
}

fn is_integral(text: &str) -> Result<bool, EvalError> {
    Ok(!text.contains('.') && parse_number(text)?.is_finite())
}

/// Applies `op` to two number texts; returns the text of the result.
pub fn apply(op: char, lhs: &str, rhs: &str) -> Result<String, EvalError> {
    if op == '%' {
        return modulo(lhs, rhs);
    }

    let (a, b) = (parse_number(lhs)?, parse_number(rhs)?);
    let value = match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        '/' if b == 0.0 => return Err(EvalError::DivisionByZero),
        '/' => a / b,
        '^' => a.powf(b),
        other => return Err(EvalError::contract(format!("unknown operator '{}'", other))),
    };
    Ok(operand_text(value))
}

// truncating remainder, sign follows the left operand
fn modulo(lhs: &str, rhs: &str) -> Result<String, EvalError> {
    if !is_integral(lhs)? || !is_integral(rhs)? {
        return Err(EvalError::NonIntegerModulo);
    }
    if parse_number(rhs)? == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    match (lhs.parse::<i64>(), rhs.parse::<i64>()) {
        (Ok(a), Ok(b)) => Ok(format!("{}.0", a.wrapping_rem(b))),
        _ => Ok(operand_text(parse_number(lhs)? % parse_number(rhs)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(formula: &str) -> f64 {
        evaluate(formula).unwrap()
    }

    #[test]
    fn custom_priority_table() {
        assert_eq!(eval("2+2"), 4.0);
        assert_eq!(eval("2*3+4"), 10.0);
        assert_eq!(eval("2+3*4"), 14.0);
        // '%' binds loosest: 4+1 is reduced first and its result is no literal
        assert_eq!(evaluate("7%4+1"), Err(EvalError::NonIntegerModulo));
        // '-' above '+': 1+(5-2)
        assert_eq!(eval("1+5-2"), 4.0);
        // '/' above '*'
        assert_eq!(eval("8*4/2"), 16.0);
    }

    #[test]
    fn leftmost_wins_among_equals() {
        assert_eq!(eval("2^3^2"), 64.0);
        assert_eq!(eval("10-2-3"), 5.0);
        assert_eq!(eval("16/4/2"), 2.0);
    }

    #[test]
    fn groups_resolve_innermost_first() {
        assert_eq!(eval("(1+1)*[2+2]"), 8.0);
        assert_eq!(eval("[2*(3+1)]^2"), 64.0);
        assert_eq!(eval("((5))"), 5.0);
    }

    #[test]
    fn signs_in_front_of_groups() {
        assert_eq!(eval("-(2+3)"), -5.0);
        assert_eq!(eval("2*-(1+1)"), -4.0);
        assert_eq!(eval("5-(1-4)"), 8.0);
        assert_eq!(eval("-[-(3)]"), 3.0);
    }

    #[test]
    fn modulo_rules() {
        assert_eq!(eval("2%3"), 2.0);
        assert_eq!(eval("-7%3"), -1.0);
        assert_eq!(eval("10%4"), 2.0);
        assert_eq!(evaluate("(1+1)%3"), Err(EvalError::NonIntegerModulo));
        assert_eq!(evaluate("2%3%2"), Err(EvalError::NonIntegerModulo));
        assert_eq!(evaluate("1.2%5"), Err(EvalError::NonIntegerModulo));
        assert_eq!(evaluate("4%2.0"), Err(EvalError::NonIntegerModulo));
        assert_eq!(evaluate("7%0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn division_by_exact_zero() {
        assert_eq!(evaluate("1/0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("1/(2-2)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("1/4"), 0.25);
    }

    #[test]
    fn leftover_operator_is_a_contract_violation() {
        assert!(matches!(evaluate("*"), Err(EvalError::Contract(_))));
        assert!(matches!(evaluate(""), Err(EvalError::Contract(_))));
        assert!(matches!(evaluate("2*"), Err(EvalError::Contract(_))));
    }

    #[test]
    fn nested_span_boundaries() {
        let tokens = tokenize("(1)+((2))");
        assert_eq!(most_nested_span(&tokens).unwrap(), Some((5, 7)));
        assert_eq!(most_nested_span(&tokenize("1+2")).unwrap(), None);
    }

    #[test]
    fn values_print_without_exponent() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1e21), "1000000000000000000000");
    }

    #[test]
    fn operand_text_always_has_a_dot() {
        assert_eq!(operand_text(5.0), "5.0");
        assert_eq!(operand_text(-2.0), "-2.0");
        assert_eq!(operand_text(0.25), "0.25");
        assert_eq!(operand_text(f64::INFINITY), "inf");
    }

    #[test]
    fn intermediate_results_carry_a_dot() {
        let mut tokens = tokenize("2+3");
        reduce_once(&mut tokens).unwrap();
        assert_eq!(stringify(&tokens), "5.0");
    }
}
