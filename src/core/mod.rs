//! Formula core: validate, normalize, evaluate.
//! Nothing in here mutates the variable environment.

pub mod chars;
#[macro_use]
pub mod debug; // gated debug logging (FORMULAE_DEBUG=1) provides debug_log! macro
pub mod diagnostics;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod normalizer;
pub mod syntax;
pub mod token;
pub mod variables;

pub use error::{ErrorKind, EvalError, FormulaError, SyntaxError};
pub use token::TokenKind;
pub use variables::{Bindings, Variables};

/// Full pipeline. Empty or all-space input is 0 without any checking.
pub fn compute(formula: &str, vars: &dyn Bindings) -> Result<f64, FormulaError> {
    if chars::are_all_characters_spaces(formula) {
        return Ok(0.0);
    }
    syntax::check_syntax(formula, vars)?;
    let normalized = normalizer::normalize(formula, vars)?;
    Ok(evaluator::evaluate(&normalized)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_zero() {
        assert_eq!(compute("  \t", &Variables::new()), Ok(0.0));
    }

    #[test]
    fn structural_errors_keep_original_positions() {
        let err = compute("2 * (+)", &Variables::new()).unwrap_err();
        assert_eq!(
            err,
            FormulaError::Syntax(SyntaxError::new(ErrorKind::AloneOperators, vec![5]))
        );
    }

    #[test]
    fn variables_feed_the_evaluator() {
        let mut vars = Variables::new();
        vars.set("r", -2.0);
        assert_eq!(compute("r^2", &vars), Ok(4.0));
        assert_eq!(compute("-r", &vars), Ok(2.0));
        assert_eq!(compute("1 - r", &vars), Ok(3.0));
    }
}
