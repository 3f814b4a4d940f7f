use crate::commands::calc::print_formula_error;
use crate::core::error::FormulaError;
use crate::core::lexer::tokenize;
use crate::core::normalizer::normalize;
use crate::core::syntax::check_syntax;
use crate::core::variables::Bindings;

/// Normalized text of a valid formula and the tokens the evaluator starts from.
pub fn dump(formula: &str, vars: &dyn Bindings) -> Result<String, FormulaError> {
    check_syntax(formula, vars)?;
    let normalized = normalize(formula, vars)?;
    let mut out = format!("normalized: {}\n", normalized);
    for token in tokenize(&normalized) {
        out.push_str(&format!("{}\n", token));
    }
    Ok(out)
}

pub fn main(formula: &str, vars: &dyn Bindings) -> bool {
    match dump(formula, vars) {
        Ok(text) => {
            print!("{}", text);
            true
        }
        Err(err) => {
            print_formula_error(formula, &err);
            false
        }
    }
}
