//! Evaluation front-end shared by the shell and the `eval` / `check` subcommands.

use serde::Serialize;

use crate::core::diagnostics::{print_eval_error, print_syntax_error};
use crate::core::error::{ErrorKind, FormulaError};
use crate::core::evaluator::format_number;
use crate::core::syntax::check_syntax;
use crate::core::variables::Bindings;
use crate::core::compute;

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub kind: Option<ErrorKind>,
    pub message: String,
    pub indexes: Vec<usize>,
}

impl From<&FormulaError> for ErrorReport {
    fn from(err: &FormulaError) -> Self {
        match err {
            FormulaError::Syntax(e) => Self {
                kind: Some(e.kind),
                message: e.message(),
                indexes: e.indexes.clone(),
            },
            FormulaError::Eval(e) => Self { kind: e.kind(), message: e.to_string(), indexes: Vec::new() },
        }
    }
}

/// One JSON line per formula with `--json`.
#[derive(Debug, Serialize)]
pub struct EvalReport<'a> {
    pub formula: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl<'a> EvalReport<'a> {
    pub fn new(formula: &'a str, outcome: &Result<f64, FormulaError>) -> Self {
        match outcome {
            Ok(value) => Self { formula, value: Some(*value), error: None },
            Err(err) => Self { formula, value: None, error: Some(err.into()) },
        }
    }
}

pub fn print_formula_error(formula: &str, err: &FormulaError) {
    match err {
        FormulaError::Syntax(e) => print_syntax_error(formula, e),
        FormulaError::Eval(e) => print_eval_error(e),
    }
}

/// Prints the value or the diagnostic; returns whether evaluation succeeded.
pub fn evaluate_line(formula: &str, vars: &dyn Bindings, json: bool) -> bool {
    let outcome = compute(formula, vars);
    if json {
        match serde_json::to_string(&EvalReport::new(formula, &outcome)) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("json encode error: {}", e),
        }
    } else {
        match &outcome {
            Ok(value) => println!("{}", format_number(*value)),
            Err(err) => print_formula_error(formula, err),
        }
    }
    outcome.is_ok()
}

/// Evaluates every formula, even after a failure.
pub fn eval_all(formulas: &[String], vars: &dyn Bindings, json: bool) -> bool {
    formulas
        .iter()
        .map(|f| evaluate_line(f, vars, json))
        .fold(true, |all, ok| all && ok)
}

pub fn check(formula: &str, vars: &dyn Bindings, json: bool) -> bool {
    let outcome = check_syntax(formula, vars);
    if json {
        let report = match &outcome {
            Ok(()) => serde_json::json!({ "formula": formula, "ok": true }),
            Err(e) => serde_json::json!({
                "formula": formula,
                "ok": false,
                "kind": e.kind,
                "message": e.message(),
                "indexes": e.indexes,
            }),
        };
        println!("{}", report);
    } else {
        match &outcome {
            Ok(()) => println!("ok"),
            Err(e) => print_syntax_error(formula, e),
        }
    }
    outcome.is_ok()
}
