use std::fmt;

use serde::Serialize;

/// Positions into the original formula, in character units.
pub type SyntaxErrorIndexes = Vec<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    UnrecognizedCharacters,
    UnknownIdentifiers,
    UnmatchedDelimiters,
    MultipleOperators,
    EmptyDelimiters,
    AloneOperators,
    CommasOutsideNumber,
    MultipleCommas,
    DivisionByZero,
    NonIntegerModulo,
}

impl ErrorKind {
    /// Detected before any numeric work, always with positions.
    pub fn is_structural(self) -> bool {
        !matches!(self, ErrorKind::DivisionByZero | ErrorKind::NonIntegerModulo)
    }

    /// User-facing message; `count` is the number of reported positions.
    pub fn message(self, count: usize) -> String {
        let plural = count > 1;
        let suffix = if plural { "s" } else { "" };
        match self {
            ErrorKind::UnrecognizedCharacters => format!("Unrecognized character{suffix}"),
            ErrorKind::UnknownIdentifiers => format!("Unknown identifier{suffix}"),
            ErrorKind::UnmatchedDelimiters if plural => {
                "Unmatched parenthesises and/or square brackets".to_string()
            }
            ErrorKind::UnmatchedDelimiters => "Unmatched parenthesis or square bracket".to_string(),
            ErrorKind::MultipleOperators => "Multiple operators side-by-side".to_string(),
            ErrorKind::EmptyDelimiters if plural => {
                "Empty parenthesises and/or square brackets".to_string()
            }
            ErrorKind::EmptyDelimiters => "Empty parenthesis or square bracket".to_string(),
            ErrorKind::AloneOperators => format!("Unexpected operator{suffix}"),
            ErrorKind::CommasOutsideNumber => format!("Comma{suffix} outside a number"),
            ErrorKind::MultipleCommas => "Multiple commas in the same number".to_string(),
            ErrorKind::DivisionByZero => "A division by zero occurred".to_string(),
            ErrorKind::NonIntegerModulo => "A modulo with non-integer values occurred".to_string(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message(1))
    }
}

/// First failing structural check of a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub indexes: SyntaxErrorIndexes,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, indexes: SyntaxErrorIndexes) -> Self {
        Self { kind, indexes }
    }

    pub fn message(&self) -> String {
        self.kind.message(self.indexes.len())
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions: Vec<String> = self.indexes.iter().map(usize::to_string).collect();
        write!(f, "{} (at {})", self.message(), positions.join(", "))
    }
}

impl std::error::Error for SyntaxError {}

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    DivisionByZero,
    NonIntegerModulo,
    /// Malformed post-normalization state; never a user error.
    Contract(String),
}

impl EvalError {
    pub fn contract(message: impl Into<String>) -> Self {
        EvalError::Contract(message.into())
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            EvalError::DivisionByZero => Some(ErrorKind::DivisionByZero),
            EvalError::NonIntegerModulo => Some(ErrorKind::NonIntegerModulo),
            EvalError::Contract(_) => None,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DivisionByZero => write!(f, "{}", ErrorKind::DivisionByZero),
            EvalError::NonIntegerModulo => write!(f, "{}", ErrorKind::NonIntegerModulo),
            EvalError::Contract(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for EvalError {}

/// Anything `core::compute` can fail with.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaError {
    Syntax(SyntaxError),
    Eval(EvalError),
}

impl FormulaError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            FormulaError::Syntax(err) => Some(err.kind),
            FormulaError::Eval(err) => err.kind(),
        }
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::Syntax(err) => write!(f, "{}", err),
            FormulaError::Eval(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for FormulaError {}

impl From<SyntaxError> for FormulaError {
    fn from(err: SyntaxError) -> Self {
        FormulaError::Syntax(err)
    }
}

impl From<EvalError> for FormulaError {
    fn from(err: EvalError) -> Self {
        FormulaError::Eval(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_and_plural_messages() {
        assert_eq!(ErrorKind::AloneOperators.message(1), "Unexpected operator");
        assert_eq!(ErrorKind::AloneOperators.message(3), "Unexpected operators");
        assert_eq!(ErrorKind::CommasOutsideNumber.message(2), "Commas outside a number");
        assert_eq!(
            ErrorKind::UnmatchedDelimiters.message(2),
            "Unmatched parenthesises and/or square brackets"
        );
        assert_eq!(ErrorKind::EmptyDelimiters.message(1), "Empty parenthesis or square bracket");
    }

    #[test]
    fn syntax_error_display() {
        let err = SyntaxError::new(ErrorKind::MultipleOperators, vec![1, 2]);
        assert_eq!(format!("{}", err), "Multiple operators side-by-side (at 1, 2)");
    }

    #[test]
    fn eval_error_display() {
        assert_eq!(format!("{}", EvalError::DivisionByZero), "A division by zero occurred");
        assert_eq!(
            format!("{}", EvalError::contract("lone token")),
            "Internal error: lone token"
        );
    }

    #[test]
    fn structural_split() {
        assert!(ErrorKind::EmptyDelimiters.is_structural());
        assert!(!ErrorKind::NonIntegerModulo.is_structural());
        assert_eq!(EvalError::contract("x").kind(), None);
    }
}
