// src/core/token.rs
use crate::core::chars::{is_closing_delimiter, is_opening_delimiter, is_sign, DelimiterKind, OPERATORS};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literal text, possibly carrying a unary sign
    Number(String),

    // One of "%+-*/^"
    Operator(char),

    // ( ) [ ]
    Delimiter(char, DelimiterKind),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub fn number(text: impl Into<String>, position: usize) -> Self {
        Self::new(TokenKind::Number(text.into()), position)
    }

    pub fn operator(&self) -> Option<char> {
        match self.kind {
            TokenKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    pub fn number_text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Number(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_delimiter(&self) -> bool {
        matches!(self.kind, TokenKind::Delimiter(..))
    }

    pub fn is_opening(&self) -> bool {
        matches!(self.kind, TokenKind::Delimiter(c, _) if is_opening_delimiter(c))
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.kind, TokenKind::Delimiter(c, _) if is_closing_delimiter(c))
    }

    pub fn is_sign(&self) -> bool {
        self.operator().is_some_and(is_sign)
    }

    /// 1 + index in `OPERATORS` for operators, 0 for everything else.
    pub fn priority(&self) -> usize {
        self.operator()
            .and_then(|op| OPERATORS.find(op))
            .map_or(0, |index| index + 1)
    }

    /// Source text of the token, used to re-stringify token spans.
    pub fn lexeme(&self) -> String {
        match &self.kind {
            TokenKind::Number(text) => text.clone(),
            TokenKind::Operator(c) | TokenKind::Delimiter(c, _) => c.to_string(),
        }
    }
}

/// Concatenates the lexemes of a token span back into a formula.
pub fn stringify(tokens: &[Token]) -> String {
    tokens.iter().map(Token::lexeme).collect()
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Number(_) => "number",
            TokenKind::Operator(_) => "operator",
            TokenKind::Delimiter(_, DelimiterKind::Parenthesis) => "parenthesis",
            TokenKind::Delimiter(_, DelimiterKind::SquareBracket) => "square bracket",
        };
        write!(f, "{}", name)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TokenKind::Number(text) => write!(f, "Number({}) @{}", text, self.position),
            TokenKind::Operator(op) => write!(f, "Operator('{}') @{}", op, self.position),
            TokenKind::Delimiter(c, kind) => write!(f, "Delimiter('{}', {:?}) @{}", c, kind, self.position),
        }
    }
}
