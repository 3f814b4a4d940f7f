// lexer.rs
//! Splits a normalized formula into number, operator and delimiter tokens.

use crate::core::chars::{delimiter_kind, is_digit, is_operator, is_sign};
use crate::core::token::{Token, TokenKind};

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    literal: String,
    literal_start: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            literal: String::new(),
            literal_start: 0,
            tokens: Vec::new(),
        }
    }

    /// Single left-to-right scan. Operators and delimiters flush the pending
    /// literal and become one-character tokens; everything else accumulates.
    pub fn tokenize(mut self) -> Vec<Token> {
        while let Some(&c) = self.chars.get(self.pos) {
            if is_operator(c) && self.starts_signed_literal(c) {
                self.push_literal_char(c);
            } else if is_operator(c) {
                self.flush_literal();
                self.tokens.push(Token::new(TokenKind::Operator(c), self.pos));
            } else if let Some(kind) = delimiter_kind(c) {
                self.flush_literal();
                self.tokens.push(Token::new(TokenKind::Delimiter(c, kind), self.pos));
            } else {
                self.push_literal_char(c);
            }
            self.pos += 1;
        }
        self.flush_literal();
        self.tokens
    }

    /// A sign in unary position directly followed by a literal belongs to it.
    fn starts_signed_literal(&self, c: char) -> bool {
        if !is_sign(c) || !self.literal.is_empty() {
            return false;
        }
        let unary = match self.tokens.last() {
            None => true,
            Some(prev) => prev.operator().is_some() || prev.is_opening(),
        };
        // letters only survive normalization as "inf" / "NaN" results
        let next_is_numeric = self
            .chars
            .get(self.pos + 1)
            .is_some_and(|&n| is_digit(n) || n == '.' || n.is_ascii_alphabetic());
        unary && next_is_numeric
    }

    fn push_literal_char(&mut self, c: char) {
        if self.literal.is_empty() {
            self.literal_start = self.pos;
        }
        self.literal.push(c);
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            let text = std::mem::take(&mut self.literal);
            self.tokens.push(Token::number(text, self.literal_start));
        }
    }
}

pub fn tokenize(formula: &str) -> Vec<Token> {
    Lexer::new(formula).tokenize()
}
