//! Character classes of the formula grammar.
//! Everything here is ASCII-only; `is_digit` never consults the locale.

/// Binary operators, ordered by ascending evaluation priority.
pub const OPERATORS: &str = "%+-*/^";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterKind {
    Parenthesis,
    SquareBracket,
}

pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(c)
}

/// `+` and `-`, the only operators allowed in unary position.
pub fn is_sign(c: char) -> bool {
    c == '+' || c == '-'
}

pub fn is_opening_delimiter(c: char) -> bool {
    c == '(' || c == '['
}

pub fn is_closing_delimiter(c: char) -> bool {
    c == ')' || c == ']'
}

pub fn is_parenthesis(c: char) -> bool {
    c == '(' || c == ')'
}

pub fn is_square_bracket(c: char) -> bool {
    c == '[' || c == ']'
}

pub fn is_delimiter(c: char) -> bool {
    is_parenthesis(c) || is_square_bracket(c)
}

pub fn delimiter_kind(c: char) -> Option<DelimiterKind> {
    if is_parenthesis(c) {
        Some(DelimiterKind::Parenthesis)
    } else if is_square_bracket(c) {
        Some(DelimiterKind::SquareBracket)
    } else {
        None
    }
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Characters identifiers are made of.
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Empty input counts as all spaces.
pub fn are_all_characters_spaces(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Maximal run of identifier characters starting at `start` (possibly empty).
pub fn longest_alpha_run(chars: &[char], start: usize) -> String {
    chars
        .iter()
        .skip(start)
        .take_while(|c| is_identifier_char(**c))
        .collect()
}
