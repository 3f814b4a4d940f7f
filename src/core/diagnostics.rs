// src/core/diagnostics.rs
//! Position diagnostics drawn under the offending line.

use colored::Colorize;

use crate::core::error::{EvalError, SyntaxError};

/// `~` under every character, `^` under each reported position. A position equal
/// to the line length puts a `^` right after the last character.
pub fn highlight_line(text: &str, indexes: &[usize]) -> String {
    let len = text.chars().count();
    let mut line: String = (0..len)
        .map(|i| if indexes.contains(&i) { '^' } else { '~' })
        .collect();
    if indexes.contains(&len) {
        line.push('^');
    }
    line
}

/// Plain three-line block: title, text, highlight.
pub fn render(title: &str, text: &str, indexes: &[usize]) -> String {
    format!("{}\n{}\n{}", title, text, highlight_line(text, indexes))
}

pub fn print_diagnostic(title: &str, text: &str, indexes: &[usize]) {
    eprintln!("{} {}", "error:".bright_red().bold(), title.bright_white());
    eprintln!(" {} {}", "|".dimmed(), text);
    eprintln!(" {} {}", "|".dimmed(), highlight_line(text, indexes).bright_red());
}

pub fn print_syntax_error(formula: &str, err: &SyntaxError) {
    print_diagnostic(&err.message(), formula, &err.indexes);
}

pub fn print_eval_error(err: &EvalError) {
    match err {
        EvalError::Contract(msg) => {
            eprintln!("{} internal error: {}", "error:".bright_red().bold(), msg)
        }
        other => eprintln!("{} {}", "error:".bright_red().bold(), other),
    }
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "warn:".yellow().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carets_under_positions() {
        assert_eq!(highlight_line("(+)", &[1]), "~^~");
        assert_eq!(highlight_line("3*/2", &[2, 1, 2]), "~^^~");
    }

    #[test]
    fn caret_past_the_end() {
        assert_eq!(highlight_line("set", &[3]), "~~~^");
        assert_eq!(highlight_line("", &[]), "");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(highlight_line("é+€", &[2]), "~~^");
    }
}
