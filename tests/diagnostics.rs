use formulae::core::diagnostics::{highlight_line, render};
use formulae::core::syntax::check_syntax;
use formulae::core::Variables;

fn diagnostic(formula: &str) -> String {
    let err = check_syntax(formula, &Variables::new()).unwrap_err();
    render(&err.message(), formula, &err.indexes)
}

#[test]
fn alone_operator_points_inside_group() {
    insta::assert_snapshot!(diagnostic("2 * (+)"), @r###"
    Unexpected operator
    2 * (+)
    ~~~~~^~
    "###);
}

#[test]
fn operator_pair_is_underlined_in_original_text() {
    insta::assert_snapshot!(diagnostic("3 * / 2"), @r###"
    Multiple operators side-by-side
    3 * / 2
    ~~^~^~~
    "###);
}

#[test]
fn every_open_delimiter_is_reported() {
    insta::assert_snapshot!(diagnostic("[(1+2"), @r###"
    Unmatched parenthesises and/or square brackets
    [(1+2
    ^^~~~
    "###);
}

#[test]
fn missing_argument_caret() {
    assert_eq!(highlight_line("set", &[3]), "~~~^");
}
