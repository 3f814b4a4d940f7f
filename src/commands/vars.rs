//! set / reset / save / load / list / savelist.

use anyhow::Result;
use colored::Colorize;

use crate::commands::args::{check_arguments, parse_command, Arg, CommandLine, CommandName};
use crate::commands::store::{merge_entries, read_saved, write_saved};
use crate::commands::Session;
use crate::core::diagnostics::{print_diagnostic, print_eval_error, print_syntax_error, print_warning};
use crate::core::error::FormulaError;
use crate::core::evaluator::format_number;
use crate::core::variables::is_reserved_identifier;
use crate::core::compute;

/// Checks and runs a command line. Returns `Ok(false)` when the line is not a
/// command, `Ok(true)` once it was handled (diagnostics included).
pub fn run_command_line(session: &mut Session, line: &str) -> Result<bool> {
    let Some(cmd) = parse_command(line) else {
        return Ok(false);
    };
    let line_len = line.chars().count();
    if let Err(err) = check_arguments(&cmd, line_len, &session.vars, &session.save_file) {
        print_diagnostic(&err.message(), line, &err.indexes);
        return Ok(true);
    }
    execute(session, &cmd)?;
    Ok(true)
}

pub fn execute(session: &mut Session, cmd: &CommandLine) -> Result<()> {
    match cmd.name {
        CommandName::Set => set(session, &cmd.args),
        CommandName::Reset => reset(session, &cmd.args),
        CommandName::Save => save(session, &cmd.args),
        CommandName::Load => load(session, &cmd.args),
        CommandName::List => list(session),
        CommandName::Savelist => savelist(session),
    }
}

fn set(session: &mut Session, args: &[Arg]) -> Result<()> {
    let Some(name) = args.first() else {
        return Ok(());
    };
    let Some(value) = args.get(1) else {
        session.vars.set(name.text.clone(), 0.0);
        return Ok(());
    };

    match compute(&value.text, &session.vars) {
        Ok(result) => session.vars.set(name.text.clone(), result),
        Err(FormulaError::Syntax(err)) => {
            eprintln!("{} bad value syntax for '{}':", "err:".red().bold(), name.text);
            print_syntax_error(&value.text, &err);
        }
        Err(FormulaError::Eval(err)) => {
            print_eval_error(&err);
            print_warning(&format!(
                "failed to evaluate value, variable '{}' remains unchanged",
                name.text
            ));
        }
    }
    Ok(())
}

fn reset(session: &mut Session, args: &[Arg]) -> Result<()> {
    if args.is_empty() {
        session.vars.reset();
        return Ok(());
    }
    for arg in args {
        if session.vars.remove(&arg.text).is_none() {
            print_warning(&format!("'{}' is a constant and cannot be reset", arg.text));
        }
    }
    Ok(())
}

fn save(session: &mut Session, args: &[Arg]) -> Result<()> {
    let path = &session.save_file;
    if args.is_empty() {
        let all: Vec<(String, f64)> = session
            .vars
            .user_variables()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        return write_saved(path, &all);
    }

    let mut updates = Vec::new();
    for arg in args {
        if is_reserved_identifier(&arg.text) {
            print_warning(&format!(
                "'{}' is a constant and wasn't saved into '{}'",
                arg.text,
                path.display()
            ));
        } else if let Some(value) = session.vars.get(&arg.text) {
            updates.push((arg.text.clone(), value));
        }
    }
    let mut entries = if path.exists() { read_saved(path)? } else { Vec::new() };
    merge_entries(&mut entries, updates);
    write_saved(path, &entries)
}

fn load(session: &mut Session, args: &[Arg]) -> Result<()> {
    let path = session.save_file.clone();
    let entries = read_saved(&path)?;
    let wanted: Vec<&str> = args.iter().map(|a| a.text.as_str()).collect();
    let mut loaded: Vec<&str> = Vec::new();

    for (name, value) in &entries {
        if is_reserved_identifier(name) {
            crate::debug_log!("load: ignoring reserved name '{}' in {}", name, path.display());
            continue;
        }
        if wanted.is_empty() || wanted.contains(&name.as_str()) {
            session.vars.set(name.clone(), *value);
            loaded.push(name.as_str());
        }
    }

    for name in wanted.iter().filter(|w| !loaded.contains(*w)) {
        print_warning(&format!(
            "variable '{}' isn't saved in '{}', its value remains the same",
            name,
            path.display()
        ));
    }
    Ok(())
}

fn print_entry(name: &str, value: f64) {
    if is_reserved_identifier(name) {
        println!("{} {} = {}", "[Reserved]".dimmed(), name, format_number(value));
    } else {
        println!("{} = {}", name, format_number(value));
    }
}

fn list(session: &Session) -> Result<()> {
    for (name, value) in session.vars.iter() {
        print_entry(name, value);
    }
    Ok(())
}

fn savelist(session: &Session) -> Result<()> {
    if !session.save_file.exists() {
        print_warning(&format!("no save file at '{}'", session.save_file.display()));
        return Ok(());
    }
    for (name, value) in read_saved(&session.save_file)? {
        print_entry(&name, value);
    }
    Ok(())
}
