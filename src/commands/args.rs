//! Command-line splitting and argument checks for the variable commands.

use std::fmt;
use std::path::Path;

use crate::core::error::SyntaxErrorIndexes;
use crate::core::variables::{is_valid_variable_name, Variables};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    Set,
    Reset,
    Save,
    Load,
    List,
    Savelist,
}

impl CommandName {
    pub const ALL: [CommandName; 6] = [
        CommandName::Set,
        CommandName::Reset,
        CommandName::Save,
        CommandName::Load,
        CommandName::List,
        CommandName::Savelist,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommandName::Set => "set",
            CommandName::Reset => "reset",
            CommandName::Save => "save",
            CommandName::Load => "load",
            CommandName::List => "list",
            CommandName::Savelist => "savelist",
        }
    }

    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == word)
    }
}

/// One argument and the character position it starts at in the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub text: String,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: CommandName,
    pub args: Vec<Arg>,
}

impl CommandLine {
    pub fn arg_texts(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|a| a.text.as_str())
    }
}

/// True when the line is a command name alone or followed by whitespace.
pub fn is_command(line: &str) -> bool {
    parse_command(line).is_some()
}

fn words(chars: &[char], mut i: usize) -> Vec<Arg> {
    let mut out = Vec::new();
    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        out.push(Arg { text: chars[start..i].iter().collect(), position: start });
    }
    out
}

/// `set` keeps everything after the variable name as a single value argument.
pub fn parse_command(line: &str) -> Option<CommandLine> {
    let chars: Vec<char> = line.chars().collect();
    let head_len = chars.iter().take_while(|c| !c.is_whitespace()).count();
    let head: String = chars[..head_len].iter().collect();
    let name = CommandName::parse(&head)?;

    let mut args = words(&chars, head_len);
    if name == CommandName::Set && args.len() > 1 {
        let value_start = args[1].position;
        let value: String = chars[value_start..].iter().collect();
        args.truncate(1);
        args.push(Arg { text: value.trim_end().to_string(), position: value_start });
    }
    Some(CommandLine { name, args })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentErrorKind {
    BadVariableName,
    MissingVariableName,
    UnexpectedArguments,
    NoSaveFile,
    UnknownIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentError {
    pub kind: ArgumentErrorKind,
    pub indexes: SyntaxErrorIndexes,
    pub detail: String,
}

impl ArgumentError {
    fn new(kind: ArgumentErrorKind, indexes: SyntaxErrorIndexes, detail: impl Into<String>) -> Self {
        Self { kind, indexes, detail: detail.into() }
    }

    pub fn message(&self) -> String {
        let suffix = if self.indexes.len() > 1 { "s" } else { "" };
        match self.kind {
            ArgumentErrorKind::BadVariableName => {
                format!("Incorrect variable name{suffix}: {}", self.detail)
            }
            ArgumentErrorKind::MissingVariableName => "Missing variable name".to_string(),
            ArgumentErrorKind::UnexpectedArguments => {
                format!("Unexpected argument{suffix}: {}", self.detail)
            }
            ArgumentErrorKind::NoSaveFile => {
                format!("No save file found ('{}'), cannot load variables", self.detail)
            }
            ArgumentErrorKind::UnknownIdentifier => {
                format!("Unknown identifier{suffix}: {}", self.detail)
            }
        }
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ArgumentError {}

fn offending(args: &[&Arg], kind: ArgumentErrorKind) -> Result<(), ArgumentError> {
    if args.is_empty() {
        return Ok(());
    }
    let indexes = args.iter().map(|a| a.position).collect();
    let detail = args.iter().map(|a| a.text.as_str()).collect::<Vec<_>>().join(", ");
    Err(ArgumentError::new(kind, indexes, detail))
}

/// Validates the arguments before anything runs. `line_len` is the character
/// length of the command line, where a missing argument is pointed at.
pub fn check_arguments(
    cmd: &CommandLine,
    line_len: usize,
    vars: &Variables,
    save_file: &Path,
) -> Result<(), ArgumentError> {
    match cmd.name {
        CommandName::List | CommandName::Savelist => {
            let extra: Vec<&Arg> = cmd.args.iter().collect();
            offending(&extra, ArgumentErrorKind::UnexpectedArguments)
        }
        CommandName::Reset | CommandName::Save => {
            let unknown: Vec<&Arg> = cmd.args.iter().filter(|a| !vars.contains(&a.text)).collect();
            offending(&unknown, ArgumentErrorKind::UnknownIdentifier)
        }
        CommandName::Set => match cmd.args.first() {
            None => Err(ArgumentError::new(
                ArgumentErrorKind::MissingVariableName,
                vec![line_len],
                "",
            )),
            Some(name) if !is_valid_variable_name(&name.text) => {
                offending(&[name], ArgumentErrorKind::BadVariableName)
            }
            Some(_) => Ok(()),
        },
        CommandName::Load => {
            if !save_file.exists() {
                return Err(ArgumentError::new(
                    ArgumentErrorKind::NoSaveFile,
                    Vec::new(),
                    save_file.display().to_string(),
                ));
            }
            let bad: Vec<&Arg> = cmd.args.iter().filter(|a| !is_valid_variable_name(&a.text)).collect();
            offending(&bad, ArgumentErrorKind::BadVariableName)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_commands_by_first_word() {
        assert!(is_command("list"));
        assert!(is_command("set x 3"));
        assert!(is_command("save\tx"));
        assert!(!is_command("lists"));
        assert!(!is_command("setx"));
        assert!(!is_command(" list"));
    }

    #[test]
    fn set_value_keeps_its_spaces() {
        let cmd = parse_command("set  r  1 + 2 * 3 ").unwrap();
        assert_eq!(cmd.name, CommandName::Set);
        let texts: Vec<&str> = cmd.arg_texts().collect();
        assert_eq!(texts, vec!["r", "1 + 2 * 3"]);
        assert_eq!(cmd.args[0].position, 5);
        assert_eq!(cmd.args[1].position, 8);
    }

    #[test]
    fn other_commands_split_on_whitespace() {
        let cmd = parse_command("reset a  b").unwrap();
        let positions: Vec<usize> = cmd.args.iter().map(|a| a.position).collect();
        assert_eq!(positions, vec![6, 9]);
    }

    #[test]
    fn list_takes_no_arguments() {
        let vars = Variables::new();
        let cmd = parse_command("list a b").unwrap();
        let err = check_arguments(&cmd, 8, &vars, Path::new("vars.txt")).unwrap_err();
        assert_eq!(err.kind, ArgumentErrorKind::UnexpectedArguments);
        assert_eq!(err.indexes, vec![5, 7]);
        assert_eq!(err.message(), "Unexpected arguments: a, b");
    }

    #[test]
    fn set_needs_a_valid_name() {
        let vars = Variables::new();
        let file = Path::new("vars.txt");
        let missing = check_arguments(&parse_command("set").unwrap(), 3, &vars, file).unwrap_err();
        assert_eq!(missing.kind, ArgumentErrorKind::MissingVariableName);
        assert_eq!(missing.indexes, vec![3]);

        let reserved = check_arguments(&parse_command("set pi 3").unwrap(), 8, &vars, file).unwrap_err();
        assert_eq!(reserved.kind, ArgumentErrorKind::BadVariableName);
        assert_eq!(reserved.indexes, vec![4]);

        assert!(check_arguments(&parse_command("set x").unwrap(), 5, &vars, file).is_ok());
    }

    #[test]
    fn reset_and_save_need_known_variables() {
        let mut vars = Variables::new();
        vars.set("a", 1.0);
        let cmd = parse_command("save a b pi").unwrap();
        let err = check_arguments(&cmd, 11, &vars, Path::new("vars.txt")).unwrap_err();
        assert_eq!(err.kind, ArgumentErrorKind::UnknownIdentifier);
        assert_eq!(err.indexes, vec![7]);
    }

    #[test]
    fn load_requires_the_save_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("vars.txt");
        let vars = Variables::new();
        let err = check_arguments(&parse_command("load").unwrap(), 4, &vars, &file).unwrap_err();
        assert_eq!(err.kind, ArgumentErrorKind::NoSaveFile);

        std::fs::write(&file, "a 1\n").unwrap();
        let err = check_arguments(&parse_command("load a e").unwrap(), 8, &vars, &file).unwrap_err();
        assert_eq!(err.kind, ArgumentErrorKind::BadVariableName);
        assert_eq!(err.indexes, vec![7]);
    }
}
