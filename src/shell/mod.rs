use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::commands::calc::evaluate_line;
use crate::commands::vars::run_command_line;
use crate::commands::Session;
use crate::core::chars::are_all_characters_spaces;

/// Interactive loop on stdin. Prompt, banner and title only show on a terminal.
pub fn start(session: &mut Session) -> anyhow::Result<()> {
    let interactive = io::stdin().is_terminal();
    if interactive {
        set_console_title();
        banner();
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        if interactive {
            print!("{} ", ">".bold().cyan());
            io::stdout().flush().ok();
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            if interactive {
                println!();
            }
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);

        if !handle_line(session, line)? {
            break;
        }
    }
    Ok(())
}

/// Runs one line; returns `false` when the shell should stop.
pub fn handle_line(session: &mut Session, line: &str) -> anyhow::Result<bool> {
    match line.trim() {
        "quit" | "exit" => return Ok(false),
        "help" | "?" => {
            print_help();
            return Ok(true);
        }
        _ => {}
    }

    if are_all_characters_spaces(line) {
        println!("0");
        return Ok(true);
    }
    match run_command_line(session, line) {
        Ok(true) => {}
        Ok(false) => {
            evaluate_line(line, &session.vars, session.json);
        }
        Err(e) => eprintln!("{} {:#}", "err:".red().bold(), e),
    }
    Ok(true)
}

fn set_console_title() {
    if let Err(err) = write_title(&mut io::stdout()) {
        crate::debug_log!("shell: could not set the terminal title: {}", err);
    }
}

fn write_title(out: &mut impl Write) -> io::Result<()> {
    use crossterm::{execute, terminal::SetTitle};
    execute!(out, SetTitle("formulae"))
}

fn banner() {
    println!(
        "{}  {}",
        "formulae".bold().cyan(),
        "type 'help' for commands, 'quit' to leave".dimmed()
    );
}

fn print_help() {
    println!(
        "{}\n  2+3*4               # evaluate (priority: % < + < - < * < / < ^)\n  3(4) [1+1](2)       # implicit products around brackets\n  pi e                # built-in constants\n\
         {}\n  set <name> [value]  # assign (value may be a formula, default 0)\n  reset [names...]    # drop variables (all when no name)\n  list                # show every variable\n\
         {}\n  save [names...]     # write variables to the save file\n  load [names...]     # read variables back\n  savelist            # show the save file\n\
         {}\n  help                # show this help\n  quit | exit         # leave the shell\n",
        "Formulas:".bold(),
        "Variables:".bold(),
        "Save file:".bold(),
        "Shell:".bold(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variables::Variables;

    struct ClosedTerminal;

    impl Write for ClosedTerminal {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn title_write_reports_terminal_errors() {
        let mut buf = Vec::new();
        write_title(&mut buf).unwrap();
        assert!(String::from_utf8_lossy(&buf).contains("formulae"));
        assert!(write_title(&mut ClosedTerminal).is_err());
    }

    #[test]
    fn quit_and_exit_stop_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(Variables::new(), dir.path().join("vars.txt"), false);
        assert!(!handle_line(&mut session, "quit").unwrap());
        assert!(!handle_line(&mut session, "  exit ").unwrap());
        assert!(handle_line(&mut session, "2+2").unwrap());
    }

    #[test]
    fn commands_reach_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(Variables::new(), dir.path().join("vars.txt"), false);
        handle_line(&mut session, "set w 6").unwrap();
        assert_eq!(session.vars.get("w"), Some(6.0));
    }
}
