/// formulae main: one-shot subcommands, interactive shell by default.
use clap::Parser; // trait import enables FormulaeCli::parse()

use formulae::cli::{Command, FormulaeCli};
use formulae::commands::{calc, tokens, Session};
use formulae::config::{load_config, resolve_config_path};
use formulae::shell;

fn main() -> anyhow::Result<()> {
    let args = FormulaeCli::parse();

    let cfg_path = resolve_config_path(&args.config);
    let cfg = load_config(cfg_path.as_deref())?;

    if args.no_color || !cfg.color() || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let save_file = args.save_file.clone().unwrap_or_else(|| cfg.save_file());
    let mut session = Session::new(cfg.initial_variables(), save_file, args.json);

    let ok = match args.cmd.unwrap_or(Command::Shell) {
        Command::Eval { formulas } => calc::eval_all(&formulas, &session.vars, session.json),
        Command::Check { formula } => calc::check(&formula, &session.vars, session.json),
        Command::Tokens { formula } => tokens::main(&formula, &session.vars),
        Command::Shell => {
            shell::start(&mut session)?;
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
