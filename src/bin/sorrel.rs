use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand};

use sorrel::{Interpreter, Repl, SorrelError};

#[derive(Parser)]
#[command(author, version, about = "Sorrel Lisp interpreter")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a Sorrel script file, one form per line
    Run { script: PathBuf },
    /// Start an interactive REPL session
    Repl,
    /// Evaluate a single form and print its value
    Eval { source: String },
}

fn main() -> Result<(), SorrelError> {
    let args = Args::parse();
    match args.command.unwrap_or(Command::Repl) {
        Command::Run { script } => run_script(script),
        Command::Repl => {
            let mut repl = Repl::new();
            repl.run()
        }
        Command::Eval { source } => {
            let mut interpreter = Interpreter::new();
            let value = interpreter.eval_source(&source)?;
            println!("{value}");
            Ok(())
        }
    }
}

fn run_script(path: PathBuf) -> Result<(), SorrelError> {
    let source = fs::read_to_string(&path)?;
    let mut interpreter = Interpreter::new();
    let mut last = None;
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }
        last = Some(interpreter.eval_source(trimmed)?);
    }
    if let Some(value) = last {
        println!("{value}");
    }
    Ok(())
}
