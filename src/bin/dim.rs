//! The CLI front-end (§4.11): `dim` (REPL when stdin is a TTY, else reads
//! stdin), `dim <expr>`, `dim --file <path>` / `dim -f <path>`, `dim -`
//! (stdin). Exit codes: `0` success, `64` invalid argument usage. Runtime
//! errors from an evaluated expression print to stderr but never change
//! the exit code.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use dim::Engine;

const EXIT_USAGE: i32 = 64;

#[derive(ClapParser, Debug)]
#[command(name = "dim", about = "A dimensional-analysis calculator")]
struct Cli {
    /// Expression to evaluate. Omit to start a REPL (or read stdin if it's
    /// not a TTY).
    expr: Option<String>,

    /// Read the program from a file instead of an inline expression.
    #[arg(short, long, value_name = "PATH", conflicts_with = "expr")]
    file: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == clap::error::ErrorKind::DisplayHelp
            || err.kind() == clap::error::ErrorKind::DisplayVersion =>
        {
            let _ = err.print();
            std::process::exit(0);
        }
        Err(err) => {
            // clap's own exit codes don't match this CLI's contract
            // (§6: usage errors exit 64); print its message and remap.
            let _ = err.print();
            std::process::exit(EXIT_USAGE);
        }
    };
    match run(cli) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(EXIT_USAGE);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut engine = Engine::new();

    if let Some(path) = cli.file {
        let text = if path == "-" {
            read_all_stdin()?
        } else {
            std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?
        };
        run_lines(&mut engine, text.lines());
        return Ok(());
    }

    if let Some(expr) = cli.expr {
        if expr == "-" {
            let text = read_all_stdin()?;
            run_lines(&mut engine, text.lines());
            return Ok(());
        }
        eval_and_print(&mut engine, &expr);
        return Ok(());
    }

    if io::stdin().is_terminal() {
        repl(&mut engine)
    } else {
        let text = read_all_stdin()?;
        run_lines(&mut engine, text.lines());
        Ok(())
    }
}

fn read_all_stdin() -> Result<String> {
    let mut buf = String::new();
    io::Read::read_to_string(&mut io::stdin(), &mut buf).context("reading stdin")?;
    Ok(buf)
}

fn run_lines<'a>(engine: &mut Engine, lines: impl Iterator<Item = &'a str>) {
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        eval_and_print(engine, line);
    }
}

fn repl(engine: &mut Engine) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        let bytes = stdin.lock().read_line(&mut line).context("reading stdin")?;
        if bytes == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        eval_and_print(engine, &line);
    }
    Ok(())
}

fn eval_and_print(engine: &mut Engine, src: &str) {
    match engine.eval(src) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("{err}"),
    }
}
