use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use corelang::lexer::write_token_codes;
use corelang::{Interpreter, RunOptions, Scanner};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `CORELANG_LOG=debug`)
const LOG_ENV: &str = "CORELANG_LOG";

#[derive(Parser, Debug)]
#[command(name = "corelang")]
#[command(version, about = "Scan, parse, print and execute a Core program.")]
struct Cli {
    /// Path to the Core source file
    #[arg()]
    source: PathBuf,

    /// Print the token stream as numeric codes and exit
    #[arg(long, default_value_t = false)]
    tokens: bool,

    /// Print the parsed tree as JSON and exit
    #[arg(long, default_value_t = false)]
    ast_json: bool,

    /// Do not prompt before each `read`
    #[arg(long, default_value_t = false)]
    no_prompt: bool,

    /// Skip the program listing and output header
    #[arg(long, default_value_t = false)]
    no_echo: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let scanner = Scanner::open(&cli.source)
        .with_context(|| format!("failed to open source file {}", cli.source.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.tokens {
        write_token_codes(scanner, &mut out)?;
        return Ok(());
    }

    let mut interpreter = Interpreter::new(RunOptions {
        echo_program: !cli.no_echo,
        prompt: !cli.no_prompt,
    });

    if cli.ast_json {
        let program = interpreter.parse(scanner)?;
        writeln!(out, "{}", interpreter.ast_json(&program)?)?;
        return Ok(());
    }

    let stdin = io::stdin();
    interpreter.run(scanner, stdin.lock(), &mut out)?;
    Ok(())
}
