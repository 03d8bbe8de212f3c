//! Run context tying the pipeline together
//!
//! An [`Interpreter`] owns the symbol table of one run and sequences
//! scan → parse → print → execute according to its [`RunOptions`].

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::error::Result;
use crate::lexer::Scanner;
use crate::parser::{CoreParser, Program};
use crate::printer;
use crate::runtime::{Evaluator, SymbolTable};

/// Header printed between the program listing and its output
pub const OUTPUT_HEADER: &str = "**** Output ****";

/// Configuration for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Print the reconstructed program and the output header before executing
    pub echo_program: bool,
    /// Print a blank line and `Enter value for X:` before each read
    pub prompt: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            echo_program: true,
            prompt: true,
        }
    }
}

/// JSON view of a parsed program together with the names its ids refer to
#[derive(Serialize)]
struct AstDump<'a> {
    symbols: Vec<&'a str>,
    program: &'a Program,
}

/// One run of a Core program
#[derive(Debug, Default)]
pub struct Interpreter {
    symbols: SymbolTable,
    options: RunOptions,
}

impl Interpreter {
    /// Creates an interpreter with an empty symbol table
    pub fn new(options: RunOptions) -> Self {
        Interpreter {
            symbols: SymbolTable::new(),
            options,
        }
    }

    /// Identifier entities seen so far
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Parses the program behind `scanner`
    pub fn parse(&mut self, scanner: Scanner) -> Result<Program> {
        CoreParser::new(scanner, &mut self.symbols).parse()
    }

    /// Parses an in-memory program
    pub fn parse_str(&mut self, source: &str) -> Result<Program> {
        self.parse(Scanner::from_source(source)?)
    }

    /// Canonical listing of `program`
    pub fn render(&self, program: &Program) -> String {
        printer::render(program, &self.symbols)
    }

    /// Pretty JSON of the tree and the symbol names its ids index
    pub fn ast_json(&self, program: &Program) -> Result<String> {
        let dump = AstDump {
            symbols: self.symbols.iter().map(|(_, s)| s.name()).collect(),
            program,
        };
        Ok(serde_json::to_string_pretty(&dump)?)
    }

    /// Executes `program`, reading from `input` and writing to `output`
    pub fn execute<R: BufRead, W: Write>(
        &mut self,
        program: &Program,
        input: R,
        output: &mut W,
    ) -> Result<()> {
        Evaluator::new(&mut self.symbols, input, output)
            .with_prompt(self.options.prompt)
            .execute(program)
    }

    /// Parses, optionally echoes the listing and header, then executes
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        scanner: Scanner,
        input: R,
        output: &mut W,
    ) -> Result<()> {
        let program = self.parse(scanner)?;
        tracing::debug!(symbols = self.symbols.len(), "parsed program");

        if self.options.echo_program {
            write!(output, "{}", self.render(&program))?;
            writeln!(output)?;
            writeln!(output, "{}", OUTPUT_HEADER)?;
        }

        self.execute(&program, input, output)
    }

    /// [`Interpreter::run`] over an in-memory program
    pub fn run_str<R: BufRead, W: Write>(
        &mut self,
        source: &str,
        input: R,
        output: &mut W,
    ) -> Result<()> {
        self.run(Scanner::from_source(source)?, input, output)
    }
}
