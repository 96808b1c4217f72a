//! Assembler for the [dvm](../dvm/index.html) virtual machine.
//!
//! The entry points are [`assemble`](fn.assemble.html), which collects
//! every diagnostic and hands them back batched together with the
//! best-effort image, and [`assemble_lenient`](fn.assemble_lenient.html),
//! which reproduces the permissive semantics of the original toolchain
//! (malformed lines are dropped, oversized programs truncated). Both
//! produce a [`Program`](../dexfile/struct.Program.html) from the
//! [dexfile](../dexfile/index.html) crate.
//!
//! Parsing is implemented with [pest]; every diagnostic wraps a pest error
//! and renders with the offending source line and a caret.
//!
//! # Assembly language
//!
//! The source is line-oriented. Spaces, tabs and commas separate tokens, a
//! semicolon starts a comment that runs to the end of the line, and a line
//! is one of:
//!
//!  Form              | Example          | Effect
//! -------------------|------------------|--------------------------------
//! label definition   | `LOOP:`          | emits a `LBL` word binding the name
//! symbol directive   | `symbol done`    | allocates an id, emits nothing
//! instruction        | `MOV as,#10`     | emits one word plus inline constants
//!
//! Mnemonics are matched case-insensitively against the
//! [`Opcode`](../dvm/enum.Opcode.html) names. Operands are classified by
//! token kind alone:
//!
//! - a lowercase register name (`as bs cs ds`, `ii ji ki li`,
//!   `xf yf zf wf`) encodes that register's nibble;
//! - `#` followed by a signed decimal integer encodes the inline-constant
//!   nibble and appends the value as the next program word;
//! - anything else is a symbol reference: the name gets an 8-bit id and
//!   the id lands in the low byte of the word, which is how jump and call
//!   targets are assembled. Double-quoted strings are tokenized (spaces
//!   and all) and currently round-trip as symbols.
//!
//! Register names are case-sensitive: an uppercase `AS` is an ordinary
//! identifier and therefore a symbol reference.
//!
//! [pest]: https://docs.rs/pest/

mod error;
mod lines;
mod parser;
mod symbols;


pub use crate::error::{CompileError, CompileErrors, ErrorKind};
pub use dexfile::Program;

use crate::parser::{DasmParser, Rule};
use pest::iterators::Pair;
use pest::Parser;

/// Assembly failure policy.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Malformed lines are dropped and oversized programs truncated.
    Lenient,
    /// Every defect is reported.
    Strict,
}

fn parse(input: &str) -> Result<Pair<Rule>, pest::error::Error<Rule>> {
    Ok(DasmParser::parse(Rule::program, input)?.next().unwrap())
}

fn assemble_with(input: &str, mode: Mode) -> (Program, Vec<CompileError>) {
    let pair = match parse(input) {
        Ok(pair) => pair,
        Err(err) => {
            return (
                Program::from(Vec::new(), Vec::new()),
                vec![CompileError::from_parse(err)],
            )
        }
    };

    let (code, symbols, errors) = lines::process_program(pair, mode);
    (Program::from(code, symbols.into_names()), errors)
}

/// Assembles `input`, collecting every diagnostic. On failure the batched
/// errors carry the best-effort image.
pub fn assemble(input: &str) -> Result<Program, CompileErrors> {
    let (program, errors) = assemble_with(input, Mode::Strict);
    if errors.is_empty() {
        Ok(program)
    } else {
        Err(CompileErrors {
            errors,
            partial: program,
        })
    }
}

/// Assembles with the permissive semantics of the original toolchain.
/// Never fails; whatever could not be assembled is simply absent.
pub fn assemble_lenient(input: &str) -> Program {
    assemble_with(input, Mode::Lenient).0
}
