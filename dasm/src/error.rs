use crate::Rule;
use dexfile::Program;
use pest::error::{Error as PestError, ErrorVariant, LineColLocation};
use pest::Span;
use std::error::Error as StdError;
use std::fmt;

/// Classification of an assembly diagnostic.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// The mnemonic names no instruction.
    UnknownOpcode,
    /// A malformed operand or an unparseable line.
    BadOperand,
    /// The program exceeds the code capacity.
    CodeOverflow,
    /// All symbol ids are taken.
    SymbolTableFull,
}

/// One diagnostic. Wraps a pest error so rendering comes with the source
/// line and a caret for free.
#[derive(Clone, Debug, PartialEq)]
pub struct CompileError {
    kind: ErrorKind,
    inner: PestError<Rule>,
}

impl CompileError {
    pub(crate) fn new(kind: ErrorKind, span: Span, message: String) -> CompileError {
        CompileError {
            kind,
            inner: PestError::new_from_span(ErrorVariant::CustomError { message }, span),
        }
    }

    pub(crate) fn from_parse(inner: PestError<Rule>) -> CompileError {
        CompileError {
            kind: ErrorKind::BadOperand,
            inner,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 1-based source line the diagnostic points at.
    pub fn line(&self) -> usize {
        match self.inner.line_col {
            LineColLocation::Pos((line, _)) => line,
            LineColLocation::Span((line, _), _) => line,
        }
    }

    pub fn with_path(mut self, path: &str) -> CompileError {
        self.inner = self.inner.with_path(path);
        self
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl StdError for CompileError {}

/// Every diagnostic from one assembly run, batched together with the
/// best-effort image (truncated where errors bit).
#[derive(Debug)]
pub struct CompileErrors {
    pub errors: Vec<CompileError>,
    pub partial: Program,
}

impl CompileErrors {
    pub fn with_path(mut self, path: &str) -> CompileErrors {
        self.errors = self
            .errors
            .into_iter()
            .map(|error| error.with_path(path))
            .collect();
        self
    }
}

impl fmt::Display for CompileErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl StdError for CompileErrors {}
