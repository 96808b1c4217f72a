//! Driver for the [dvm](../dvm/index.html) toolchain: reads an assembled
//! image (or assembles a source file on the fly), loads it into a VM and
//! runs it.

use dvm::{ExitCode, RuntimeError, Vm, VmMode};
use log::debug;
use std::error::Error as StdError;
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum Error {
    Asm(dasm::CompileErrors),
    Vm(RuntimeError),
    Io(std::io::Error, PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Asm(err) => {
                writeln!(f, "Assembling input failed:")?;
                write!(f, "{}", err)
            }
            Error::Vm(err) => write!(f, "Execution failed: {}", err),
            Error::Io(err, path) => {
                write!(f, "Reading \"{}\" failed: {}", path.display(), err)
            }
        }
    }
}

impl StdError for Error {}

/// Execution settings shared by the file and source entry points.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Use the permissive legacy semantics for both the assembler and
    /// the VM.
    pub lenient: bool,
    /// Dispatch-iteration budget; `None` runs to completion.
    pub max_steps: Option<u64>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            lenient: false,
            max_steps: None,
        }
    }
}

/// Host functions every driver run gets: id 0 prints the top of the
/// stack to stdout.
pub fn install_stdio_hosts(vm: &mut Vm) {
    vm.register_host(0, |stack, sp| {
        if sp > 0 {
            println!("{}", stack[sp as usize - 1]);
        }
    });
}

/// Loads `program` into a fresh VM (with the stdio host set installed)
/// and runs it.
pub fn run_program(
    program: &dexfile::Program,
    options: Options,
) -> Result<(Vm, ExitCode), Error> {
    let mode = if options.lenient {
        VmMode::Lenient
    } else {
        VmMode::Strict
    };

    let mut vm = Vm::with_mode(mode);
    install_stdio_hosts(&mut vm);
    vm.load_words(program.code());

    debug!("loaded {} words", program.len());

    let exit = match options.max_steps {
        Some(steps) => vm.run_bounded(steps),
        None => vm.run(),
    }
    .map_err(Error::Vm)?;

    Ok((vm, exit))
}

/// Runs an assembled image file.
pub fn run_file<P: AsRef<Path>>(path: P, options: Options) -> Result<(Vm, ExitCode), Error> {
    let program = dexfile::read_file(&path)
        .map_err(|err| Error::Io(err, path.as_ref().to_owned()))?;
    run_program(&program, options)
}

/// Assembles a source file and runs the result.
pub fn run_source_file<P: AsRef<Path>>(
    path: P,
    options: Options,
) -> Result<(Vm, ExitCode), Error> {
    let file = File::open(&path).map_err(|err| Error::Io(err, path.as_ref().to_owned()))?;
    let mut source = String::new();
    BufReader::new(file)
        .read_to_string(&mut source)
        .map_err(|err| Error::Io(err, path.as_ref().to_owned()))?;

    let program = if options.lenient {
        dasm::assemble_lenient(&source)
    } else {
        dasm::assemble(&source).map_err(Error::Asm)?
    };

    run_program(&program, options)
}
