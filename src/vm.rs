mod logic;

use std::error::Error as StdError;
use std::fmt;

use byteorder::ByteOrder;
use log::debug;
use util::{Endian, NamedEnum};
use util_derive::NamedEnum;

use self::logic::TickResult;
use crate::host::HostRegistry;
use crate::instructions::{opcode_of, symbol_of, Opcode};
use crate::register::RegisterFile;
use crate::stack::{CallStack, Stack};
use crate::{constants, instructions, Word};

/// Result of the last `CMP`.
///
/// "Less or equal" and "greater or equal" are synthesised from these four
/// by the conditional jumps.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Comparison {
    Less,
    Greater,
    Equal,
    NotEqual,
}

/// Failure policy for inputs the bytecode contract leaves malformed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VmMode {
    /// Every malformed input degrades to a no-op or a truncated effect and
    /// execution continues.
    Lenient,
    /// Malformed inputs stop execution with a [`RuntimeError`].
    Strict,
}

/// Normal termination statuses of [`Vm::run`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExitCode {
    /// The cursor reached the end of the program.
    Completed,
    /// The step budget ran out before the program ended. The VM keeps its
    /// state; running again resumes at the same cursor.
    Interrupted,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, NamedEnum)]
pub enum RuntimeErrorKind {
    StackOverflow,
    StackUnderflow,
    CallStackOverflow,
    DivideByZero,
    InvalidHostCall,
    UnresolvedSymbol,
}

/// A strict-mode execution failure and the instruction it happened at.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    /// Program index of the faulting instruction word.
    pub pc: u32,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at word {}", self.kind.name(), self.pc)
    }
}

impl StdError for RuntimeError {}

/// Returned when a byte image cannot be loaded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoadError {
    /// The image length is not a multiple of the word size.
    UnalignedImage(usize),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LoadError::UnalignedImage(len) => write!(
                f,
                "Image of {} bytes is not a whole number of {}-byte words.",
                len,
                constants::WORD_BYTES
            ),
        }
    }
}

impl StdError for LoadError {}

/// The virtual machine: registers, stacks, symbol cache and cursor.
///
/// A `Vm` owns its whole state; any number of instances may run the same
/// program words in parallel. Host functions are per-instance (see
/// [`HostRegistry`](../host/struct.HostRegistry.html)) and must be
/// registered before [`run`](#method.run).
#[derive(Debug)]
pub struct Vm {
    mode: VmMode,
    program: Vec<Word>,
    pc: usize,
    cmp: Comparison,
    registers: RegisterFile,
    stack: Stack,
    callstack: CallStack,
    symbols: [usize; constants::SYMBOL_CAPACITY],
    hosts: HostRegistry,
}

impl Vm {
    /// A strict-mode VM.
    pub fn new() -> Vm {
        Vm::with_mode(VmMode::Strict)
    }

    /// A VM with the permissive semantics of the original runtime.
    pub fn lenient() -> Vm {
        Vm::with_mode(VmMode::Lenient)
    }

    pub fn with_mode(mode: VmMode) -> Vm {
        Vm {
            mode,
            program: Vec::new(),
            pc: 0,
            cmp: Comparison::NotEqual,
            registers: RegisterFile::new(),
            stack: Stack::new(),
            callstack: CallStack::new(),
            symbols: [0; constants::SYMBOL_CAPACITY],
            hosts: HostRegistry::new(),
        }
    }

    pub fn mode(&self) -> VmMode {
        self.mode
    }

    /// Copies a program in and resets all execution state.
    pub fn load_words(&mut self, words: &[Word]) {
        self.program = Vec::from(words);
        self.reset();
    }

    /// Loads a little-endian byte image.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        if bytes.len() % constants::WORD_BYTES != 0 {
            return Err(LoadError::UnalignedImage(bytes.len()));
        }
        let mut words = vec![0; bytes.len() / constants::WORD_BYTES];
        Endian::read_u16_into(bytes, &mut words);
        self.program = words;
        self.reset();
        Ok(())
    }

    /// Clears registers, stacks and the compare flag, rewinds the cursor
    /// and points every symbol cache slot at the end-of-program sentinel.
    pub fn reset(&mut self) {
        self.pc = 0;
        self.cmp = Comparison::NotEqual;
        self.registers.clear();
        self.stack.clear();
        self.callstack.clear();
        self.symbols = [self.program.len(); constants::SYMBOL_CAPACITY];
    }

    /// Installs a host function under `id`. See [`HostRegistry::register`].
    pub fn register_host<F>(&mut self, id: u8, function: F)
    where
        F: FnMut(&mut [f64], u32) + 'static,
    {
        self.hosts.register(id, function);
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn cmp(&self) -> Comparison {
        self.cmp
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn call_depth(&self) -> usize {
        self.callstack.depth()
    }

    /// Program index a symbol id resolves to, if the label was defined.
    pub fn symbol_target(&self, id: u8) -> Option<usize> {
        let target = self.symbols[id as usize];
        if target < self.program.len() {
            Some(target)
        } else {
            None
        }
    }

    /// Executes until the cursor reaches the end of the program.
    pub fn run(&mut self) -> Result<ExitCode, RuntimeError> {
        self.run_bounded(u64::max_value())
    }

    /// Executes at most `max_steps` dispatch iterations.
    pub fn run_bounded(&mut self, max_steps: u64) -> Result<ExitCode, RuntimeError> {
        self.bind_labels();
        if self.mode == VmMode::Strict {
            self.check_symbols()?;
        }

        debug!("running {} words from {}", self.program.len(), self.pc);

        let mut steps = 0u64;
        while self.pc < self.program.len() {
            if steps == max_steps {
                return Ok(ExitCode::Interrupted);
            }
            steps += 1;

            let at = self.pc as u32;
            match logic::tick(self) {
                TickResult::Next => self.pc += 1,
                // The recorded index is the label word itself; stepping
                // past it lands on the first word of the body.
                TickResult::Jump(index) => self.pc = index + 1,
                TickResult::Fault(kind) => return Err(RuntimeError { kind, pc: at }),
            }
        }

        Ok(ExitCode::Completed)
    }

    /// Label pre-pass: records the position of every `LBL`/`FN` word in
    /// the symbol cache. Later definitions win.
    fn bind_labels(&mut self) {
        self.symbols = [self.program.len(); constants::SYMBOL_CAPACITY];
        for (index, &word) in self.program.iter().enumerate() {
            match opcode_of(word) {
                Some(Opcode::LBL) | Some(Opcode::FN) => {
                    self.symbols[symbol_of(word) as usize] = index;
                }
                _ => {}
            }
        }
    }

    /// Strict-mode walk verifying that every symbol-form reference was
    /// bound by the pre-pass. Unlike the blind label scan this decodes
    /// operands, so words belonging to inline constants are skipped.
    fn check_symbols(&self) -> Result<(), RuntimeError> {
        let mut index = 0;
        while index < self.program.len() {
            let word = self.program[index];
            match opcode_of(word) {
                Some(opcode) if opcode.uses_symbol() => {
                    if opcode != Opcode::LBL && opcode != Opcode::FN {
                        let id = symbol_of(word);
                        if self.symbols[id as usize] >= self.program.len() {
                            return Err(RuntimeError {
                                kind: RuntimeErrorKind::UnresolvedSymbol,
                                pc: index as u32,
                            });
                        }
                    }
                }
                _ => {
                    index += instructions::operand_a(word).extra_words();
                    index += instructions::operand_b(word).extra_words();
                }
            }
            index += 1;
        }
        Ok(())
    }
}

impl Default for Vm {
    fn default() -> Vm {
        Vm::new()
    }
}
