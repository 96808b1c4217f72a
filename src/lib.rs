//! A small register-based virtual machine with a packed 16-bit bytecode.
//!
//! The instruction set and word layout live in [`instructions`], the
//! execution state machine in [`vm`]. Programs are flat slices of [`Word`]s;
//! the [dasm](../dasm/index.html) crate assembles them from text and the
//! [dex](../dex/index.html) crate wires the two together.

pub mod constants;
pub mod host;
pub mod instructions;
pub mod register;
pub mod stack;
pub mod vm;

pub use crate::host::{HostFn, HostRegistry};
pub use crate::instructions::*;
pub use crate::register::RegisterFile;
pub use crate::stack::{CallStack, Stack};
pub use crate::vm::{
    Comparison, ExitCode, LoadError, RuntimeError, RuntimeErrorKind, Vm, VmMode,
};

/// One 16-bit program word.
pub type Word = u16;
