use super::Word;
use std::mem;

pub const WORD_BYTES         : usize = mem::size_of::<Word>();
pub const WORD_WIDTH         : usize = WORD_BYTES * 8;

pub const OPCODE_MASK        : Word = 0b1111_1111_0000_0000;
pub const OPERAND_A_MASK     : Word = 0b0000_0000_1111_0000;
pub const OPERAND_B_MASK     : Word = 0b0000_0000_0000_1111;
pub const SYMBOL_MASK        : Word = 0b0000_0000_1111_1111;

pub const OPCODE_OFFSET      : u32 = 8;
pub const OPERAND_A_OFFSET   : u32 = 4;
pub const OPERAND_B_OFFSET   : u32 = 0;

pub const PROGRAM_CAPACITY   : usize = 1024;
pub const SYMBOL_CAPACITY    : usize = 256;
pub const STACK_CAPACITY     : usize = 64;
pub const CALLSTACK_CAPACITY : usize = 1024;

pub const BANK_SIZE          : usize = 4;
pub const REGISTER_COUNT     : usize = 3 * BANK_SIZE;
