use log::trace;

use super::{Comparison, RuntimeErrorKind, Vm, VmMode};
use crate::instructions::{opcode_of, operand_a, operand_b, symbol_of, Opcode, Operand};
use crate::register::SAVE_ORDER;

pub(super) enum TickResult {
    Next,
    /// Continue at the word after this program index.
    Jump(usize),
    Fault(RuntimeErrorKind),
}

fn no_op_or(vm: &Vm, kind: RuntimeErrorKind) -> TickResult {
    match vm.mode {
        VmMode::Strict => TickResult::Fault(kind),
        VmMode::Lenient => TickResult::Next,
    }
}

/// Consumes the next program word. A truncated image that promises a
/// constant it does not contain reads zeroes.
fn read_word(vm: &mut Vm) -> u16 {
    vm.pc += 1;
    vm.program.get(vm.pc).copied().unwrap_or(0)
}

/// Composes a 32-bit constant from the next two words, high word first.
fn read_dword(vm: &mut Vm) -> u32 {
    let high = u32::from(read_word(vm));
    let low = u32::from(read_word(vm));
    (high << 16) | low
}

/// Resolves one operand to its value, consuming trailing constant words.
fn operand_value(vm: &mut Vm, op: Operand) -> Option<f64> {
    match op {
        Operand::SH => Some(f64::from(read_word(vm) as i16)),
        Operand::FL => Some(f64::from(f32::from_bits(read_dword(vm)))),
        Operand::IN => Some(f64::from(read_dword(vm) as i32)),
        _ => vm.registers.read(op),
    }
}

fn jump(vm: &mut Vm, id: u8) -> TickResult {
    let target = vm.symbols[id as usize];
    if target < vm.program.len() {
        trace!("jump through symbol {} to {}", id, target);
        TickResult::Jump(target)
    } else {
        // Branch through an undefined symbol.
        no_op_or(vm, RuntimeErrorKind::UnresolvedSymbol)
    }
}

fn jump_if(vm: &mut Vm, id: u8, condition: bool) -> TickResult {
    if condition {
        jump(vm, id)
    } else {
        TickResult::Next
    }
}

/// `DO`: saves all registers to the data stack, the return position to the
/// call stack, and enters the subroutine.
fn do_call(vm: &mut Vm, id: u8) -> TickResult {
    let target = vm.symbols[id as usize];
    if target >= vm.program.len() {
        return no_op_or(vm, RuntimeErrorKind::UnresolvedSymbol);
    }
    if vm.callstack.is_full() {
        return no_op_or(vm, RuntimeErrorKind::CallStackOverflow);
    }

    for op in &SAVE_ORDER {
        let value = vm.registers.read(*op).unwrap_or_default();
        if !vm.stack.push(value) && vm.mode == VmMode::Strict {
            return TickResult::Fault(RuntimeErrorKind::StackOverflow);
        }
    }
    vm.callstack.push(vm.pc as u32);

    trace!("call symbol {} at {}", id, target);
    TickResult::Jump(target)
}

/// `RET`: pops the return position, then restores the registers in the
/// reverse of the save order. Outside a subroutine it does nothing.
fn ret(vm: &mut Vm) -> TickResult {
    let return_to = match vm.callstack.pop() {
        Some(frame) => frame,
        None => return TickResult::Next,
    };

    for op in SAVE_ORDER.iter().rev() {
        match vm.stack.pop() {
            Some(value) => vm.registers.write(*op, value),
            None => {
                if vm.mode == VmMode::Strict {
                    return TickResult::Fault(RuntimeErrorKind::StackUnderflow);
                }
                // Short stack: restore what is there, return anyway.
                break;
            }
        }
    }

    trace!("return to {}", return_to);
    TickResult::Jump(return_to as usize)
}

fn host_call(vm: &mut Vm, id: u8) -> TickResult {
    if !vm.hosts.contains(id) {
        return no_op_or(vm, RuntimeErrorKind::InvalidHostCall);
    }

    let sp = vm.stack.sp() as u32;
    trace!("host call {} with sp {}", id, sp);

    let Vm { hosts, stack, .. } = vm;
    if let Some(function) = hosts.get_mut(id) {
        function(stack.as_mut_slice(), sp);
    }
    TickResult::Next
}

fn symbol_op(vm: &mut Vm, opcode: Opcode, id: u8) -> TickResult {
    match opcode {
        // Bound by the pre-pass; nothing to do at run time.
        Opcode::LBL | Opcode::FN => TickResult::Next,
        Opcode::DO => do_call(vm, id),
        Opcode::JMP => jump(vm, id),
        Opcode::JL => jump_if(vm, id, vm.cmp == Comparison::Less),
        Opcode::JG => jump_if(vm, id, vm.cmp == Comparison::Greater),
        Opcode::JE => jump_if(vm, id, vm.cmp == Comparison::Equal),
        Opcode::JN => jump_if(vm, id, vm.cmp != Comparison::Equal),
        Opcode::JLE => jump_if(
            vm,
            id,
            vm.cmp == Comparison::Less || vm.cmp == Comparison::Equal,
        ),
        Opcode::JGE => jump_if(
            vm,
            id,
            vm.cmp == Comparison::Greater || vm.cmp == Comparison::Equal,
        ),
        _ => unreachable!(),
    }
}

/// One fetch-decode-execute iteration at the current cursor.
pub(super) fn tick(vm: &mut Vm) -> TickResult {
    let word = vm.program[vm.pc];
    let opcode = opcode_of(word);

    if let Some(opcode) = opcode {
        if opcode.uses_symbol() {
            return symbol_op(vm, opcode, symbol_of(word));
        }
    }

    // Operands resolve for every non-symbol word, undefined opcode bytes
    // included, so inline constants are always consumed.
    let a = operand_a(word);
    let b = operand_b(word);
    let lhs = operand_value(vm, a);
    let rhs = operand_value(vm, b);

    let opcode = match opcode {
        Some(opcode) => opcode,
        None => return TickResult::Next,
    };

    match opcode {
        Opcode::NOP => TickResult::Next,

        // Reserved opcodes.
        Opcode::SIN | Opcode::COS => TickResult::Next,

        Opcode::MOV => {
            if let Some(value) = rhs {
                trace!("MOV {} into {}", value, a);
                vm.registers.write(a, value);
            }
            TickResult::Next
        }

        Opcode::INC => {
            if let Some(value) = lhs {
                vm.registers.write(a, value + 1.0);
            }
            TickResult::Next
        }

        Opcode::DEC => {
            if let Some(value) = lhs {
                vm.registers.write(a, value - 1.0);
            }
            TickResult::Next
        }

        Opcode::ADD => {
            if let (Some(lhs), Some(rhs)) = (lhs, rhs) {
                vm.registers.write(a, lhs + rhs);
            }
            TickResult::Next
        }

        Opcode::SUB => {
            if let (Some(lhs), Some(rhs)) = (lhs, rhs) {
                vm.registers.write(a, lhs - rhs);
            }
            TickResult::Next
        }

        Opcode::MUL => {
            if let (Some(lhs), Some(rhs)) = (lhs, rhs) {
                vm.registers.write(a, lhs * rhs);
            }
            TickResult::Next
        }

        Opcode::DIV => {
            if let (Some(lhs), Some(rhs)) = (lhs, rhs) {
                if rhs > 0.0 {
                    vm.registers.write(a, lhs / rhs);
                } else if rhs == 0.0 && vm.mode == VmMode::Strict {
                    return TickResult::Fault(RuntimeErrorKind::DivideByZero);
                }
                // A non-positive divisor leaves the register untouched.
            }
            TickResult::Next
        }

        Opcode::CMP => {
            vm.cmp = match (lhs, rhs) {
                (Some(lhs), Some(rhs)) => {
                    if lhs > rhs {
                        Comparison::Greater
                    } else if lhs < rhs {
                        Comparison::Less
                    } else if lhs == rhs {
                        Comparison::Equal
                    } else {
                        // NaN on either side fails all three tests.
                        Comparison::NotEqual
                    }
                }
                _ => Comparison::NotEqual,
            };
            trace!("CMP {:?} with {:?}: {:?}", lhs, rhs, vm.cmp);
            TickResult::Next
        }

        Opcode::PUSH | Opcode::ARG => {
            if let Some(value) = lhs {
                if !vm.stack.push(value) && vm.mode == VmMode::Strict {
                    return TickResult::Fault(RuntimeErrorKind::StackOverflow);
                }
            }
            TickResult::Next
        }

        Opcode::POP => {
            if a.is_register() {
                match vm.stack.pop() {
                    Some(value) => vm.registers.write(a, value),
                    None => return no_op_or(vm, RuntimeErrorKind::StackUnderflow),
                }
            }
            TickResult::Next
        }

        Opcode::CALL => match lhs {
            Some(id) => host_call(vm, id as u8),
            None => TickResult::Next,
        },

        Opcode::RET => ret(vm),

        // Symbol-form opcodes were dispatched above.
        Opcode::LBL
        | Opcode::FN
        | Opcode::DO
        | Opcode::JMP
        | Opcode::JL
        | Opcode::JG
        | Opcode::JE
        | Opcode::JN
        | Opcode::JLE
        | Opcode::JGE => unreachable!(),
    }
}
