use super::*;
use crate::constants;

#[test]
fn register_value() {
    let vm = run(&[instr!(MOV, AS, SH), 23, instr!(PUSH, AS)]);
    assert_eq!([23.0], vm.stack().values());
}

#[test]
fn constant() {
    let vm = run(&[instr!(PUSH, SH), 42]);
    assert_eq!([42.0], vm.stack().values());
}

#[test]
fn missing_operand_pushes_nothing() {
    let vm = run(&[instr!(PUSH)]);
    assert_eq!(0, vm.stack().sp());
}

fn fill_program() -> Vec<Word> {
    // One more push than the stack holds.
    let mut program = Vec::new();
    for _ in 0..(constants::STACK_CAPACITY + 1) {
        program.push(instr!(PUSH, SH));
        program.push(1);
    }
    program
}

#[test]
fn overflow_is_dropped() {
    let mut vm = Vm::lenient();
    vm.load_words(&fill_program());
    assert_eq!(ExitCode::Completed, vm.run().unwrap());
    assert_eq!(constants::STACK_CAPACITY, vm.stack().sp());
}

#[test]
fn overflow_faults_in_strict_mode() {
    let mut vm = Vm::new();
    vm.load_words(&fill_program());
    let err = vm.run().unwrap_err();
    assert_eq!(RuntimeErrorKind::StackOverflow, err.kind);
    assert_eq!(2 * constants::STACK_CAPACITY as u32, err.pc);
}
