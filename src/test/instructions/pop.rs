use super::*;

#[test]
fn into_register() {
    instruction_runs! {
        [instr!(PUSH, SH), 42, instr!(POP, BS)],
        [] => [BS = 42i16]
    }
}

#[test]
fn reverses_push_order() {
    instruction_runs! {
        [
            instr!(PUSH, SH), 1,
            instr!(PUSH, SH), 2,
            instr!(POP, AS),
            instr!(POP, BS),
        ],
        [] => [AS = 2i16, BS = 1i16]
    }
}

#[test]
fn empty_stack_is_a_no_op() {
    instruction_tolerates! {
        [instr!(POP, AS)],
        [AS = 9i16] => [AS = 9i16]
    }
}

#[test]
fn empty_stack_faults_in_strict_mode() {
    instruction_faults! {
        [instr!(POP, AS)],
        [],
        StackUnderflow at 0
    }
}

#[test]
fn non_register_target_leaves_stack_alone() {
    let vm = run(&[instr!(PUSH, SH), 5, instr!(POP)]);
    assert_eq!(1, vm.stack().sp());
}
