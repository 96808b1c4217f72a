use super::*;

#[test]
fn saves_and_restores_every_bank() {
    let program = [
        instr_sym!(DO, 0),
        instr_sym!(JMP, 1),
        instr_sym!(FN, 0),
        instr!(MOV, AS, SH), 99,
        instr!(MOV, II, SH), 99,
        instr!(MOV, XF, SH), 99,
        instr!(RET),
        instr_sym!(LBL, 1),
    ];

    instruction_runs! {
        program,
        [AS = 1i16, II = 2i32, XF = 3.5f32] => [AS = 1i16, II = 2i32, XF = 3.5f32]
    }
}

#[test]
fn net_stack_use_is_zero() {
    let program = [
        instr!(PUSH, SH), 5,
        instr_sym!(DO, 0),
        instr_sym!(JMP, 1),
        instr_sym!(FN, 0),
        instr!(RET),
        instr_sym!(LBL, 1),
    ];

    let vm = run(&program);

    // Only the value pushed by the caller remains.
    assert_eq!([5.0], vm.stack().values());
    assert_eq!(0, vm.call_depth());
}

#[test]
fn ret_without_call_is_a_no_op() {
    instruction_runs! {
        [instr!(RET), instr!(INC, AS)],
        [] => [AS = 1i16]
    }
}

#[test]
fn undefined_subroutine_is_skipped() {
    instruction_tolerates! {
        [instr_sym!(DO, 9), instr!(INC, AS)],
        [] => [AS = 1i16]
    }
}

#[test]
fn undefined_subroutine_faults_in_strict_mode() {
    instruction_faults! {
        [instr_sym!(DO, 9)],
        [],
        UnresolvedSymbol at 0
    }
}
