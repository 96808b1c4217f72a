use super::*;

#[test]
fn executes_as_a_no_op() {
    instruction_runs! {
        [instr_sym!(LBL, 0), instr!(INC, AS), instr_sym!(FN, 1)],
        [] => [AS = 1i16]
    }
}

#[test]
fn later_definition_wins() {
    let program = [
        instr_sym!(JMP, 0),
        instr_sym!(LBL, 0),
        instr!(INC, AS),
        instr_sym!(LBL, 0),
        instr!(INC, BS),
    ];

    let vm = run(&program);

    assert_eq!(0, vm.registers().r16(0));
    assert_eq!(1, vm.registers().r16(1));
    assert_eq!(Some(3), vm.symbol_target(0));
}

#[test]
fn fn_binds_like_lbl() {
    let program = [
        instr_sym!(FN, 2),
        instr!(NOP),
    ];

    let mut vm = Vm::new();
    vm.load_words(&program);
    vm.run().unwrap();

    assert_eq!(Some(0), vm.symbol_target(2));
}
