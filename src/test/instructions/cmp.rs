use super::*;

fn cmp_program(lhs: Word, rhs: Word) -> [Word; 6] {
    [
        instr!(MOV, AS, SH),
        lhs,
        instr!(MOV, BS, SH),
        rhs,
        instr!(CMP, AS, BS),
        instr!(NOP),
    ]
}

#[test]
fn less() {
    let vm = run(&cmp_program(1, 2));
    assert_eq!(Comparison::Less, vm.cmp());
}

#[test]
fn greater() {
    let vm = run(&cmp_program(3, 2));
    assert_eq!(Comparison::Greater, vm.cmp());
}

#[test]
fn equal() {
    let vm = run(&cmp_program(2, 2));
    assert_eq!(Comparison::Equal, vm.cmp());
}

#[test]
fn across_banks() {
    let bits = 2.0f32.to_bits();
    let vm = run(&[
        instr!(MOV, AS, SH),
        2,
        instr!(MOV, XF, FL),
        (bits >> 16) as Word,
        (bits & 0xFFFF) as Word,
        instr!(CMP, AS, XF),
    ]);
    assert_eq!(Comparison::Equal, vm.cmp());
}

#[test]
fn against_constant() {
    let vm = run(&[instr!(MOV, AS, SH), 4, instr!(CMP, AS, SH), 5]);
    assert_eq!(Comparison::Less, vm.cmp());
}

#[test]
fn missing_operand_compares_not_equal() {
    let vm = run(&[instr!(MOV, AS, SH), 4, instr!(CMP, AS)]);
    assert_eq!(Comparison::NotEqual, vm.cmp());
}
