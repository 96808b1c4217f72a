use super::*;

/// Compares `lhs` against `rhs`, then runs the conditional jump over an
/// `INC as`; the register stays zero iff the jump was taken.
macro_rules! branch_taken {
    ($opcode:ident, $lhs:expr, $rhs:expr, $taken:expr) => {{
        let program = [
            instr!(MOV, AS, SH),
            $lhs,
            instr!(CMP, AS, SH),
            $rhs,
            instr_sym!($opcode, 0),
            instr!(INC, BS),
            instr_sym!(LBL, 0),
        ];

        let mut vm = Vm::new();
        vm.load_words(&program);
        vm.run().unwrap();

        let skipped = vm.registers().r16(1) == 0;
        assert_eq!($taken, skipped, "{} with {} vs {}", stringify!($opcode), $lhs, $rhs);
    }};
}

#[test]
fn jl() {
    branch_taken!(JL, 1, 2, true);
    branch_taken!(JL, 2, 2, false);
    branch_taken!(JL, 3, 2, false);
}

#[test]
fn jg() {
    branch_taken!(JG, 3, 2, true);
    branch_taken!(JG, 2, 2, false);
    branch_taken!(JG, 1, 2, false);
}

#[test]
fn je() {
    branch_taken!(JE, 2, 2, true);
    branch_taken!(JE, 1, 2, false);
}

#[test]
fn jn() {
    branch_taken!(JN, 1, 2, true);
    branch_taken!(JN, 3, 2, true);
    branch_taken!(JN, 2, 2, false);
}

#[test]
fn jle() {
    branch_taken!(JLE, 1, 2, true);
    branch_taken!(JLE, 2, 2, true);
    branch_taken!(JLE, 3, 2, false);
}

#[test]
fn jge() {
    branch_taken!(JGE, 3, 2, true);
    branch_taken!(JGE, 2, 2, true);
    branch_taken!(JGE, 1, 2, false);
}

#[test]
fn not_taken_before_any_cmp() {
    // The flag starts out as "not equal", so only JN fires.
    instruction_runs! {
        [
            instr_sym!(JE, 0),
            instr!(INC, AS),
            instr_sym!(LBL, 0),
            instr_sym!(JN, 1),
            instr!(INC, BS),
            instr_sym!(LBL, 1),
        ],
        [] => [AS = 1i16, BS = 0i16]
    }
}
