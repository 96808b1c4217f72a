use super::*;

#[test]
fn registers() {
    instruction_runs! {
        [instr!(DIV, AS, BS)],
        [AS = 84i16, BS = 2i16] => [AS = 42i16]
    }
}

#[test]
fn fraction_truncates_on_integer_target() {
    instruction_runs! {
        [instr!(DIV, AS, SH), 4],
        [AS = 10i16] => [AS = 2i16]
    }
}

#[test]
fn by_zero_is_skipped() {
    instruction_tolerates! {
        [instr!(MOV, AS, SH), 10, instr!(DIV, AS, SH), 0],
        [] => [AS = 10i16]
    }
}

#[test]
fn by_zero_faults_in_strict_mode() {
    instruction_faults! {
        [instr!(MOV, AS, SH), 10, instr!(DIV, AS, SH), 0],
        [],
        DivideByZero at 2
    }
}

#[test]
fn negative_divisor_is_skipped() {
    instruction_runs! {
        [instr!(DIV, AS, SH), -2i16 as Word],
        [AS = 10i16] => [AS = 10i16]
    }
}
