use super::*;

#[test]
fn from_zero() {
    instruction_runs! {
        [instr!(DEC, AS)],
        [] => [AS = -1i16]
    }
}

#[test]
fn undoes_inc() {
    instruction_runs! {
        [instr!(INC, BS), instr!(DEC, BS)],
        [BS = 7i16] => [BS = 7i16]
    }
}
