use super::*;

#[test]
fn from_zero() {
    instruction_runs! {
        [instr!(INC, AS)],
        [] => [AS = 1i16]
    }
}

#[test]
fn float_register() {
    instruction_runs! {
        [instr!(INC, XF)],
        [XF = 1.5f32] => [XF = 2.5f32]
    }
}

#[test]
fn twice() {
    instruction_runs! {
        [instr!(INC, II), instr!(INC, II)],
        [II = -1i32] => [II = 1i32]
    }
}
