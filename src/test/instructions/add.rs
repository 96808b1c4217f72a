use super::*;

#[test]
fn registers() {
    instruction_runs! {
        [instr!(ADD, AS, BS)],
        [AS = 42i16, BS = 64i16] => [AS = 106i16]
    }
}

#[test]
fn short_constant() {
    instruction_runs! {
        [instr!(ADD, AS, SH), 10],
        [AS = 5i16] => [AS = 15i16]
    }
}

#[test]
fn negative_constant() {
    instruction_runs! {
        [instr!(ADD, AS, SH), -4i16 as Word],
        [AS = 16i16] => [AS = 12i16]
    }
}

#[test]
fn doubles_through_itself() {
    instruction_runs! {
        [instr!(ADD, AS, AS)],
        [AS = 3i16] => [AS = 6i16]
    }
}

#[test]
fn float_bank() {
    instruction_runs! {
        [instr!(ADD, XF, YF)],
        [XF = 1.5f32, YF = 0.25f32] => [XF = 1.75f32]
    }
}
