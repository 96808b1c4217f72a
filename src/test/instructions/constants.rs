use super::*;

#[test]
fn short_follows_instruction() {
    instruction_runs! {
        [instr!(MOV, AS, SH), 1337],
        [] => [AS = 1337i16]
    }
}

#[test]
fn int_composes_high_word_first() {
    instruction_runs! {
        [instr!(MOV, II, IN), 0x0001, 0x2345],
        [] => [II = 0x1_2345i32]
    }
}

#[test]
fn negative_int() {
    let value = -70_000i32;
    let bits = value as u32;
    instruction_runs! {
        [instr!(MOV, II, IN), (bits >> 16) as Word, (bits & 0xFFFF) as Word],
        [] => [II = value]
    }
}

#[test]
fn float_round_trips_through_bits() {
    let bits = (-2.5f32).to_bits();
    instruction_runs! {
        [instr!(MOV, XF, FL), (bits >> 16) as Word, (bits & 0xFFFF) as Word],
        [] => [XF = -2.5f32]
    }
}

#[test]
fn both_operand_constants_in_order() {
    // Operand A's constant precedes operand B's in the word stream.
    instruction_runs! {
        [instr!(CMP, SH, SH), 1, 2, instr_sym!(JL, 0), instr!(INC, AS), instr_sym!(LBL, 0)],
        [] => [AS = 0i16]
    }
}

#[test]
fn truncated_constant_reads_zero() {
    instruction_runs! {
        [instr!(MOV, AS, SH)],
        [AS = 5i16] => [AS = 0i16]
    }
}
