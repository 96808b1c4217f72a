use crate::error::{CompileError, ErrorKind};
use crate::symbols::SymbolTable;
use crate::{Mode, Rule};
use dvm::{constants, enum_to_word, make_symbol_instruction, Opcode, Operand, Word};
use matches::debug_assert_matches;
use pest::iterators::Pair;

pub(crate) struct State {
    mode: Mode,
    code: Vec<Word>,
    symbols: SymbolTable,
    errors: Vec<CompileError>,
    overflowed: bool,
}

impl State {
    fn new(mode: Mode) -> State {
        State {
            mode,
            code: Vec::new(),
            symbols: SymbolTable::new(),
            errors: Vec::new(),
            overflowed: false,
        }
    }

    /// Records a diagnostic. The permissive mode swallows it; the line
    /// that produced it degrades to a dropped line or truncated effect
    /// either way.
    fn report(&mut self, error: CompileError) {
        if self.mode == Mode::Strict {
            self.errors.push(error);
        }
    }

    /// Appends a word, reporting overflow once when the program no
    /// longer fits.
    fn emit(&mut self, pair: &Pair<Rule>, word: Word) -> Option<usize> {
        if self.code.len() == constants::PROGRAM_CAPACITY {
            if !self.overflowed {
                self.overflowed = true;
                self.report(CompileError::new(
                    ErrorKind::CodeOverflow,
                    pair.as_span(),
                    format!(
                        "Program exceeds the maximum size of {} words",
                        constants::PROGRAM_CAPACITY
                    ),
                ));
            }
            return None;
        }
        self.code.push(word);
        Some(self.code.len() - 1)
    }

    fn get_or_create_symbol(&mut self, pair: &Pair<Rule>) -> Option<u8> {
        let id = self.symbols.get_or_create(pair.as_str());
        if id.is_none() {
            self.report(CompileError::new(
                ErrorKind::SymbolTableFull,
                pair.as_span(),
                format!(
                    "All {} symbol ids are taken",
                    constants::SYMBOL_CAPACITY
                ),
            ));
        }
        id
    }
}

fn process_mnemonic(pair: &Pair<Rule>) -> Result<Opcode, CompileError> {
    pair.as_str()
        .to_uppercase()
        .parse()
        .map_err(|err: util::UnknownName| {
            CompileError::new(ErrorKind::UnknownOpcode, pair.as_span(), format!("{}", err))
        })
}

fn process_register(pair: &Pair<Rule>) -> Operand {
    // The grammar only lets the twelve register names through.
    pair.as_str().to_uppercase().parse().unwrap()
}

fn process_i16(pair: &Pair<Rule>, mode: Mode) -> Result<i16, CompileError> {
    let text = pair.as_str();
    match text.parse::<i16>() {
        Ok(value) => Ok(value),
        Err(err) => match mode {
            // The legacy toolchain had no defined overflow behavior;
            // wrapping to the low 16 bits is the closest stand-in.
            Mode::Lenient => Ok(text.parse::<i64>().map(|v| v as i16).unwrap_or(0)),
            Mode::Strict => Err(CompileError::new(
                ErrorKind::BadOperand,
                pair.as_span(),
                format!("Parsing integer failed: {}", err),
            )),
        },
    }
}

/// Classifies one operand token and folds it into the base word at
/// `index`: registers become a nibble, immediates become the `SH` nibble
/// plus a trailing constant word, anything else a symbol id in the low
/// byte.
fn process_operand(pair: Pair<Rule>, index: usize, first: bool, state: &mut State) {
    debug_assert_matches!(pair.as_rule(), Rule::operand);
    let inner = pair.into_inner().next().unwrap();
    let shift = if first {
        constants::OPERAND_A_OFFSET
    } else {
        constants::OPERAND_B_OFFSET
    };

    match inner.as_rule() {
        Rule::register => {
            let operand = process_register(&inner);
            state.code[index] |= enum_to_word(operand) << shift;
        }
        Rule::immediate => {
            let int_pair = inner.into_inner().next().unwrap();
            match process_i16(&int_pair, state.mode) {
                Ok(value) => {
                    state.code[index] |= enum_to_word(Operand::SH) << shift;
                    let _ = state.emit(&int_pair, value as Word);
                }
                Err(err) => state.report(err),
            }
        }
        Rule::identifier | Rule::string => {
            if let Some(id) = state.get_or_create_symbol(&inner) {
                state.code[index] |= Word::from(id);
            }
        }
        _ => unreachable!(),
    }
}

fn process_instruction(pair: Pair<Rule>, state: &mut State) {
    debug_assert_matches!(pair.as_rule(), Rule::instruction);
    let mut pairs = pair.into_inner();
    let mnemonic = pairs.next().unwrap();

    let opcode = match process_mnemonic(&mnemonic) {
        Ok(opcode) => opcode,
        Err(err) => {
            // The line is dropped; references it would have created are
            // never allocated.
            state.report(err);
            return;
        }
    };

    let index = match state.emit(&mnemonic, (enum_to_word(opcode)) << constants::OPCODE_OFFSET) {
        Some(index) => index,
        None => return,
    };

    for (slot, operand) in pairs.enumerate() {
        process_operand(operand, index, slot == 0, state);
    }
}

fn process_label(pair: Pair<Rule>, state: &mut State) {
    debug_assert_matches!(pair.as_rule(), Rule::label_def);
    let name = pair.clone().into_inner().next().unwrap();
    if let Some(id) = state.get_or_create_symbol(&name) {
        let _ = state.emit(&pair, make_symbol_instruction(Opcode::LBL, id));
    }
}

fn process_directive(pair: Pair<Rule>, state: &mut State) {
    debug_assert_matches!(pair.as_rule(), Rule::symbol_directive);
    let name = pair.into_inner().next().unwrap();
    state.get_or_create_symbol(&name);
}

fn process_line(pair: Pair<Rule>, state: &mut State) {
    debug_assert_matches!(pair.as_rule(), Rule::line);
    let mut pairs = pair.into_inner();
    let first = pairs.next().unwrap();
    let first_rule = first.as_rule();

    match first_rule {
        Rule::label_def => process_label(first, state),
        Rule::symbol_directive => process_directive(first, state),
        Rule::instruction => process_instruction(first, state),
        Rule::junk => {
            state.report(CompileError::new(
                ErrorKind::BadOperand,
                first.as_span(),
                "Cannot parse line".to_owned(),
            ));
            return;
        }
        _ => unreachable!(),
    }

    // Everything after a label definition is discarded; a remainder after
    // an instruction or directive is a diagnostic.
    if first_rule != Rule::label_def {
        if let Some(junk) = pairs.next() {
            state.report(CompileError::new(
                ErrorKind::BadOperand,
                junk.as_span(),
                "Unexpected trailing tokens".to_owned(),
            ));
        }
    }
}

pub(crate) fn process_program(
    pair: Pair<Rule>,
    mode: Mode,
) -> (Vec<Word>, SymbolTable, Vec<CompileError>) {
    debug_assert_matches!(pair.as_rule(), Rule::program);
    let mut state = State::new(mode);

    for line in pair.into_inner().filter(|p| p.as_rule() == Rule::line) {
        process_line(line, &mut state);
    }

    (state.code, state.symbols, state.errors)
}
