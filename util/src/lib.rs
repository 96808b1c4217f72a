use std::{error::Error, fmt};

/// Byte order shared by everything serialized in this workspace: program
/// images and word streams are little-endian throughout.
pub type Endian = byteorder::LittleEndian;

/// Fixed-size enums addressed by canonical uppercase names, like opcode
/// mnemonics and operand codes.
///
/// Derivable for field-less enums via `util_derive::NamedEnum`; the
/// derive also wires up `FromStr`, so `"MOV".parse()` works. Lookup is
/// case-sensitive; callers offering case-insensitive matching (the
/// assembler does, for mnemonics) uppercase the token first.
pub trait NamedEnum: Sized {
    /// Canonical variant names, in declaration order.
    const NAMES: &'static [&'static str];

    /// The canonical name of this value.
    fn name(&self) -> &'static str;

    /// Looks a value up by its canonical name.
    fn from_name(token: &str) -> Result<Self, UnknownName>;
}

/// A token that names no variant: a misspelled mnemonic, an unknown
/// register name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownName {
    /// The offending token, as written in the source.
    pub token: String,
    /// What was being looked up (`"Opcode"`, `"Operand"`, ...).
    pub kind: &'static str,
}

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "no {} is named \"{}\"", self.kind, self.token)
    }
}

impl Error for UnknownName {}
