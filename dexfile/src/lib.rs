use byteorder::{ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::mem;
use std::path::Path;
use util::Endian;

/// An assembled program: packed code words plus the symbol-name table.
///
/// Produced once by the assembler and consumed read-only by any number of
/// VMs. The symbol names are debug metadata; execution never needs them.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    code: Vec<u16>,
    symbols: Vec<String>,
}

impl Program {
    pub fn from(code: Vec<u16>, symbols: Vec<String>) -> Program {
        Program { code, symbols }
    }

    pub fn code(&self) -> &[u16] {
        &self.code[..]
    }

    /// Symbol names indexed by id.
    pub fn symbols(&self) -> &[String] {
        &self.symbols[..]
    }

    /// Program size in words.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn required_size(&self) -> usize {
        mem::size_of::<u32>() * 2
            + self.code.len() * mem::size_of::<u16>()
            + self
                .symbols
                .iter()
                .map(|name| mem::size_of::<u16>() + name.len())
                .sum::<usize>()
    }
}

pub fn read<R: Read>(reader: &mut R) -> std::io::Result<Program> {
    let code_len = reader.read_u32::<Endian>()?;
    let symbol_count = reader.read_u32::<Endian>()?;

    let mut code = vec![0u16; code_len as usize];
    reader.read_u16_into::<Endian>(&mut code)?;

    let mut symbols = Vec::with_capacity(symbol_count as usize);
    for _ in 0..symbol_count {
        let name_len = reader.read_u16::<Endian>()?;
        let mut name = vec![0u8; name_len as usize];
        reader.read_exact(&mut name)?;
        symbols.push(String::from_utf8(name).map_err(|err| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, err)
        })?);
    }

    Ok(Program::from(code, symbols))
}

pub fn write<W: Write>(writer: &mut W, program: &Program) -> std::io::Result<()> {
    writer.write_u32::<Endian>(program.code.len() as u32)?;
    writer.write_u32::<Endian>(program.symbols.len() as u32)?;
    for &word in &program.code {
        writer.write_u16::<Endian>(word)?;
    }
    for name in &program.symbols {
        writer.write_u16::<Endian>(name.len() as u16)?;
        writer.write_all(name.as_bytes())?;
    }
    Ok(())
}

pub trait ReadDexExt: Read + Sized {
    fn read_dex(&mut self) -> std::io::Result<Program> {
        read(self)
    }
}

impl<R: Read + Sized> ReadDexExt for R {}

pub trait WriteDexExt: Write + Sized {
    fn write_dex(&mut self, program: &Program) -> std::io::Result<()> {
        write(self, program)
    }
}

impl<W: Write + Sized> WriteDexExt for W {}

pub fn read_file<P: AsRef<Path>>(path: P) -> std::io::Result<Program> {
    BufReader::new(File::open(path)?).read_dex()
}

pub fn write_file<P: AsRef<Path>>(path: P, program: &Program) -> std::io::Result<()> {
    BufWriter::new(File::create(path)?).write_dex(program)
}
