use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::{
    bits::YWord,
    constants::opcode,
    error::{Error, Result},
    layout::{V1Word, V2Word},
};

/// Every instruction is one opcode byte and two operand bytes.
pub const INSTRUCTION_WIDTH: usize = 3;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub op: u8,
    pub arg1: u8,
    pub arg2: u8,
}

/// Byte layout of an encoded instruction.
///
/// | Format | Byte 0 | Byte 1 | Byte 2 |
/// |--------|--------|--------|--------|
/// | V1     | op     | arg1   | arg2   |
/// | V2     | arg2   | op     | arg1   |
///
/// Nothing in the bytes says which layout produced them, so a whole stream
/// has to be read with the format it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    V1,
    V2,
}

impl Default for Format {
    fn default() -> Format {
        Format::V1
    }
}

impl Format {
    pub const ALL: [Format; 2] = [Format::V1, Format::V2];

    /// The byte written at the head of a tagged code image.
    pub fn tag(self) -> u8 {
        match self {
            Format::V1 => 1,
            Format::V2 => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Format> {
        match tag {
            1 => Ok(Format::V1),
            2 => Ok(Format::V2),
            t => Err(Error::UnknownFormat(t)),
        }
    }

    pub fn encode(self, instr: &Instruction) -> [u8; INSTRUCTION_WIDTH] {
        let word = match self {
            Format::V1 => V1Word::pack(instr),
            Format::V2 => V2Word::pack(instr),
        };

        word.into()
    }

    /// Decodes exactly one instruction. Any buffer that is not
    /// `INSTRUCTION_WIDTH` bytes long is refused outright.
    pub fn decode(self, buf: &[u8]) -> Result<Instruction> {
        let bytes = <[u8; INSTRUCTION_WIDTH]>::try_from(buf).map_err(|_| Error::InvalidLength {
            expected: INSTRUCTION_WIDTH,
            actual: buf.len(),
        })?;
        let word = u32::from(YWord::from(bytes));

        let instr = match self {
            Format::V1 => V1Word::new(word).unpack(),
            Format::V2 => V2Word::new(word).unpack(),
        };

        Ok(instr)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::V1 => write!(f, "v1"),
            Format::V2 => write!(f, "v2"),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Format> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Format::V1),
            "v2" | "2" => Ok(Format::V2),
            _ => Err(Error::UnknownFormatName(s.to_string())),
        }
    }
}

impl Instruction {
    pub fn new(op: u8, arg1: u8, arg2: u8) -> Instruction {
        Instruction { op, arg1, arg2 }
    }

    pub fn encode(&self, format: Format) -> [u8; INSTRUCTION_WIDTH] {
        format.encode(self)
    }

    pub fn decode(buf: &[u8], format: Format) -> Result<Instruction> {
        format.decode(buf)
    }

    /// Decodes the instruction at the head of `mem`, returning it along with
    /// the number of bytes it took up.
    pub fn from_mem(mem: &[u8], format: Format) -> Result<(Instruction, usize)> {
        let head = mem.get(..INSTRUCTION_WIDTH).ok_or(Error::InvalidLength {
            expected: INSTRUCTION_WIDTH,
            actual: mem.len(),
        })?;

        let instr = format.decode(head)?;
        trace!(?instr, %format, "decoded instruction");

        Ok((instr, INSTRUCTION_WIDTH))
    }

    /// The opcode mnemonic, when `op` names exactly one opcode.
    pub fn mnemonic(&self) -> Option<&'static str> {
        opcode::TABLE.name_of(self.op)
    }
}

fn narrow(field: &'static str, value: u32) -> Result<u8> {
    u8::try_from(value).map_err(|_| Error::OutOfRange { field, value })
}

impl TryFrom<(u32, u32, u32)> for Instruction {
    type Error = Error;

    fn try_from(v: (u32, u32, u32)) -> Result<Instruction> {
        let (op, arg1, arg2) = v;

        Ok(Instruction::new(
            narrow("op", op)?,
            narrow("arg1", arg1)?,
            narrow("arg2", arg2)?,
        ))
    }
}

impl From<(u8, u8, u8)> for Instruction {
    fn from(v: (u8, u8, u8)) -> Instruction {
        let (op, arg1, arg2) = v;
        Instruction::new(op, arg1, arg2)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(m) => write!(f, "{}", m)?,
            None => write!(f, "{:#04x}", self.op)?,
        }

        write!(f, " {:#04x} {:#04x}", self.arg1, self.arg2)
    }
}
