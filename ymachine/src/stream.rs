//! Whole code streams: back-to-back instructions with no framing, and
//! tagged images that name their own layout.

use tracing::debug;

use crate::{
    error::{Error, Result},
    yinst::{Format, Instruction, INSTRUCTION_WIDTH},
};

/// Walks a code stream one instruction at a time. Stops after the first
/// error.
pub struct Instructions<'a> {
    mem: &'a [u8],
    format: Format,
    offset: Option<usize>,
}

impl<'a> Instructions<'a> {
    pub fn new(mem: &'a [u8], format: Format) -> Instructions<'a> {
        Instructions { mem, format, offset: Some(0) }
    }
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Result<Instruction>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offset.take()?;
        if offset >= self.mem.len() {
            return None;
        }

        match Instruction::from_mem(&self.mem[offset..], self.format) {
            Ok((instr, size)) => {
                self.offset = Some(offset + size);
                Some(Ok(instr))
            }
            Err(_) => Some(Err(Error::TruncatedStream {
                offset,
                remaining: self.mem.len() - offset,
            })),
        }
    }
}

/// Decodes every instruction in `bytes`. A stream that does not end on an
/// instruction boundary is rejected as a whole.
pub fn decode_stream(bytes: &[u8], format: Format) -> Result<Vec<Instruction>> {
    let instrs = Instructions::new(bytes, format).collect::<Result<Vec<_>>>()?;
    debug!(count = instrs.len(), %format, "decoded code stream");

    Ok(instrs)
}

pub fn encode_stream(instrs: &[Instruction], format: Format) -> Vec<u8> {
    let mut out = Vec::with_capacity(instrs.len() * INSTRUCTION_WIDTH);
    for instr in instrs {
        out.extend_from_slice(&format.encode(instr));
    }

    out
}

/// Rewrites a stream laid out as `from` into the `to` layout.
pub fn transcode(bytes: &[u8], from: Format, to: Format) -> Result<Vec<u8>> {
    let instrs = decode_stream(bytes, from)?;
    debug!(%from, %to, count = instrs.len(), "transcoding");

    Ok(encode_stream(&instrs, to))
}

/// A code stream prefixed by a one-byte format tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeImage {
    pub format: Format,
    pub instructions: Vec<Instruction>,
}

impl CodeImage {
    pub fn new(format: Format, instructions: Vec<Instruction>) -> CodeImage {
        CodeImage { format, instructions }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![self.format.tag()];
        out.extend(encode_stream(&self.instructions, self.format));

        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<CodeImage> {
        let (tag, body) = bytes.split_first().ok_or(Error::InvalidLength {
            expected: 1,
            actual: 0,
        })?;
        let format = Format::from_tag(*tag)?;

        // offsets in errors are relative to the whole image
        let instructions = decode_stream(body, format).map_err(|e| match e {
            Error::TruncatedStream { offset, remaining } => Error::TruncatedStream {
                offset: offset + 1,
                remaining,
            },
            e => e,
        })?;

        Ok(CodeImage { format, instructions })
    }

    /// Whether `bytes` parse as an image. Only the tag and the body length
    /// are checked.
    pub fn sniff(bytes: &[u8]) -> bool {
        match bytes.split_first() {
            Some((tag, body)) => Format::from_tag(*tag).is_ok() && body.len() % INSTRUCTION_WIDTH == 0,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{jmp_cond, opcode, reg, syscall};

    fn program() -> Vec<Instruction> {
        vec![
            Instruction::new(opcode::IMM, reg::A, 0x05),
            Instruction::new(opcode::IMM, reg::B, 0x07),
            Instruction::new(opcode::ADD, reg::A, reg::B),
            Instruction::new(opcode::CMP, reg::A, reg::B),
            Instruction::new(opcode::JMP, jmp_cond::LT | jmp_cond::EQ, reg::D),
            Instruction::new(opcode::SYS, syscall::EXIT, reg::A),
        ]
    }

    #[test]
    fn stream_round_trip() {
        for format in Format::ALL.iter() {
            let bytes = encode_stream(&program(), *format);
            assert_eq!(bytes.len(), program().len() * INSTRUCTION_WIDTH);
            assert_eq!(decode_stream(&bytes, *format), Ok(program()));
        }
    }

    #[test]
    fn empty_stream() {
        assert_eq!(decode_stream(&[], Format::V1), Ok(vec![]));
        assert!(encode_stream(&[], Format::V2).is_empty());
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let mut bytes = encode_stream(&program(), Format::V1);
        bytes.push(0x01);
        bytes.push(0x10);

        assert_eq!(
            decode_stream(&bytes, Format::V1),
            Err(Error::TruncatedStream { offset: 18, remaining: 2 })
        );
    }

    #[test]
    fn iterator_stops_after_error() {
        let bytes = [0x01, 0x10, 0x05, 0x80];
        let mut it = Instructions::new(&bytes, Format::V1);

        assert_eq!(it.next(), Some(Ok(Instruction::new(0x01, 0x10, 0x05))));
        assert_eq!(it.next(), Some(Err(Error::TruncatedStream { offset: 3, remaining: 1 })));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn transcode_between_layouts() {
        let v1 = encode_stream(&program(), Format::V1);
        let v2 = transcode(&v1, Format::V1, Format::V2).unwrap();

        assert_eq!(v2, encode_stream(&program(), Format::V2));
        assert_eq!(transcode(&v2, Format::V2, Format::V1), Ok(v1));
    }

    #[test]
    fn image_round_trip() {
        for format in Format::ALL.iter() {
            let image = CodeImage::new(*format, program());
            let bytes = image.to_bytes();

            assert_eq!(bytes[0], format.tag());
            assert!(CodeImage::sniff(&bytes));
            assert_eq!(CodeImage::from_bytes(&bytes), Ok(image));
        }
    }

    #[test]
    fn image_errors() {
        assert_eq!(
            CodeImage::from_bytes(&[]),
            Err(Error::InvalidLength { expected: 1, actual: 0 })
        );
        assert_eq!(CodeImage::from_bytes(&[0x07, 1, 2, 3]), Err(Error::UnknownFormat(0x07)));
        assert_eq!(
            CodeImage::from_bytes(&[0x02, 1, 2, 3, 4]),
            Err(Error::TruncatedStream { offset: 4, remaining: 1 })
        );
        assert!(!CodeImage::sniff(&[0x02, 1, 2]));
        assert!(!CodeImage::sniff(&[]));
    }
}
