use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A single-instruction buffer was not exactly one instruction wide.
    #[error("invalid instruction length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A wide integer did not fit in an 8-bit instruction field.
    #[error("value {value} out of range for field `{field}` (0..=255)")]
    OutOfRange { field: &'static str, value: u32 },

    #[error("unknown instruction format tag {0:#04x}")]
    UnknownFormat(u8),

    #[error("unknown instruction format `{0}` (expected v1 or v2)")]
    UnknownFormatName(String),

    /// A code stream ended part way through an instruction.
    #[error("code stream truncated at offset {offset}: {remaining} trailing byte(s)")]
    TruncatedStream { offset: usize, remaining: usize },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}
