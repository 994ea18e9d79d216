#![recursion_limit = "512"]

#[macro_use]
mod bits;

pub mod asm;
pub mod constants;
mod error;
mod layout;
pub mod stream;
mod yinst;

#[macro_use]
extern crate typenum;

pub use error::{Error, Result};
pub use stream::{decode_stream, encode_stream, transcode, CodeImage, Instructions};
pub use yinst::{Format, Instruction, INSTRUCTION_WIDTH};
