//! Where each instruction field sits in the 24-bit word, per format.
//!
//! Byte 0 of the wire buffer is bits 16..24 of the word.

use crate::{bits::YWord, yinst::Instruction};

bitstruct! {
    V1Word: u32 {
        op: V1Op, Width = U8, Offset = U16,
        arg1: V1Arg1, Width = U8, Offset = U8,
        arg2: V1Arg2, Width = U8, Offset = U0
    },

    V2Word: u32 {
        arg2: V2Arg2, Width = U8, Offset = U16,
        op: V2Op, Width = U8, Offset = U8,
        arg1: V2Arg1, Width = U8, Offset = U0
    }
}

impl V1Word {
    pub(crate) fn pack(instr: &Instruction) -> YWord {
        let word = V1Op::pack(instr.op as u32)
            | V1Arg1::pack(instr.arg1 as u32)
            | V1Arg2::pack(instr.arg2 as u32);

        YWord::from(word)
    }

    pub(crate) fn unpack(&self) -> Instruction {
        Instruction::new(
            self.op.value_of() as u8,
            self.arg1.value_of() as u8,
            self.arg2.value_of() as u8,
        )
    }
}

impl V2Word {
    pub(crate) fn pack(instr: &Instruction) -> YWord {
        let word = V2Op::pack(instr.op as u32)
            | V2Arg1::pack(instr.arg1 as u32)
            | V2Arg2::pack(instr.arg2 as u32);

        YWord::from(word)
    }

    pub(crate) fn unpack(&self) -> Instruction {
        Instruction::new(
            self.op.value_of() as u8,
            self.arg1.value_of() as u8,
            self.arg2.value_of() as u8,
        )
    }
}
