//! Text form of instructions.
//!
//! One instruction per line, `<opcode> <arg1> <arg2>`. Operands are numeric
//! literals or names from the register, syscall and jump-condition tables,
//! and may be joined with `|`. Names resolve to bytes and nothing more. `;`
//! starts a comment.

use std::convert::TryFrom;

use tracing::debug;

use crate::{
    constants::{jmp_cond, opcode, reg, syscall, Table},
    error::{Error, Result},
    yinst::Instruction,
};

const OPERAND_TABLES: [&Table; 3] = [&reg::TABLE, &syscall::TABLE, &jmp_cond::TABLE];

fn syntax(line: usize, message: String) -> Error {
    Error::Syntax { line, message }
}

fn parse_number(tok: &str) -> Option<std::result::Result<u8, String>> {
    let lower = tok.to_ascii_lowercase();
    let parsed = if let Some(hex) = lower.strip_prefix("0x") {
        u32::from_str_radix(hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u32::from_str_radix(bin, 2)
    } else if lower.starts_with(|c: char| c.is_ascii_digit()) {
        lower.parse::<u32>()
    } else {
        return None;
    };

    Some(match parsed {
        Ok(v) => u8::try_from(v).map_err(|_| format!("value `{}` does not fit in a byte", tok)),
        Err(_) => Err(format!("malformed number `{}`", tok)),
    })
}

fn parse_symbol(tok: &str) -> Option<u8> {
    OPERAND_TABLES.iter().find_map(|t| t.get(tok))
}

fn parse_opcode(tok: &str) -> std::result::Result<u8, String> {
    if let Some(n) = parse_number(tok) {
        return n;
    }

    opcode::TABLE
        .get(tok)
        .ok_or_else(|| format!("unknown opcode `{}`", tok))
}

fn parse_operand(tok: &str) -> std::result::Result<u8, String> {
    let mut value = 0u8;
    for part in tok.split('|') {
        let part = part.trim();
        if part.is_empty() {
            return Err(format!("empty term in operand `{}`", tok));
        }

        value |= match parse_number(part) {
            Some(n) => n?,
            None => parse_symbol(part).ok_or_else(|| format!("unknown operand `{}`", part))?,
        };
    }

    Ok(value)
}

/// Assembles `source` into instructions. Errors name the 1-based line.
pub fn assemble(source: &str) -> Result<Vec<Instruction>> {
    let mut instrs = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = match raw.find(';') {
            Some(i) => &raw[..i],
            None => raw,
        };

        let tokens: Vec<&str> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();

        match tokens.as_slice() {
            [] => continue,
            [op, arg1, arg2] => {
                let op = parse_opcode(op).map_err(|m| syntax(line, m))?;
                let arg1 = parse_operand(arg1).map_err(|m| syntax(line, m))?;
                let arg2 = parse_operand(arg2).map_err(|m| syntax(line, m))?;

                instrs.push(Instruction::new(op, arg1, arg2));
            }
            other => {
                return Err(syntax(
                    line,
                    format!("expected `<opcode> <arg1> <arg2>`, found {} token(s)", other.len()),
                ))
            }
        }
    }

    debug!(count = instrs.len(), "assembled");
    Ok(instrs)
}

/// One line per instruction. The output assembles back to `instrs`.
pub fn disassemble(instrs: &[Instruction]) -> String {
    let mut out = String::new();
    for instr in instrs {
        out.push_str(&instr.to_string());
        out.push('\n');
    }

    out
}
