//! Named byte values shared by everything that reads or writes code.
//!
//! Every value is a single-bit mask rather than a dense index, so callers may
//! combine them with `|` and test them with `&`.

/// A read-only name/value listing for one group of constants.
#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub entries: &'static [(&'static str, u8)],
}

impl Table {
    /// Looks a constant up by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }

    /// The name bound to exactly `value`, if any.
    pub fn name_of(&self, value: u8) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(n, _)| *n)
    }

    /// Names of every entry whose bits are all set in `mask`, in table order.
    pub fn flags_of(&self, mask: u8) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|(_, v)| *v != 0 && mask & *v == *v)
            .map(|(n, _)| *n)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, u8)> {
        self.entries.iter()
    }
}

pub mod reg {
    use super::Table;

    pub const A: u8 = 0x10;
    pub const B: u8 = 0x02;
    pub const C: u8 = 0x40;
    pub const D: u8 = 0x01;
    pub const S: u8 = 0x08;
    pub const F: u8 = 0x20;
    pub const I: u8 = 0x04;

    pub const TABLE: Table = Table {
        name: "register",
        entries: &[("a", A), ("b", B), ("c", C), ("d", D), ("s", S), ("f", F), ("i", I)],
    };
}

pub mod opcode {
    use super::Table;

    pub const IMM: u8 = 0x01;
    pub const ADD: u8 = 0x80;
    pub const STK: u8 = 0x02;
    pub const STM: u8 = 0x04;
    pub const LDM: u8 = 0x20;
    pub const CMP: u8 = 0x08;
    pub const JMP: u8 = 0x40;
    pub const SYS: u8 = 0x10;

    pub const TABLE: Table = Table {
        name: "opcode",
        entries: &[
            ("imm", IMM),
            ("add", ADD),
            ("stk", STK),
            ("stm", STM),
            ("ldm", LDM),
            ("cmp", CMP),
            ("jmp", JMP),
            ("sys", SYS),
        ],
    };
}

pub mod syscall {
    use super::Table;

    pub const OPEN: u8 = 0x20;
    pub const READ_CODE: u8 = 0x02;
    pub const READ_MEM: u8 = 0x01;
    pub const WRITE: u8 = 0x04;
    pub const SLEEP: u8 = 0x10;
    pub const EXIT: u8 = 0x08;

    pub const TABLE: Table = Table {
        name: "syscall",
        entries: &[
            ("open", OPEN),
            ("read_code", READ_CODE),
            ("read_mem", READ_MEM),
            ("write", WRITE),
            ("sleep", SLEEP),
            ("exit", EXIT),
        ],
    };
}

pub mod jmp_cond {
    use super::Table;

    pub const LT: u8 = 0x08;
    pub const GT: u8 = 0x04;
    pub const EQ: u8 = 0x10;
    pub const NZ: u8 = 0x02;
    pub const Z: u8 = 0x01;

    pub const TABLE: Table = Table {
        name: "jump condition",
        entries: &[("lt", LT), ("gt", GT), ("eq", EQ), ("nz", NZ), ("z", Z)],
    };
}

pub const TABLES: [&Table; 4] = [&reg::TABLE, &opcode::TABLE, &syscall::TABLE, &jmp_cond::TABLE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_values() {
        assert_eq!(reg::A, 0x10);
        assert_eq!(reg::B, 0x02);
        assert_eq!(reg::C, 0x40);
        assert_eq!(reg::D, 0x01);
        assert_eq!(reg::S, 0x08);
        assert_eq!(reg::F, 0x20);
        assert_eq!(reg::I, 0x04);
    }

    #[test]
    fn opcode_values() {
        assert_eq!(opcode::IMM, 0x01);
        assert_eq!(opcode::ADD, 0x80);
        assert_eq!(opcode::STK, 0x02);
        assert_eq!(opcode::STM, 0x04);
        assert_eq!(opcode::LDM, 0x20);
        assert_eq!(opcode::CMP, 0x08);
        assert_eq!(opcode::JMP, 0x40);
        assert_eq!(opcode::SYS, 0x10);
    }

    #[test]
    fn syscall_values() {
        assert_eq!(syscall::OPEN, 0x20);
        assert_eq!(syscall::READ_CODE, 0x02);
        assert_eq!(syscall::READ_MEM, 0x01);
        assert_eq!(syscall::WRITE, 0x04);
        assert_eq!(syscall::SLEEP, 0x10);
        assert_eq!(syscall::EXIT, 0x08);
    }

    #[test]
    fn jump_condition_values() {
        assert_eq!(jmp_cond::LT, 0x08);
        assert_eq!(jmp_cond::GT, 0x04);
        assert_eq!(jmp_cond::EQ, 0x10);
        assert_eq!(jmp_cond::NZ, 0x02);
        assert_eq!(jmp_cond::Z, 0x01);
    }

    #[test]
    fn tables_are_pairwise_distinct() {
        for table in TABLES.iter() {
            for (i, (name_a, a)) in table.entries.iter().enumerate() {
                for (name_b, b) in &table.entries[i + 1..] {
                    assert_ne!(a, b, "{}: {} and {} collide", table.name, name_a, name_b);
                    assert_ne!(name_a, name_b, "{}: duplicate name {}", table.name, name_a);
                }
            }
        }
    }

    #[test]
    fn every_value_is_a_single_bit() {
        for table in TABLES.iter() {
            for (name, v) in table.iter() {
                assert_eq!(v.count_ones(), 1, "{} {} = {:#04x}", table.name, name, v);
            }
        }
    }

    #[test]
    fn lookup_agrees_with_reverse_lookup() {
        for table in TABLES.iter() {
            for (name, v) in table.iter() {
                assert_eq!(table.get(name), Some(*v));
                assert_eq!(table.name_of(*v), Some(*name));
            }
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(syscall::TABLE.get("READ_CODE"), Some(syscall::READ_CODE));
        assert_eq!(reg::TABLE.get("A"), Some(reg::A));
        assert_eq!(opcode::TABLE.get("nop"), None);
    }

    #[test]
    fn composed_masks() {
        let mask = jmp_cond::LT | jmp_cond::EQ;
        assert_eq!(jmp_cond::TABLE.name_of(mask), None);
        assert_eq!(jmp_cond::TABLE.flags_of(mask), vec!["lt", "eq"]);
        assert!(jmp_cond::TABLE.flags_of(0).is_empty());
    }
}
