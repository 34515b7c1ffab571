//! CB-prefixed page: rotate/shift, BIT, RES, SET.
//!
//! Every opcode here is defined, so the dispatcher never sees a hole in this
//! table; the signature returns a plain cost rather than `Option<u32>`.
//! Under `DD CB d`/`FD CB d` the operand field (bits 0-2) is ignored and the
//! target is always the indexed memory cell (§4.2) — the undocumented
//! register-plus-memory write-back form is not implemented.

use emu_core::Bus;

use crate::alu;
use crate::decode::IndexMode;
use crate::flags::mask;

use super::Z80;

impl Z80 {
    pub(crate) fn execute_cb<B: Bus>(&mut self, bus: &mut B, op: u8, mode: IndexMode, displacement: i8) -> u32 {
        let group = (op >> 6) & 3;
        let bit = (op >> 3) & 7;
        let field = op & 7;
        let indexed = mode != IndexMode::Hl;

        let value = if indexed {
            bus.read_memory_byte(self.indexed_address(mode, displacement))
        } else {
            self.get_reg8(bus, field, IndexMode::Hl, 0)
        };

        match group {
            0 => {
                // Rotate/shift group.
                let result = match bit {
                    0 => alu::rlc8(value),
                    1 => alu::rrc8(value),
                    2 => alu::rl8(value, self.regs.f & crate::flags::CF != 0),
                    3 => alu::rr8(value, self.regs.f & crate::flags::CF != 0),
                    4 => alu::sla8(value),
                    5 => alu::sra8(value),
                    6 => alu::sll8(value),
                    7 => alu::srl8(value),
                    _ => unreachable!("3-bit field"),
                };
                self.regs.f = mask(result.flags);
                if indexed {
                    bus.write_memory_byte(self.indexed_address(mode, displacement), result.value);
                    20
                } else {
                    self.set_reg8(bus, field, IndexMode::Hl, 0, result.value);
                    if field == 6 { 15 } else { 8 }
                }
            }
            1 => {
                // BIT b,r / BIT b,(HL) / BIT b,(IX+d)
                self.regs.f = mask(alu::bit_test(value, bit, self.regs.f & crate::flags::CF != 0));
                if indexed || field == 6 { 12 } else { 8 }
            }
            2 => {
                // RES b,r
                let result = value & !(1 << bit);
                if indexed {
                    bus.write_memory_byte(self.indexed_address(mode, displacement), result);
                    20
                } else {
                    self.set_reg8(bus, field, IndexMode::Hl, 0, result);
                    if field == 6 { 15 } else { 8 }
                }
            }
            3 => {
                // SET b,r
                let result = value | (1 << bit);
                if indexed {
                    bus.write_memory_byte(self.indexed_address(mode, displacement), result);
                    20
                } else {
                    self.set_reg8(bus, field, IndexMode::Hl, 0, result);
                    if field == 6 { 15 } else { 8 }
                }
            }
            _ => unreachable!("2-bit field"),
        }
    }
}
