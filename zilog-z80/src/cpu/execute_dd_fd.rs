//! `DD`/`FD`-prefixed page: the IX/IY forms.
//!
//! Unlike the unprefixed, CB and ED pages this one is not fully populated —
//! only the documented index-register instructions are implemented. Every
//! other DD/FD opcode, including the undocumented `IXH`/`IXL` 8-bit forms,
//! falls through to `InvalidInstruction`. `decode::get_reg16`/`set_reg16`
//! already substitute IX/IY for the HL field (2) given `mode`, so the
//! 16-bit forms below are identical in shape to their unprefixed
//! counterparts.

use emu_core::Bus;

use crate::alu;
use crate::decode::IndexMode;
use crate::flags::{CF, mask};

use super::Z80;

impl Z80 {
    pub(crate) fn execute_dd_fd<B: Bus>(&mut self, bus: &mut B, mode: IndexMode, op: u8) -> Option<u32> {
        Some(match op {
            0x09 | 0x19 | 0x29 | 0x39 => {
                // ADD IX,rp
                let operand = self.get_reg16((op >> 4) & 3, mode);
                let (result, flags) = alu::add16(self.get_reg16(2, mode), operand);
                self.set_reg16(2, mode, result);
                self.regs.f = (self.regs.f & !(CF | crate::flags::HF | crate::flags::NF)) | flags;
                15
            }

            0x21 => {
                // LD IX,nn
                let value = self.fetch_word(bus);
                self.set_reg16(2, mode, value);
                14
            }
            0x22 => {
                // LD (nn),IX
                let addr = self.fetch_word(bus);
                bus.write_memory_word(addr, self.get_reg16(2, mode));
                20
            }
            0x2A => {
                // LD IX,(nn)
                let addr = self.fetch_word(bus);
                let value = bus.read_memory_word(addr);
                self.set_reg16(2, mode, value);
                20
            }
            0x23 => {
                // INC IX
                self.set_reg16(2, mode, self.get_reg16(2, mode).wrapping_add(1));
                10
            }
            0x2B => {
                // DEC IX
                self.set_reg16(2, mode, self.get_reg16(2, mode).wrapping_sub(1));
                10
            }

            0x34 => {
                // INC (IX+d)
                let d = self.fetch_displacement(bus);
                let addr = self.indexed_address(mode, d);
                let value = bus.read_memory_byte(addr);
                let result = alu::inc8(value);
                bus.write_memory_byte(addr, result.value);
                self.regs.f = mask((self.regs.f & CF) | result.flags);
                23
            }
            0x35 => {
                // DEC (IX+d)
                let d = self.fetch_displacement(bus);
                let addr = self.indexed_address(mode, d);
                let value = bus.read_memory_byte(addr);
                let result = alu::dec8(value);
                bus.write_memory_byte(addr, result.value);
                self.regs.f = mask((self.regs.f & CF) | result.flags);
                23
            }
            0x36 => {
                // LD (IX+d),n
                let d = self.fetch_displacement(bus);
                let value = self.fetch_byte(bus);
                bus.write_memory_byte(self.indexed_address(mode, d), value);
                19
            }

            0x46 | 0x4E | 0x56 | 0x5E | 0x66 | 0x6E | 0x7E => {
                // LD r,(IX+d)
                let field = (op >> 3) & 7;
                let d = self.fetch_displacement(bus);
                let value = bus.read_memory_byte(self.indexed_address(mode, d));
                self.set_reg8(bus, field, IndexMode::Hl, 0, value);
                19
            }
            0x70 | 0x71 | 0x72 | 0x73 | 0x74 | 0x75 | 0x77 => {
                // LD (IX+d),r
                let field = op & 7;
                let d = self.fetch_displacement(bus);
                let value = self.get_reg8(bus, field, IndexMode::Hl, 0);
                bus.write_memory_byte(self.indexed_address(mode, d), value);
                19
            }

            0x86 | 0x8E | 0x96 | 0x9E | 0xA6 | 0xAE | 0xB6 | 0xBE => {
                // ALU A,(IX+d)
                let alu_op = (op >> 3) & 7;
                let d = self.fetch_displacement(bus);
                let value = bus.read_memory_byte(self.indexed_address(mode, d));
                self.apply_alu(alu_op, value);
                19
            }

            0xE1 => {
                // POP IX
                let value = self.pop_word(bus);
                self.set_reg16(2, mode, value);
                14
            }
            0xE5 => {
                // PUSH IX
                self.push_word(bus, self.get_reg16(2, mode));
                15
            }
            0xE3 => {
                // EX (SP),IX
                let addr = self.regs.sp;
                let mem = bus.read_memory_word(addr);
                bus.write_memory_word(addr, self.get_reg16(2, mode));
                self.set_reg16(2, mode, mem);
                23
            }
            0xE9 => {
                // JP (IX)
                self.regs.pc = self.get_reg16(2, mode);
                8
            }
            0xF9 => {
                // LD SP,IX
                self.regs.sp = self.get_reg16(2, mode);
                10
            }

            _ => return None,
        })
    }
}
