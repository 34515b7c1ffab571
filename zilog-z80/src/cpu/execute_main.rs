//! Main opcode page (unprefixed instructions).

use emu_core::Bus;

use crate::alu;
use crate::decode::IndexMode;
use crate::flags::{CF, ZF, mask};

use super::Z80;

impl Z80 {
    /// Execute an unprefixed opcode. Returns `None` for the handful of main
    /// page slots with no defined instruction (0xCB/0xDD/0xED/0xFD are
    /// siphoned off by the caller before this is reached).
    pub(crate) fn execute_main<B: Bus>(&mut self, bus: &mut B, op: u8) -> Option<u32> {
        let hl = IndexMode::Hl;

        Some(match op {
            0x00 => 4, // NOP

            0x01 | 0x11 | 0x21 | 0x31 => {
                // LD rp,nn
                let value = self.fetch_word(bus);
                self.set_reg16((op >> 4) & 3, hl, value);
                10
            }

            0x02 => {
                // LD (BC),A
                bus.write_memory_byte(self.regs.bc(), self.regs.a);
                7
            }
            0x12 => {
                // LD (DE),A
                bus.write_memory_byte(self.regs.de(), self.regs.a);
                7
            }
            0x0A => {
                // LD A,(BC)
                self.regs.a = bus.read_memory_byte(self.regs.bc());
                7
            }
            0x1A => {
                // LD A,(DE)
                self.regs.a = bus.read_memory_byte(self.regs.de());
                7
            }

            0x22 => {
                // LD (nn),HL
                let addr = self.fetch_word(bus);
                bus.write_memory_word(addr, self.regs.hl());
                16
            }
            0x2A => {
                // LD HL,(nn)
                let addr = self.fetch_word(bus);
                self.regs.set_hl(bus.read_memory_word(addr));
                16
            }
            0x32 => {
                // LD (nn),A
                let addr = self.fetch_word(bus);
                bus.write_memory_byte(addr, self.regs.a);
                13
            }
            0x3A => {
                // LD A,(nn)
                let addr = self.fetch_word(bus);
                self.regs.a = bus.read_memory_byte(addr);
                13
            }

            0x03 | 0x13 | 0x23 | 0x33 => {
                // INC rp
                let field = (op >> 4) & 3;
                let value = self.get_reg16(field, hl).wrapping_add(1);
                self.set_reg16(field, hl, value);
                6
            }
            0x0B | 0x1B | 0x2B | 0x3B => {
                // DEC rp
                let field = (op >> 4) & 3;
                let value = self.get_reg16(field, hl).wrapping_sub(1);
                self.set_reg16(field, hl, value);
                6
            }
            0x09 | 0x19 | 0x29 | 0x39 => {
                // ADD HL,rp
                let operand = self.get_reg16((op >> 4) & 3, hl);
                let (result, flags) = alu::add16(self.regs.hl(), operand);
                self.regs.set_hl(result);
                self.regs.f = (self.regs.f & !(CF | crate::flags::HF | crate::flags::NF)) | flags;
                11
            }

            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x3C => {
                // INC r (register forms only; (HL) is 0x34)
                let field = (op >> 3) & 7;
                let value = self.get_reg8(bus, field, hl, 0);
                let result = alu::inc8(value);
                self.set_reg8(bus, field, hl, 0, result.value);
                self.regs.f = mask((self.regs.f & CF) | result.flags);
                4
            }
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x3D => {
                // DEC r
                let field = (op >> 3) & 7;
                let value = self.get_reg8(bus, field, hl, 0);
                let result = alu::dec8(value);
                self.set_reg8(bus, field, hl, 0, result.value);
                self.regs.f = mask((self.regs.f & CF) | result.flags);
                4
            }
            0x34 => {
                // INC (HL)
                let addr = self.regs.hl();
                let value = bus.read_memory_byte(addr);
                let result = alu::inc8(value);
                bus.write_memory_byte(addr, result.value);
                self.regs.f = mask((self.regs.f & CF) | result.flags);
                11
            }
            0x35 => {
                // DEC (HL)
                let addr = self.regs.hl();
                let value = bus.read_memory_byte(addr);
                let result = alu::dec8(value);
                bus.write_memory_byte(addr, result.value);
                self.regs.f = mask((self.regs.f & CF) | result.flags);
                11
            }

            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x3E => {
                // LD r,n
                let field = (op >> 3) & 7;
                let value = self.fetch_byte(bus);
                self.set_reg8(bus, field, hl, 0, value);
                7
            }
            0x36 => {
                // LD (HL),n
                let value = self.fetch_byte(bus);
                bus.write_memory_byte(self.regs.hl(), value);
                10
            }

            0x07 => {
                // RLCA
                let (a, carry) = alu::rlca(self.regs.a);
                self.regs.a = a;
                self.regs.f = mask((self.regs.f & (crate::flags::SF | ZF | crate::flags::PF)) | u8::from(carry));
                4
            }
            0x0F => {
                // RRCA
                let (a, carry) = alu::rrca(self.regs.a);
                self.regs.a = a;
                self.regs.f = mask((self.regs.f & (crate::flags::SF | ZF | crate::flags::PF)) | u8::from(carry));
                4
            }
            0x17 => {
                // RLA
                let (a, carry) = alu::rla(self.regs.a, self.regs.f & CF != 0);
                self.regs.a = a;
                self.regs.f = mask((self.regs.f & (crate::flags::SF | ZF | crate::flags::PF)) | u8::from(carry));
                4
            }
            0x1F => {
                // RRA
                let (a, carry) = alu::rra(self.regs.a, self.regs.f & CF != 0);
                self.regs.a = a;
                self.regs.f = mask((self.regs.f & (crate::flags::SF | ZF | crate::flags::PF)) | u8::from(carry));
                4
            }

            0x08 => {
                // EX AF,AF'
                self.regs.exchange_af();
                4
            }
            0xD9 => {
                // EXX
                self.regs.exchange_exx();
                4
            }
            0xEB => {
                // EX DE,HL
                let de = self.regs.de();
                self.regs.set_de(self.regs.hl());
                self.regs.set_hl(de);
                4
            }
            0xE3 => {
                // EX (SP),HL
                let addr = self.regs.sp;
                let mem = bus.read_memory_word(addr);
                bus.write_memory_word(addr, self.regs.hl());
                self.regs.set_hl(mem);
                19
            }

            0x10 => {
                // DJNZ d
                let d = self.fetch_displacement(bus);
                self.regs.b = self.regs.b.wrapping_sub(1);
                if self.regs.b != 0 {
                    self.regs.pc = self.regs.pc.wrapping_add(d as u16);
                    13
                } else {
                    8
                }
            }
            0x18 => {
                // JR d
                let d = self.fetch_displacement(bus);
                self.regs.pc = self.regs.pc.wrapping_add(d as u16);
                12
            }
            0x20 | 0x28 | 0x30 | 0x38 => {
                // JR cc,d (cc restricted to NZ/Z/NC/C, encoded in bits 4-3)
                let d = self.fetch_displacement(bus);
                let cc = (op >> 3) & 3;
                if self.condition(cc) {
                    self.regs.pc = self.regs.pc.wrapping_add(d as u16);
                    12
                } else {
                    7
                }
            }
            0xC3 => {
                // JP nn
                self.regs.pc = self.fetch_word(bus);
                10
            }
            0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => {
                // JP cc,nn
                let target = self.fetch_word(bus);
                if self.condition((op >> 3) & 7) {
                    self.regs.pc = target;
                }
                10
            }
            0xE9 => {
                // JP (HL)
                self.regs.pc = self.regs.hl();
                4
            }

            0xCD => {
                // CALL nn
                let target = self.fetch_word(bus);
                self.push_word(bus, self.regs.pc);
                self.regs.pc = target;
                17
            }
            0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => {
                // CALL cc,nn
                let target = self.fetch_word(bus);
                if self.condition((op >> 3) & 7) {
                    self.push_word(bus, self.regs.pc);
                    self.regs.pc = target;
                    17
                } else {
                    10
                }
            }
            0xC9 => {
                // RET
                self.regs.pc = self.pop_word(bus);
                10
            }
            0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => {
                // RET cc
                if self.condition((op >> 3) & 7) {
                    self.regs.pc = self.pop_word(bus);
                    11
                } else {
                    5
                }
            }
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
                // RST p
                let target = u16::from(op & 0x38);
                self.push_word(bus, self.regs.pc);
                self.regs.pc = target;
                11
            }

            0xC1 | 0xD1 | 0xE1 => {
                // POP BC/DE/HL
                let value = self.pop_word(bus);
                self.set_reg16_af((op >> 4) & 3, value);
                10
            }
            0xF1 => {
                // POP AF
                let value = self.pop_word(bus);
                self.set_reg16_af(3, value);
                10
            }
            0xC5 | 0xD5 | 0xE5 => {
                // PUSH BC/DE/HL
                let value = self.get_reg16_af((op >> 4) & 3);
                self.push_word(bus, value);
                11
            }
            0xF5 => {
                // PUSH AF
                let value = self.get_reg16_af(3);
                self.push_word(bus, value);
                11
            }
            0xF9 => {
                // LD SP,HL
                self.regs.sp = self.regs.hl();
                6
            }

            0xD3 => {
                // OUT (n),A
                let port = self.fetch_byte(bus);
                bus.write_io(port, self.regs.a, self.regs.a);
                11
            }
            0xDB => {
                // IN A,(n)
                let port = self.fetch_byte(bus);
                self.regs.a = bus.read_io(port, self.regs.a);
                11
            }

            0x27 => {
                // DAA
                let result = alu::daa(self.regs.a, self.regs.f);
                self.regs.a = result.value;
                self.regs.f = mask(result.flags);
                4
            }
            0x2F => {
                // CPL
                self.regs.a = !self.regs.a;
                self.regs.f = mask(self.regs.f | crate::flags::HF | crate::flags::NF);
                4
            }
            0x37 => {
                // SCF
                self.regs.f = mask((self.regs.f & (crate::flags::SF | ZF | crate::flags::PF)) | CF);
                4
            }
            0x3F => {
                // CCF
                let old_c = self.regs.f & CF != 0;
                let mut f = self.regs.f & (crate::flags::SF | ZF | crate::flags::PF);
                if !old_c {
                    f |= CF;
                } else {
                    f |= crate::flags::HF;
                }
                self.regs.f = mask(f);
                4
            }

            0xF3 => {
                // DI
                self.regs.iff1 = false;
                self.regs.iff2 = false;
                4
            }
            0xFB => {
                // EI
                self.regs.pending_ei = true;
                4
            }

            0x76 => {
                // HALT
                self.regs.halted = true;
                4
            }

            0x40..=0x7F => {
                // LD r,r'
                let dst = (op >> 3) & 7;
                let src = op & 7;
                let value = self.get_reg8(bus, src, hl, 0);
                self.set_reg8(bus, dst, hl, 0, value);
                if dst == 6 || src == 6 { 7 } else { 4 }
            }

            0x80..=0xBF => {
                // ALU A,r
                let alu_op = (op >> 3) & 7;
                let src = op & 7;
                let value = self.get_reg8(bus, src, hl, 0);
                self.apply_alu(alu_op, value);
                if src == 6 { 7 } else { 4 }
            }
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
                // ALU A,n
                let alu_op = (op >> 3) & 7;
                let value = self.fetch_byte(bus);
                self.apply_alu(alu_op, value);
                7
            }

            _ => return None,
        })
    }

    /// Shared ALU dispatch for the `{ADD,ADC,SUB,SBC,AND,XOR,OR,CP}` group,
    /// keyed the same way in the main page and its `(IX+d)`/`(IY+d)` forms.
    pub(crate) fn apply_alu(&mut self, alu_op: u8, value: u8) {
        let carry = self.regs.f & CF != 0;
        let result = match alu_op {
            0 => alu::add8(self.regs.a, value, false),
            1 => alu::add8(self.regs.a, value, carry),
            2 => alu::sub8(self.regs.a, value, false),
            3 => alu::sub8(self.regs.a, value, carry),
            4 => alu::and8(self.regs.a, value),
            5 => alu::xor8(self.regs.a, value),
            6 => alu::or8(self.regs.a, value),
            7 => alu::cp8(self.regs.a, value),
            _ => unreachable!("3-bit field"),
        };
        if alu_op != 7 {
            self.regs.a = result.value;
        }
        self.regs.f = mask(result.flags);
    }
}
