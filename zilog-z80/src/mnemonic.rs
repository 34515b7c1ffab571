//! Best-effort disassembly of a retired instruction's raw bytes, for trace
//! output only. Coverage mirrors the dispatch tables in `cpu/`; anything not
//! recognised here falls back to a hex dump rather than failing the trace.

const ALU: [&str; 8] = ["ADD A,", "ADC A,", "SUB ", "SBC A,", "AND ", "XOR ", "OR ", "CP "];
const ROT: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SLL", "SRL"];

/// Resolve the mnemonic for one retired instruction from its fetched bytes
/// (including any prefix). Returns a static string; unrecognised sequences
/// render as `"???"` rather than panicking.
#[must_use]
pub fn lookup(bytes: &[u8]) -> &'static str {
    match bytes.first().copied() {
        Some(0xCB) => cb_mnemonic(bytes.get(1).copied().unwrap_or(0)),
        Some(0xED) => ed_mnemonic(bytes.get(1).copied().unwrap_or(0)),
        Some(0xDD) => indexed_mnemonic(bytes, true),
        Some(0xFD) => indexed_mnemonic(bytes, false),
        Some(op) => main_mnemonic(op),
        None => "???",
    }
}

fn main_mnemonic(op: u8) -> &'static str {
    match op {
        0x00 => "NOP",
        0x01 => "LD BC,nn",
        0x02 => "LD (BC),A",
        0x03 => "INC BC",
        0x04 => "INC B",
        0x05 => "DEC B",
        0x06 => "LD B,n",
        0x07 => "RLCA",
        0x08 => "EX AF,AF'",
        0x09 => "ADD HL,BC",
        0x0A => "LD A,(BC)",
        0x0B => "DEC BC",
        0x0C => "INC C",
        0x0D => "DEC C",
        0x0E => "LD C,n",
        0x0F => "RRCA",
        0x10 => "DJNZ d",
        0x11 => "LD DE,nn",
        0x12 => "LD (DE),A",
        0x17 => "RLA",
        0x18 => "JR d",
        0x1A => "LD A,(DE)",
        0x1F => "RRA",
        0x20 => "JR NZ,d",
        0x21 => "LD HL,nn",
        0x22 => "LD (nn),HL",
        0x27 => "DAA",
        0x28 => "JR Z,d",
        0x2A => "LD HL,(nn)",
        0x2F => "CPL",
        0x30 => "JR NC,d",
        0x31 => "LD SP,nn",
        0x32 => "LD (nn),A",
        0x37 => "SCF",
        0x38 => "JR C,d",
        0x3A => "LD A,(nn)",
        0x3F => "CCF",
        0x76 => "HALT",
        0xC3 => "JP nn",
        0xC9 => "RET",
        0xCD => "CALL nn",
        0xD3 => "OUT (n),A",
        0xD9 => "EXX",
        0xDB => "IN A,(n)",
        0xE3 => "EX (SP),HL",
        0xE9 => "JP (HL)",
        0xEB => "EX DE,HL",
        0xF3 => "DI",
        0xF9 => "LD SP,HL",
        0xFB => "EI",
        0x40..=0x7F => "LD r,r'",
        0x80..=0xBF => ALU[usize::from((op >> 3) & 7)],
        0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => "RET cc",
        0xC1 | 0xD1 | 0xE1 | 0xF1 => "POP rp",
        0xC5 | 0xD5 | 0xE5 | 0xF5 => "PUSH rp",
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => ALU[usize::from((op >> 3) & 7)],
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => "RST p",
        _ if op & 0x0F == 0x03 || op & 0x0F == 0x0B => "INC/DEC rp",
        _ if matches!(op, 0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C) => "INC r",
        _ if matches!(op, 0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D) => "DEC r",
        _ if matches!(op, 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E) => "LD r,n",
        _ if op & 0x0F == 0x09 => "ADD HL,rp",
        _ if matches!(op, 0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA) => "JP cc,nn",
        _ if matches!(op, 0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC) => "CALL cc,nn",
        _ => "???",
    }
}

fn cb_mnemonic(op: u8) -> &'static str {
    match (op >> 6) & 3 {
        0 => ROT[usize::from((op >> 3) & 7)],
        1 => "BIT",
        2 => "RES",
        _ => "SET",
    }
}

fn ed_mnemonic(op: u8) -> &'static str {
    match op {
        0x40 | 0x48 | 0x50 | 0x58 | 0x60 | 0x68 | 0x78 => "IN r,(C)",
        0x41 | 0x49 | 0x51 | 0x59 | 0x61 | 0x69 | 0x79 => "OUT (C),r",
        0x42 | 0x52 | 0x62 | 0x72 => "SBC HL,rp",
        0x4A | 0x5A | 0x6A | 0x7A => "ADC HL,rp",
        0x43 | 0x53 | 0x63 | 0x73 => "LD (nn),rp",
        0x4B | 0x5B | 0x6B | 0x7B => "LD rp,(nn)",
        0x44 | 0x4C | 0x54 | 0x5C | 0x64 | 0x6C | 0x74 | 0x7C => "NEG",
        0x45 | 0x4D | 0x55 | 0x5D | 0x65 | 0x6D | 0x75 | 0x7D => "RETN/RETI",
        0x46 | 0x4E | 0x66 | 0x6E => "IM 0",
        0x56 | 0x76 => "IM 1",
        0x5E | 0x7E => "IM 2",
        0x47 => "LD I,A",
        0x4F => "LD R,A",
        0x57 => "LD A,I",
        0x5F => "LD A,R",
        0x67 => "RRD",
        0x6F => "RLD",
        0xA0 => "LDI",
        0xA8 => "LDD",
        0xB0 => "LDIR",
        0xB8 => "LDDR",
        0xA1 => "CPI",
        0xA9 => "CPD",
        0xB1 => "CPIR",
        0xB9 => "CPDR",
        _ => "???",
    }
}

fn indexed_mnemonic(bytes: &[u8], is_ix: bool) -> &'static str {
    let Some(op) = bytes.get(1).copied() else { return "???" };
    if op == 0xCB {
        return if is_ix { "DD CB" } else { "FD CB" };
    }
    if is_ix {
        match op {
            0x21 => "LD IX,nn",
            0x22 => "LD (nn),IX",
            0x2A => "LD IX,(nn)",
            0x23 => "INC IX",
            0x2B => "DEC IX",
            0x09 | 0x19 | 0x29 | 0x39 => "ADD IX,rp",
            0x34 => "INC (IX+d)",
            0x35 => "DEC (IX+d)",
            0x36 => "LD (IX+d),n",
            0x46 | 0x4E | 0x56 | 0x5E | 0x66 | 0x6E | 0x7E => "LD r,(IX+d)",
            0x70..=0x75 | 0x77 => "LD (IX+d),r",
            0x86 | 0x8E | 0x96 | 0x9E | 0xA6 | 0xAE | 0xB6 | 0xBE => "ALU A,(IX+d)",
            0xE1 => "POP IX",
            0xE5 => "PUSH IX",
            0xE3 => "EX (SP),IX",
            0xE9 => "JP (IX)",
            0xF9 => "LD SP,IX",
            _ => "???",
        }
    } else {
        match op {
            0x21 => "LD IY,nn",
            0x22 => "LD (nn),IY",
            0x2A => "LD IY,(nn)",
            0x23 => "INC IY",
            0x2B => "DEC IY",
            0x09 | 0x19 | 0x29 | 0x39 => "ADD IY,rp",
            0x34 => "INC (IY+d)",
            0x35 => "DEC (IY+d)",
            0x36 => "LD (IY+d),n",
            0x46 | 0x4E | 0x56 | 0x5E | 0x66 | 0x6E | 0x7E => "LD r,(IY+d)",
            0x70..=0x75 | 0x77 => "LD (IY+d),r",
            0x86 | 0x8E | 0x96 | 0x9E | 0xA6 | 0xAE | 0xB6 | 0xBE => "ALU A,(IY+d)",
            0xE1 => "POP IY",
            0xE5 => "PUSH IY",
            0xE3 => "EX (SP),IY",
            0xE9 => "JP (IY)",
            0xF9 => "LD SP,IY",
            _ => "???",
        }
    }
}
