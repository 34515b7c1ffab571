//! Error types returned by [`crate::Z80::step`].

use std::fmt;

use crate::decode::Prefix;

/// Failure modes for a single `step`/`run` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Z80Error {
    /// The dispatch key (prefix + opcode) has no handler.
    InvalidInstruction { pc: u16, prefix: Prefix, opcode: u8 },
    /// `IM` held a value outside 0..=2 when an interrupt was accepted.
    /// Unreachable through the public API (`InterruptMode` has exactly
    /// three variants); kept so the error taxonomy matches the bus-facing
    /// contract this crate documents.
    InvalidInterruptMode(u8),
    /// A maskable interrupt was accepted with a data payload of the wrong
    /// length for the current interrupt mode (IM 0 expects 1 or 3 bytes,
    /// IM 2 expects exactly 1).
    InvalidInterruptPayload { expected: usize, got: usize },
}

impl fmt::Display for Z80Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInstruction { pc, prefix, opcode } => {
                write!(f, "invalid instruction at {pc:#06x}: {prefix:?} {opcode:#04x}")
            }
            Self::InvalidInterruptMode(mode) => {
                write!(f, "invalid interrupt mode: {mode}")
            }
            Self::InvalidInterruptPayload { expected, got } => {
                write!(f, "invalid interrupt payload: expected {expected} byte(s), got {got}")
            }
        }
    }
}

impl std::error::Error for Z80Error {}
