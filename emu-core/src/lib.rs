//! Core traits and types shared by the Z80 CPU core and its host.
//!
//! The bus is the only thing the CPU depends on; everything here exists to
//! keep that contract small, generic, and testable in isolation from any
//! particular machine.

mod bus;
mod cpu;
mod observable;
mod tracer;
mod ticks;

pub use bus::Bus;
pub use cpu::Cpu;
pub use observable::{Observable, Value};
pub use tracer::{NullTracer, TraceRecord, Tracer};
pub use ticks::Ticks;
