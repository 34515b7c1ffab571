//! Pluggable per-instruction tracing.
//!
//! Mirrors the pull-style `Observable` query surface with a push-style
//! counterpart: a `Tracer` is told about each retired instruction instead
//! of being polled for state. Off by default — installing a non-null
//! tracer costs one call per retired instruction, nothing more.

/// One retired instruction, handed to a [`Tracer`].
#[derive(Debug, Clone)]
pub struct TraceRecord<R> {
    /// PC at the start of the instruction (before any prefix/opcode bytes
    /// were consumed).
    pub pc: u16,
    /// The raw bytes fetched for this instruction, in fetch order.
    pub bytes: Vec<u8>,
    /// Static mnemonic, e.g. `"LD A,n"` or `"LDIR"`.
    pub mnemonic: &'static str,
    /// Register snapshot taken after the instruction retired.
    pub registers: R,
}

/// A sink for per-instruction trace records.
pub trait Tracer<R> {
    /// Called once per retired instruction.
    fn on_retire(&mut self, record: TraceRecord<R>);
}

/// The default, zero-cost tracer: discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTracer;

impl<R> Tracer<R> for NullTracer {
    fn on_retire(&mut self, _record: TraceRecord<R>) {}
}
