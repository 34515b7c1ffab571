//! Pending interrupt state, consumed at instruction boundaries.
//!
//! Two independent lines. NMI is ungated and handled directly by the step
//! driver (push PC, jump to 0x0066) with no byte queue involved. The
//! maskable line is gated on IFF1 and goes through a short-lived raw
//! request (the `data` a device handed to `schedule_interrupt`) which, once
//! accepted, is expanded into a byte queue that the fetch unit drains in
//! place of reading at PC.

/// A maskable interrupt request as supplied by the bus, awaiting
/// acceptance (IFF1 check) at the next fetch boundary.
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub data: Vec<u8>,
}

/// Interrupt state owned by the CPU.
#[derive(Debug, Clone, Default)]
pub struct InterruptQueue {
    /// Latched by `schedule_interrupt`, consumed (accepted or dropped) at
    /// the top of the next `step`.
    raw: Option<RawRequest>,
    /// Bytes the fetch unit consumes instead of reading at PC, once a
    /// request has been accepted and expanded for the current IM.
    fetch_queue: std::collections::VecDeque<u8>,
    /// Set by `nmi()`, consumed unconditionally at the top of the next
    /// `step`.
    nmi: bool,
}

impl InterruptQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a maskable interrupt request. A second call before the first
    /// is accepted overwrites it — only the most recent assertion is
    /// observed at the next fetch, matching real hardware.
    pub fn schedule_maskable(&mut self, data: &[u8]) {
        self.raw = Some(RawRequest { data: data.to_vec() });
    }

    pub fn schedule_nmi(&mut self) {
        self.nmi = true;
    }

    #[must_use]
    pub fn take_nmi(&mut self) -> bool {
        core::mem::take(&mut self.nmi)
    }

    /// Take the raw request pending IFF1-gated acceptance, if any.
    pub fn take_raw(&mut self) -> Option<RawRequest> {
        self.raw.take()
    }

    /// Push already-expanded bytes onto the fetch queue (IM 0's literal
    /// data, IM 1's synthesized 0xFF, or IM 2's synthesized CALL).
    pub fn push_fetch_bytes(&mut self, bytes: &[u8]) {
        self.fetch_queue.extend(bytes.iter().copied());
    }

    #[must_use]
    pub fn has_fetch_bytes(&self) -> bool {
        !self.fetch_queue.is_empty()
    }

    pub fn pop_fetch_byte(&mut self) -> Option<u8> {
        self.fetch_queue.pop_front()
    }
}
