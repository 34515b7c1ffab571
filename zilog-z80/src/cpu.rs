//! The `Z80` CPU core: register file, interrupt state, and the step driver.

mod execute_cb;
mod execute_dd_fd;
mod execute_ed;
mod execute_main;

use emu_core::{Bus, Ticks, Tracer};

use crate::decode::Prefix;
use crate::error::Z80Error;
use crate::interrupt::InterruptQueue;
use crate::registers::{InterruptMode, Registers};

/// A Zilog Z80 CPU core. Holds no reference to a bus; one is passed to
/// every `step`/`run` call, matching the shared-bus split documented on
/// `emu_core::Cpu`.
pub struct Z80 {
    pub(crate) regs: Registers,
    pub(crate) interrupts: InterruptQueue,
    pub(crate) fetched: Vec<u8>,
    cycles: Ticks,
    tracer: Box<dyn Tracer<Registers>>,
}

impl Default for Z80 {
    fn default() -> Self {
        Self::new()
    }
}

impl Z80 {
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::default(),
            interrupts: InterruptQueue::new(),
            fetched: Vec::with_capacity(4),
            cycles: Ticks::ZERO,
            tracer: Box::new(emu_core::NullTracer),
        }
    }

    /// Install a tracer invoked once per retired instruction. Replaces any
    /// previously installed tracer.
    pub fn set_tracer(&mut self, tracer: Box<dyn Tracer<Registers>>) {
        self.tracer = tracer;
    }

    /// Remove any installed tracer, reverting to the zero-cost default.
    pub fn clear_tracer(&mut self) {
        self.tracer = Box::new(emu_core::NullTracer);
    }

    /// Queue a maskable interrupt request. `data` is 1-3 bytes; its
    /// interpretation depends on the interrupt mode in effect when the
    /// request is accepted (see §4.9 of the design notes): IM 0 expects the
    /// literal bytes of an instruction (1 or 3 of them), IM 1 ignores
    /// `data` entirely, IM 2 expects exactly one vector-selector byte.
    /// Dropped silently if IFF1 is false when the next `step` begins.
    pub fn schedule_interrupt(&mut self, data: &[u8]) {
        self.interrupts.schedule_maskable(data);
    }

    /// Request a non-maskable interrupt. Always honoured, regardless of
    /// IFF1, at the top of the next `step`.
    pub fn nmi(&mut self) {
        self.interrupts.schedule_nmi();
    }

    /// Execute exactly one instruction.
    ///
    /// # Errors
    ///
    /// See [`emu_core::Cpu::step`].
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Z80Error> {
        let apply_ei_after = self.regs.pending_ei;
        self.regs.pending_ei = false;

        if self.interrupts.take_nmi() {
            let cost = self.accept_nmi(bus);
            if apply_ei_after {
                self.regs.iff1 = true;
                self.regs.iff2 = true;
            }
            self.cycles += Ticks::new(u64::from(cost));
            return Ok(cost);
        }

        if self.regs.iff1 {
            if let Some(raw) = self.interrupts.take_raw() {
                self.accept_maskable(bus, &raw.data)?;
                self.regs.iff1 = false;
                self.regs.iff2 = false;
            }
        }

        let cost = if self.regs.halted && !self.interrupts.has_fetch_bytes() {
            self.regs.bump_r();
            4
        } else {
            self.regs.halted = false;
            self.dispatch(bus)?
        };

        if apply_ei_after {
            self.regs.iff1 = true;
            self.regs.iff2 = true;
        }

        self.cycles += Ticks::new(u64::from(cost));
        Ok(cost)
    }

    /// Run `step` until the cycle counter has advanced by at least `budget`
    /// T-states, or an error occurs.
    ///
    /// # Errors
    ///
    /// Propagates the first error `step` returns.
    pub fn run<B: Bus>(&mut self, bus: &mut B, budget: u32) -> Result<u32, Z80Error> {
        let mut consumed = 0u32;
        while consumed < budget {
            consumed += self.step(bus)?;
        }
        Ok(consumed)
    }

    /// Push PC, latch IFF2 ← IFF1, clear IFF1, jump to 0x0066.
    fn accept_nmi<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.halted = false;
        self.push_word(bus, self.regs.pc);
        self.regs.iff2 = self.regs.iff1;
        self.regs.iff1 = false;
        self.regs.pc = 0x0066;
        11
    }

    /// Expand an accepted maskable-interrupt request into fetch-queue bytes
    /// per the current interrupt mode (§4.9).
    fn accept_maskable<B: Bus>(&mut self, bus: &mut B, data: &[u8]) -> Result<(), Z80Error> {
        self.regs.halted = false;
        match self.regs.im {
            InterruptMode::Im0 => {
                if data.len() != 1 && data.len() != 3 {
                    return Err(Z80Error::InvalidInterruptPayload { expected: 1, got: data.len() });
                }
                self.interrupts.push_fetch_bytes(data);
            }
            InterruptMode::Im1 => {
                self.interrupts.push_fetch_bytes(&[0xFF]);
            }
            InterruptMode::Im2 => {
                if data.len() != 1 {
                    return Err(Z80Error::InvalidInterruptPayload { expected: 1, got: data.len() });
                }
                let low = data[0] & 0xFE;
                let vector_addr = (u16::from(self.regs.i) << 8) | u16::from(low);
                let handler = bus.read_memory_word(vector_addr);
                self.interrupts
                    .push_fetch_bytes(&[0xCD, handler as u8, (handler >> 8) as u8]);
            }
        }
        Ok(())
    }

    pub(crate) fn push_word<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write_memory_word(self.regs.sp, value);
    }

    pub(crate) fn pop_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read_memory_word(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    fn dispatch<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Z80Error> {
        let pc_at_fetch = self.regs.pc;
        self.fetched.clear();
        self.regs.bump_r();
        let b0 = self.fetch_byte(bus);
        let mut failing_opcode = b0;

        let result = match b0 {
            0xCB => {
                let op = self.fetch_byte(bus);
                self.regs.bump_r();
                failing_opcode = op;
                Some(self.execute_cb(bus, op, crate::decode::IndexMode::Hl, 0))
            }
            0xED => {
                let op = self.fetch_byte(bus);
                self.regs.bump_r();
                failing_opcode = op;
                self.execute_ed(bus, op)
            }
            0xDD | 0xFD => {
                let mode = if b0 == 0xDD { crate::decode::IndexMode::Ix } else { crate::decode::IndexMode::Iy };
                let b1 = self.fetch_byte(bus);
                self.regs.bump_r();
                failing_opcode = b1;
                if b1 == 0xCB {
                    let d = self.fetch_displacement(bus);
                    let op = self.fetch_byte(bus);
                    failing_opcode = op;
                    Some(self.execute_cb(bus, op, mode, d))
                } else {
                    self.execute_dd_fd(bus, mode, b1)
                }
            }
            _ => self.execute_main(bus, b0),
        };

        match result {
            Some(cost) => {
                let mnemonic = crate::mnemonic::lookup(&self.fetched);
                let bytes = self.fetched.clone();
                self.trace(pc_at_fetch, bytes, mnemonic);
                Ok(cost)
            }
            None => Err(Z80Error::InvalidInstruction {
                pc: pc_at_fetch,
                prefix: self.last_prefix(b0),
                opcode: failing_opcode,
            }),
        }
    }

    fn last_prefix(&self, b0: u8) -> Prefix {
        match b0 {
            0xCB => Prefix::Cb,
            0xED => Prefix::Ed,
            0xDD => Prefix::Dd,
            0xFD => Prefix::Fd,
            _ => Prefix::None,
        }
    }

    fn trace(&mut self, pc: u16, bytes: Vec<u8>, mnemonic: &'static str) {
        let registers = self.regs;
        self.tracer.on_retire(emu_core::TraceRecord { pc, bytes, mnemonic, registers });
    }

    #[must_use]
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    #[must_use]
    pub fn registers(&self) -> Registers {
        self.regs
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.regs.halted
    }

    #[must_use]
    pub fn cycles(&self) -> Ticks {
        self.cycles
    }

    /// Reset all registers, flags, interrupt state and the pending-EI
    /// latch. The cycle counter is left untouched.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.interrupts = InterruptQueue::new();
    }

    #[cfg(feature = "test-utils")]
    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    #[cfg(feature = "test-utils")]
    pub fn set_sp(&mut self, value: u16) {
        self.regs.sp = value;
    }

    #[cfg(feature = "test-utils")]
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.regs
    }
}

impl emu_core::Cpu for Z80 {
    type Error = Z80Error;
    type Registers = Registers;

    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Self::Error> {
        Self::step(self, bus)
    }

    fn pc(&self) -> u16 {
        Self::pc(self)
    }

    fn registers(&self) -> Self::Registers {
        Self::registers(self)
    }

    fn is_halted(&self) -> bool {
        Self::is_halted(self)
    }

    fn cycles(&self) -> Ticks {
        Self::cycles(self)
    }

    fn reset(&mut self) {
        Self::reset(self);
    }
}
