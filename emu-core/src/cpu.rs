//! CPU core trait.

use crate::{Bus, Ticks};

/// A CPU core that executes whole instructions per call, accounting cycles
/// in aggregate rather than T-state by T-state.
///
/// This is deliberately coarser than a cycle-by-cycle `tick()` model: the
/// contract this crate targets explicitly excludes sub-instruction bus
/// timing, so a handler runs an instruction to completion and reports the
/// total T-states it cost.
pub trait Cpu {
    /// The error type returned when the dispatched opcode (or the current
    /// interrupt configuration) is invalid.
    type Error;

    /// The type used for register inspection.
    type Registers;

    /// Execute exactly one instruction (fetch, decode, execute, account).
    ///
    /// Returns the number of T-states the instruction consumed. A
    /// self-repeating instruction (e.g. `LDIR` mid-block) still counts as
    /// one `step` per iteration, each reporting that iteration's own cost.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if the dispatch key has no handler, or if the
    /// CPU's interrupt configuration is invalid at an interrupt-acceptance
    /// boundary. State is left exactly where it was at the point of
    /// failure.
    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Self::Error>;

    /// Run `step` repeatedly until the cycle counter has advanced by at
    /// least `budget` T-states since this call began, or an error occurs.
    ///
    /// Returns the actual number of T-states consumed (which may overshoot
    /// `budget`, since the loop only checks at instruction boundaries).
    ///
    /// # Errors
    ///
    /// Propagates the first error `step` returns, stopping immediately.
    fn run<B: Bus>(&mut self, bus: &mut B, budget: u32) -> Result<u32, Self::Error> {
        let mut consumed = 0;
        while consumed < budget {
            consumed += self.step(bus)?;
        }
        Ok(consumed)
    }

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU is halted (executed `HALT` and has not yet
    /// been woken by an interrupt).
    fn is_halted(&self) -> bool;

    /// Total T-states elapsed since the cycle counter was last reset.
    fn cycles(&self) -> Ticks;

    /// Reset the CPU to its initial state. Leaves the cycle counter
    /// untouched; callers that want it zeroed do so explicitly.
    fn reset(&mut self);
}
