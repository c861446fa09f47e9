/*!
Interrupt controller: pending-state tracking for the three hardware lines.

The three lines behave differently and the distinction matters to games:

- NMI is edge-triggered. The PPU asserts it once per vblank; the controller
  latches the edge and the CPU consumes it at the next instruction boundary
  regardless of the I flag.
- IRQ is level-triggered. A source (APU frame counter, mapper scanline
  counter) holds the line until its own condition clears, so the controller
  keeps one bit per source and the line reads asserted while any bit is set.
  The CPU only takes it while the I flag is clear; a source that releases the
  line before that never gets serviced.
- Reset is a pseudo-interrupt applied by the engine's `reset` path directly;
  it bypasses the pending machinery entirely.

External collaborators mutate this state through `assert_*`/`clear_irq` only;
the dispatch loop polls it once per instruction boundary.
*/

/// Two-byte little-endian vector locations at the top of cartridge space.
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Cycle cost of the hardware interrupt entry sequence.
pub(crate) const INTERRUPT_ENTRY_CYCLES: u32 = 7;

/// Number of distinct IRQ source ids tracked (one bit each).
pub const IRQ_SOURCES: u8 = 8;

/// Pending interrupt state, polled at instruction boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterruptController {
    nmi_edge: bool,
    irq_lines: u8,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch an NMI edge. Multiple assertions before service collapse into
    /// one, matching the edge detector on the real part.
    #[inline]
    pub fn assert_nmi(&mut self) {
        self.nmi_edge = true;
    }

    /// Hold the IRQ line for one source. `source_id` is a bit index; ids
    /// above [`IRQ_SOURCES`] fold onto the low three bits.
    #[inline]
    pub fn assert_irq(&mut self, source_id: u8) {
        self.irq_lines |= 1 << (source_id % IRQ_SOURCES);
    }

    /// Release the IRQ line for one source. The line stays asserted while
    /// any other source still holds it.
    #[inline]
    pub fn clear_irq(&mut self, source_id: u8) {
        self.irq_lines &= !(1 << (source_id % IRQ_SOURCES));
    }

    /// True while any source holds the IRQ line.
    #[inline]
    pub fn irq_asserted(&self) -> bool {
        self.irq_lines != 0
    }

    /// Consume a latched NMI edge, if any.
    #[inline]
    pub(crate) fn take_nmi(&mut self) -> bool {
        let pending = self.nmi_edge;
        self.nmi_edge = false;
        pending
    }

    /// Drop all pending state (reset line).
    #[inline]
    pub(crate) fn clear_all(&mut self) {
        self.nmi_edge = false;
        self.irq_lines = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nmi_edge_is_consumed_once() {
        let mut ic = InterruptController::new();
        ic.assert_nmi();
        ic.assert_nmi();
        assert!(ic.take_nmi());
        assert!(!ic.take_nmi());
    }

    #[test]
    fn irq_is_level_held_per_source() {
        let mut ic = InterruptController::new();
        ic.assert_irq(0);
        ic.assert_irq(3);
        assert!(ic.irq_asserted());

        // One source releasing does not drop the line while another holds it.
        ic.clear_irq(0);
        assert!(ic.irq_asserted());
        ic.clear_irq(3);
        assert!(!ic.irq_asserted());
    }

    #[test]
    fn source_ids_fold_onto_available_bits() {
        let mut ic = InterruptController::new();
        ic.assert_irq(9); // same bit as source 1
        ic.clear_irq(1);
        assert!(!ic.irq_asserted());
    }

    #[test]
    fn reset_drops_everything() {
        let mut ic = InterruptController::new();
        ic.assert_nmi();
        ic.assert_irq(2);
        ic.clear_all();
        assert!(!ic.take_nmi());
        assert!(!ic.irq_asserted());
    }
}
