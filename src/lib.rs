#![doc = r#"
ricoh2a03 - NES CPU core.

Emulates the Ricoh 2A03 (the NES variant of the MOS 6502, without decimal
mode): instruction fetch/decode/execute against a 16-bit memory bus, exact
per-instruction cycle timing, documented and undocumented opcode semantics,
and NMI/IRQ/reset interrupt behavior.

The crate deliberately stops at the bus boundary. Picture, audio, controller,
and cartridge hardware are collaborators: they attach to the [`bus::Bus`] as
memory-mapped device windows or as the pluggable [`mapper::Mapper`], and they
raise interrupts through [`cpu::Cpu::assert_nmi`] / [`cpu::Cpu::assert_irq`].
The external driver owns the bus and passes it into each `step`/`tick` call,
so it can interleave the CPU with other components at whatever ratio the
target machine requires (3 PPU dots per CPU cycle on the NES).

Modules:
- bus: address decoding, 2 KiB mirrored RAM, device windows, open-bus latch
- cpu: register file, decoder table, addressing resolver, dispatch, interrupts
- mapper: cartridge mapper seam plus the NROM reference implementation
- error: construction-time configuration errors

In tests, shared program-ROM builders are available under `crate::test_utils`.
"#]

// Core emulator modules
pub mod bus;
pub mod cpu;
pub mod error;
pub mod mapper;

// Re-export commonly used types at the crate root for convenience.
pub use bus::{Bus, BusDevice, Window};
pub use cpu::Cpu;
pub use error::ConfigError;
pub use mapper::{Mapper, Nrom};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
