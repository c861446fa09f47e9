/*!
Configuration-error taxonomy.

Every fallible operation in this crate fails at construction/registration
time, before the first instruction executes. Once a bus passes
[`crate::bus::Bus::validate`], stepping the CPU is a total function: illegal
opcodes, the indirect-jump page wrap, and open-bus reads are emulated
hardware behavior, not errors.
*/

use thiserror::Error;

/// Errors raised while wiring up the bus, before emulation begins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A device window collides with one that is already registered.
    #[error("device window `{name}` overlaps previously registered window `{other}`")]
    WindowOverlap {
        name: &'static str,
        other: &'static str,
    },

    /// Device windows must lie inside the memory-mapped I/O segment;
    /// everything below it is internal RAM and everything above it belongs
    /// to the cartridge mapper.
    #[error("device window `{name}` lies outside the I/O segment $2000-$401F")]
    WindowOutsideIoSegment { name: &'static str },

    /// The interrupt vector table lives in cartridge space, so a bus with no
    /// mapper attached cannot fetch the reset vector and must not boot.
    #[error("no cartridge mapper attached; vector table at $FFFA-$FFFF is unmapped")]
    MissingMapper,
}
