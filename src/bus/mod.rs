/*!
Memory bus: routes every CPU address to exactly one owning region.

Address map:
- $0000-$1FFF: 2 KiB internal RAM, mirrored four times
- $2000-$401F: memory-mapped I/O segment, carved into registered device
  windows (picture, audio, controller hardware)
- $4020-$FFFF: cartridge space, delegated to the attached mapper

Reads may have side effects inside device windows, so the bus issues exactly
one handler call per CPU access and never caches results. Writes are likewise
delivered synchronously; a write that triggers device activity (a DMA
register, a bank latch) completes that activity before `write` returns.

Reads with no owner return the open-bus latch: the last byte driven on the
bus, which is what the undriven data lines float to on the real machine.
There is no error path once the bus is configured; misconfiguration
(overlapping windows, missing mapper) is rejected at registration time or by
[`Bus::validate`] before emulation starts.
*/

pub mod device;
pub mod ram;

pub use device::{BusDevice, Window};
pub use ram::{RAM_SIZE, Ram};

use crate::bus::device::Registered;
use crate::error::ConfigError;
use crate::mapper::Mapper;

/// First address mirroring the internal RAM stops at.
pub const RAM_MIRROR_END: u16 = 0x1FFF;
/// Bounds of the memory-mapped I/O segment.
pub const IO_START: u16 = 0x2000;
pub const IO_END: u16 = 0x401F;
/// First address owned by the cartridge mapper.
pub const CARTRIDGE_START: u16 = 0x4020;

/// The CPU-visible memory bus.
pub struct Bus {
    ram: Ram,
    devices: Vec<Registered>,
    mapper: Option<Box<dyn Mapper>>,
    open_bus: u8,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    /// Create a bus with zeroed RAM, no devices, and no mapper.
    pub fn new() -> Self {
        Self {
            ram: Ram::new(),
            devices: Vec::new(),
            mapper: None,
            open_bus: 0,
        }
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    /// Register a device handler for a named window in the I/O segment.
    ///
    /// Rejected registrations leave the bus unchanged: a window outside
    /// $2000-$401F or one overlapping an already claimed window is a
    /// configuration error surfaced to the driver before emulation begins.
    pub fn register_device(
        &mut self,
        name: &'static str,
        window: Window,
        handler: Box<dyn BusDevice>,
    ) -> Result<(), ConfigError> {
        Registered::check(name, &window, &self.devices)?;
        self.devices.push(Registered {
            name,
            window,
            handler,
        });
        Ok(())
    }

    /// Attach the cartridge mapper owning $4020-$FFFF. Replaces any mapper
    /// attached earlier (cartridge swap).
    pub fn attach_mapper(&mut self, mapper: Box<dyn Mapper>) {
        self.mapper = Some(mapper);
    }

    /// Verify the bus can boot. The driver calls this once after wiring up
    /// devices and before the first `reset`; it is the only fatal check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mapper.is_none() {
            return Err(ConfigError::MissingMapper);
        }
        Ok(())
    }

    /// Forward the reset line to the mapper (bank registers and latches).
    pub fn reset_mapper(&mut self) {
        if let Some(mapper) = &mut self.mapper {
            mapper.reset();
        }
    }

    // ---------------------------------------------------------------------
    // CPU-visible accesses
    // ---------------------------------------------------------------------

    /// Read one byte, applying region rules. Updates the open-bus latch.
    pub fn read(&mut self, addr: u16) -> u8 {
        let value = match addr {
            0x0000..=RAM_MIRROR_END => self.ram.read(addr),
            IO_START..=IO_END => match self.device_index(addr) {
                Some(i) => self.devices[i].handler.read(addr),
                None => self.open_bus,
            },
            CARTRIDGE_START..=0xFFFF => match &mut self.mapper {
                Some(mapper) => mapper.read(addr),
                None => self.open_bus,
            },
        };
        self.open_bus = value;
        value
    }

    /// Write one byte, applying region rules. Device side effects triggered
    /// by the write complete before this returns.
    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=RAM_MIRROR_END => self.ram.write(addr, value),
            IO_START..=IO_END => {
                if let Some(i) = self.device_index(addr) {
                    self.devices[i].handler.write(addr, value);
                }
            }
            CARTRIDGE_START..=0xFFFF => {
                if let Some(mapper) = &mut self.mapper {
                    mapper.write(addr, value);
                }
            }
        }
        self.open_bus = value;
    }

    /// Little-endian 16-bit read (vectors, absolute operands).
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Last byte driven on the bus (diagnostics and tests).
    #[inline]
    pub fn open_bus(&self) -> u8 {
        self.open_bus
    }

    fn device_index(&self, addr: u16) -> Option<usize> {
        self.devices.iter().position(|d| d.window.contains(addr))
    }
}
