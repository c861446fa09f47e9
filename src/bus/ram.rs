/*!
RAM module: the 2 KiB internal work RAM with mirrored access.

CPU address map for internal RAM:
- $0000-$07FF: 2 KiB internal RAM
- $0800-$1FFF: mirrors of $0000-$07FF (address bits above the RAM size are
  ignored, so all four aliases write the same physical byte)

This type is owned by the Bus and addressed with full CPU addresses; it masks
them down to the physical range itself.
*/

/// Size of the internal work RAM (in bytes).
pub const RAM_SIZE: usize = 0x0800;

/// Internal work RAM with mirrored access helpers.
pub struct Ram {
    data: [u8; RAM_SIZE],
}

impl Default for Ram {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Ram {
    /// Create a new RAM instance initialized to 0.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [0; RAM_SIZE],
        }
    }

    /// Read a byte from CPU-visible RAM space ($0000-$1FFF).
    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.data[Self::mirror_index(addr)]
    }

    /// Write a byte to CPU-visible RAM space ($0000-$1FFF).
    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.data[Self::mirror_index(addr)] = value;
    }

    /// Compute the physical index for a CPU address using 2 KiB mirroring.
    #[inline]
    pub fn mirror_index(addr: u16) -> usize {
        (addr as usize) & (RAM_SIZE - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{RAM_SIZE, Ram};

    #[test]
    fn starts_zeroed() {
        let r = Ram::new();
        assert!((0..RAM_SIZE as u16).all(|a| r.read(a) == 0));
    }

    #[test]
    fn mirrored_reads_and_writes() {
        let mut r = Ram::new();

        r.write(0x0001, 0xAA);
        assert_eq!(r.read(0x0001), 0xAA);
        assert_eq!(r.read(0x0801), 0xAA);
        assert_eq!(r.read(0x1001), 0xAA);
        assert_eq!(r.read(0x1801), 0xAA);

        // Overwrite through a mirror and observe it at the base address.
        r.write(0x1801, 0x55);
        assert_eq!(r.read(0x0001), 0x55);
    }
}
