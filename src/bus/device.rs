/*!
Device windows: the registration seam for memory-mapped peripherals.

Picture, audio, and controller hardware each own a sub-range of the I/O
segment ($2000-$401F). They register a read/write handler pair for a named
address window; the Bus routes matching accesses to the handler and never
inspects what the handler does with them.

Handlers receive the full, unmasked CPU address. Register mirroring inside a
window (the PPU's eight registers repeat every 8 bytes across $2000-$3FFF) is
the handler's business, exactly like bank mapping is the mapper's.
*/

use crate::bus::{IO_END, IO_START};
use crate::error::ConfigError;

/// Read/write handler pair for one memory-mapped device.
///
/// Reads may have side effects (reading the PPU status register clears the
/// vblank latch), so the Bus calls `read` exactly once per CPU read and never
/// caches the result.
pub trait BusDevice {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);
}

/// Inclusive address range claimed by one device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    start: u16,
    end: u16,
}

impl Window {
    /// Build a window spanning `start..=end`. Panics if `start > end`
    /// (a reversed range is a programming error, not a runtime condition).
    pub const fn new(start: u16, end: u16) -> Self {
        assert!(start <= end, "window start must not exceed its end");
        Self { start, end }
    }

    #[inline]
    pub const fn start(&self) -> u16 {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> u16 {
        self.end
    }

    #[inline]
    pub const fn contains(&self, addr: u16) -> bool {
        self.start <= addr && addr <= self.end
    }

    #[inline]
    pub const fn overlaps(&self, other: &Window) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True when the whole window sits inside the I/O segment.
    #[inline]
    pub const fn in_io_segment(&self) -> bool {
        IO_START <= self.start && self.end <= IO_END
    }
}

/// A device handler bound to its claimed window.
pub(crate) struct Registered {
    pub(crate) name: &'static str,
    pub(crate) window: Window,
    pub(crate) handler: Box<dyn BusDevice>,
}

impl Registered {
    /// Validate a prospective registration against the fixed regions and the
    /// windows claimed so far. Called before the handler is installed so a
    /// rejected device leaves the bus untouched.
    pub(crate) fn check(
        name: &'static str,
        window: &Window,
        existing: &[Registered],
    ) -> Result<(), ConfigError> {
        if !window.in_io_segment() {
            return Err(ConfigError::WindowOutsideIoSegment { name });
        }
        for dev in existing {
            if dev.window.overlaps(window) {
                return Err(ConfigError::WindowOverlap {
                    name,
                    other: dev.name,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_contains_and_overlaps() {
        let w = Window::new(0x2000, 0x3FFF);
        assert!(w.contains(0x2000));
        assert!(w.contains(0x3FFF));
        assert!(!w.contains(0x4000));

        assert!(w.overlaps(&Window::new(0x3FFF, 0x4000)));
        assert!(w.overlaps(&Window::new(0x2100, 0x2100)));
        assert!(!w.overlaps(&Window::new(0x4000, 0x4017)));
    }

    #[test]
    fn io_segment_bounds() {
        assert!(Window::new(0x2000, 0x401F).in_io_segment());
        assert!(!Window::new(0x1FFF, 0x2000).in_io_segment());
        assert!(!Window::new(0x4000, 0x4020).in_io_segment());
    }
}
