//! Memory-mapped VGA text buffer
//!
//! Implements [`TextBuffer`] over a raw video memory region using volatile
//! accesses, so the compiler never merges, reorders or drops a store that
//! the display hardware is watching.

use core::ptr;

use hal::{HalError, TextBuffer};

/// VGA text buffer physical address
pub const VGA_TEXT_BUFFER_PHYS: usize = 0xB8000;

/// MMIO-backed text buffer
pub struct MmioTextBuffer {
    base: *mut u8,
    len: usize,
}

impl MmioTextBuffer {
    /// Wraps the video memory region at `virt_addr`
    ///
    /// Rejects a null base and a base that is not cell (2-byte) aligned.
    ///
    /// # Safety
    ///
    /// The caller must ensure that:
    /// - `virt_addr..virt_addr + len` is mapped, writable video memory
    /// - No other live reference aliases the region
    pub unsafe fn new(virt_addr: usize, len: usize) -> Result<Self, HalError> {
        if virt_addr == 0 {
            return Err(HalError::NullAddress);
        }
        if virt_addr % 2 != 0 {
            return Err(HalError::Misaligned(virt_addr));
        }

        Ok(Self {
            base: virt_addr as *mut u8,
            len,
        })
    }

    /// Returns the base virtual address
    pub fn base_addr(&self) -> usize {
        self.base as usize
    }
}

impl TextBuffer for MmioTextBuffer {
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn read(&self, offset: usize) -> u8 {
        assert!(offset < self.len, "MMIO read past end of text buffer");
        // SAFETY: offset checked against the region length the caller vouched for in `new`.
        unsafe { ptr::read_volatile(self.base.add(offset)) }
    }

    #[inline]
    fn write(&mut self, offset: usize, value: u8) {
        assert!(offset < self.len, "MMIO write past end of text buffer");
        // SAFETY: as `read`.
        unsafe { ptr::write_volatile(self.base.add(offset), value) }
    }
}

// The region is owned exclusively by this handle; moving it to another
// core is fine, sharing it is not.
unsafe impl Send for MmioTextBuffer {}
