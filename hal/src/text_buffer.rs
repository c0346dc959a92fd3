//! # Text Buffer HAL
//!
//! Hardware abstraction for character-cell video memory.
//!
//! ## Philosophy
//!
//! A text buffer is a flat byte region: byte `2k` holds the character code
//! of cell `k`, byte `2k + 1` its attribute. The HAL knows nothing about
//! rows, columns or cursors; that belongs to the console driver.
//!
//! ## Design Principles
//!
//! 1. **Byte-addressed**: Every access names a byte offset into the region
//! 2. **Ordered**: Hardware-backed implementations must not elide or reorder accesses
//! 3. **Testable**: `RamTextBuffer` stands in for video memory in tests

use thiserror::Error;

#[cfg(feature = "alloc")]
extern crate alloc;

/// Errors raised when a memory-mapped region cannot be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HalError {
    /// Region is shorter than the device requires
    #[error("Region too small: need {required} bytes, have {actual}")]
    RegionTooSmall { required: usize, actual: usize },

    /// Base address is null
    #[error("Null base address")]
    NullAddress,

    /// Base address violates the device alignment
    #[error("Misaligned base address: {0:#x}")]
    Misaligned(usize),
}

/// Character-cell video memory
///
/// Offsets are byte indices. Callers keep them below `len()`;
/// implementations may panic on out-of-range offsets.
pub trait TextBuffer {
    /// Returns the region length in bytes
    fn len(&self) -> usize;

    /// Returns true if the region holds no bytes
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads one byte
    fn read(&self, offset: usize) -> u8;

    /// Writes one byte
    fn write(&mut self, offset: usize, value: u8);

    /// Copies `count` bytes from `src` to `dst`
    ///
    /// Regions may overlap. The default copies front to back, which is
    /// correct whenever `dst <= src` (the scroll direction).
    fn copy_within(&mut self, src: usize, dst: usize, count: usize) {
        if dst <= src {
            for i in 0..count {
                let byte = self.read(src + i);
                self.write(dst + i, byte);
            }
        } else {
            for i in (0..count).rev() {
                let byte = self.read(src + i);
                self.write(dst + i, byte);
            }
        }
    }

    /// Fills `count` bytes starting at `offset` with `value`
    fn fill(&mut self, offset: usize, count: usize, value: u8) {
        for i in 0..count {
            self.write(offset + i, value);
        }
    }

    /// Fails unless the region holds at least `required` bytes
    fn ensure_len(&self, required: usize) -> Result<(), HalError> {
        let actual = self.len();
        if actual < required {
            return Err(HalError::RegionTooSmall { required, actual });
        }
        Ok(())
    }
}

/// Heap-backed text buffer
///
/// Simulates video memory for tests and for off-screen rendering.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamTextBuffer {
    bytes: alloc::vec::Vec<u8>,
}

#[cfg(feature = "alloc")]
impl RamTextBuffer {
    /// Creates a zero-filled buffer of `len` bytes
    pub fn new(len: usize) -> Self {
        Self {
            bytes: alloc::vec![0u8; len],
        }
    }

    /// Returns the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(feature = "alloc")]
impl TextBuffer for RamTextBuffer {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    fn write(&mut self, offset: usize, value: u8) {
        self.bytes[offset] = value;
    }

    fn copy_within(&mut self, src: usize, dst: usize, count: usize) {
        self.bytes.copy_within(src..src + count, dst);
    }

    fn fill(&mut self, offset: usize, count: usize, value: u8) {
        self.bytes[offset..offset + count].fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal buffer exercising the trait's default methods
    struct ArrayBuffer {
        bytes: [u8; 8],
    }

    impl TextBuffer for ArrayBuffer {
        fn len(&self) -> usize {
            self.bytes.len()
        }

        fn read(&self, offset: usize) -> u8 {
            self.bytes[offset]
        }

        fn write(&mut self, offset: usize, value: u8) {
            self.bytes[offset] = value;
        }
    }

    #[test]
    fn test_default_copy_within_backward_overlap() {
        let mut buf = ArrayBuffer {
            bytes: [1, 2, 3, 4, 5, 6, 7, 8],
        };
        buf.copy_within(2, 0, 6);
        assert_eq!(buf.bytes, [3, 4, 5, 6, 7, 8, 7, 8]);
    }

    #[test]
    fn test_default_copy_within_forward_overlap() {
        let mut buf = ArrayBuffer {
            bytes: [1, 2, 3, 4, 5, 6, 7, 8],
        };
        buf.copy_within(0, 2, 6);
        assert_eq!(buf.bytes, [1, 2, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_default_fill() {
        let mut buf = ArrayBuffer { bytes: [9; 8] };
        buf.fill(4, 4, 0);
        assert_eq!(buf.bytes, [9, 9, 9, 9, 0, 0, 0, 0]);
    }

    #[test]
    fn test_ensure_len() {
        let buf = ArrayBuffer { bytes: [0; 8] };
        assert!(buf.ensure_len(8).is_ok());
        assert_eq!(
            buf.ensure_len(16),
            Err(HalError::RegionTooSmall {
                required: 16,
                actual: 8
            })
        );
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_hal_error_display() {
        let err = HalError::Misaligned(0xB8001);
        assert_eq!(err.to_string(), "Misaligned base address: 0xb8001");
        assert_eq!(HalError::NullAddress.to_string(), "Null base address");
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_ram_text_buffer() {
        let mut buf = RamTextBuffer::new(4000);
        assert_eq!(buf.len(), 4000);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));

        buf.write(160, b'A');
        buf.write(161, 0x0F);
        buf.copy_within(160, 0, 160);
        assert_eq!(buf.read(0), b'A');
        assert_eq!(buf.read(1), 0x0F);

        buf.fill(0, 2, 0);
        assert_eq!(buf.read(0), 0);
    }
}
