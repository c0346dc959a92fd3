//! Port I/O abstraction for x86_64
//!
//! This module provides a trait-based abstraction for x86 port I/O operations,
//! allowing for both real hardware access and fake implementations for testing.
//!
//! ## Safety
//!
//! Port I/O operations are inherently unsafe as they directly interact with hardware.
//! Care must be taken to:
//! - Only access valid hardware ports
//! - Not interfere with other system components
//! - Follow proper timing constraints
//!
//! The `RealPortIo` implementation isolates all unsafe code to small, auditable functions.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Port I/O trait
///
/// Abstracts x86 I/O port operations to allow test doubles.
///
/// ## Implementation Notes
///
/// Implementations must guarantee:
/// - Each call performs exactly one bus transaction of the stated width
/// - Operations complete synchronously before returning
/// - Calls are never merged, reordered or elided
pub trait PortIo {
    /// Reads a byte from an I/O port
    fn inb(&mut self, port: u16) -> u8;

    /// Writes a byte to an I/O port
    fn outb(&mut self, port: u16, value: u8);

    /// Reads a 16-bit word from an I/O port
    fn inw(&mut self, port: u16) -> u16;

    /// Writes a 16-bit word to an I/O port
    fn outw(&mut self, port: u16, value: u16);
}

impl<T: PortIo + ?Sized> PortIo for &mut T {
    fn inb(&mut self, port: u16) -> u8 {
        (**self).inb(port)
    }

    fn outb(&mut self, port: u16, value: u8) {
        (**self).outb(port, value)
    }

    fn inw(&mut self, port: u16) -> u16 {
        (**self).inw(port)
    }

    fn outw(&mut self, port: u16, value: u16) {
        (**self).outw(port, value)
    }
}

/// Real hardware port I/O implementation
///
/// Uses x86 `in` and `out` instructions to access hardware ports.
///
/// ## Safety
///
/// This implementation is only safe when:
/// - Running on x86/x86_64 architecture with proper privilege level
/// - Accessing ports that exist and are safe to access
/// - Not interfering with other drivers or system components
///
/// ## Example
///
/// ```rust,ignore
/// let mut io = RealPortIo::new();
/// io.outb(0x3D4, 14); // Select cursor high register
/// let high = io.inb(0x3D5);
/// ```
#[derive(Debug, Default)]
pub struct RealPortIo;

impl RealPortIo {
    /// Creates a new real port I/O implementation
    pub fn new() -> Self {
        Self
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl PortIo for RealPortIo {
    #[inline]
    fn inb(&mut self, port: u16) -> u8 {
        // SAFETY: Raw port read. The caller guarantees ring 0 and a valid port.
        // `asm!` without `pure` is never elided or reordered across other
        // side effects; nomem/nostack only describe what the instruction touches.
        unsafe {
            let value: u8;
            core::arch::asm!(
                "in al, dx",
                in("dx") port,
                out("al") value,
                options(nomem, nostack, preserves_flags)
            );
            value
        }
    }

    #[inline]
    fn outb(&mut self, port: u16, value: u8) {
        // SAFETY: Raw port write. The caller guarantees ring 0 and a valid port.
        unsafe {
            core::arch::asm!(
                "out dx, al",
                in("dx") port,
                in("al") value,
                options(nomem, nostack, preserves_flags)
            );
        }
    }

    #[inline]
    fn inw(&mut self, port: u16) -> u16 {
        // SAFETY: As `inb`, 16-bit transfer through AX.
        unsafe {
            let value: u16;
            core::arch::asm!(
                "in ax, dx",
                in("dx") port,
                out("ax") value,
                options(nomem, nostack, preserves_flags)
            );
            value
        }
    }

    #[inline]
    fn outw(&mut self, port: u16, value: u16) {
        // SAFETY: As `outb`, 16-bit transfer through AX.
        unsafe {
            core::arch::asm!(
                "out dx, ax",
                in("dx") port,
                in("ax") value,
                options(nomem, nostack, preserves_flags)
            );
        }
    }
}

/// Value carried by a single port transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortValue {
    Byte(u8),
    Word(u16),
}

/// Fake port I/O implementation for testing
///
/// Allows scripted reads and captures writes for test verification.
///
/// ## Example
///
/// ```rust
/// use hal_x86_64::port_io::{FakePortIo, PortIo};
///
/// let mut io = FakePortIo::new();
/// io.script_read(0x3D5, 0x01); // Cursor high byte
/// io.script_read(0x3D5, 0x40); // Cursor low byte
///
/// io.outb(0x3D4, 14);
/// assert_eq!(io.inb(0x3D5), 0x01);
/// io.outb(0x3D4, 15);
/// assert_eq!(io.inb(0x3D5), 0x40);
///
/// // Verify that reads were consumed
/// assert_eq!(io.remaining_reads(), 0);
/// assert_eq!(io.byte_writes(), vec![(0x3D4, 14), (0x3D4, 15)]);
/// ```
#[cfg(feature = "alloc")]
#[derive(Debug, Default)]
pub struct FakePortIo {
    /// Scripted read values: (port, value)
    read_script: Vec<(u16, PortValue)>,
    /// Current read index
    read_index: usize,
    /// Captured write operations, in issue order
    writes: Vec<(u16, PortValue)>,
}

#[cfg(feature = "alloc")]
impl FakePortIo {
    /// Creates a new fake port I/O implementation
    pub fn new() -> Self {
        Self {
            read_script: Vec::new(),
            read_index: 0,
            writes: Vec::new(),
        }
    }

    /// Scripts a byte read
    ///
    /// The next call to `inb(port)` with the specified port will return `value`.
    pub fn script_read(&mut self, port: u16, value: u8) {
        self.read_script.push((port, PortValue::Byte(value)));
    }

    /// Scripts multiple byte reads
    pub fn script_reads(&mut self, reads: &[(u16, u8)]) {
        self.read_script
            .extend(reads.iter().map(|&(port, value)| (port, PortValue::Byte(value))));
    }

    /// Scripts a word read
    pub fn script_read_word(&mut self, port: u16, value: u16) {
        self.read_script.push((port, PortValue::Word(value)));
    }

    /// Returns the number of scripted reads remaining
    pub fn remaining_reads(&self) -> usize {
        self.read_script.len() - self.read_index
    }

    /// Returns all captured write operations
    pub fn writes(&self) -> &[(u16, PortValue)] {
        &self.writes
    }

    /// Returns the captured byte writes, skipping word writes
    pub fn byte_writes(&self) -> Vec<(u16, u8)> {
        self.writes
            .iter()
            .filter_map(|&(port, value)| match value {
                PortValue::Byte(byte) => Some((port, byte)),
                PortValue::Word(_) => None,
            })
            .collect()
    }

    /// Clears all captured writes
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// Resets the read script (clears all reads and resets index)
    pub fn reset_reads(&mut self) {
        self.read_script.clear();
        self.read_index = 0;
    }

    fn next_read(&mut self, port: u16) -> PortValue {
        if self.read_index >= self.read_script.len() {
            panic!(
                "FakePortIo: No scripted read for port 0x{:04X} (read_index={}, script_len={})",
                port,
                self.read_index,
                self.read_script.len()
            );
        }

        let (expected_port, value) = self.read_script[self.read_index];
        if port != expected_port {
            panic!(
                "FakePortIo: Port mismatch at read_index={}: expected 0x{:04X}, got 0x{:04X}",
                self.read_index, expected_port, port
            );
        }

        self.read_index += 1;
        value
    }
}

#[cfg(feature = "alloc")]
impl PortIo for FakePortIo {
    fn inb(&mut self, port: u16) -> u8 {
        match self.next_read(port) {
            PortValue::Byte(value) => value,
            PortValue::Word(_) => panic!(
                "FakePortIo: Width mismatch on port 0x{:04X}: scripted word, read byte",
                port
            ),
        }
    }

    fn outb(&mut self, port: u16, value: u8) {
        self.writes.push((port, PortValue::Byte(value)));
    }

    fn inw(&mut self, port: u16) -> u16 {
        match self.next_read(port) {
            PortValue::Word(value) => value,
            PortValue::Byte(_) => panic!(
                "FakePortIo: Width mismatch on port 0x{:04X}: scripted byte, read word",
                port
            ),
        }
    }

    fn outw(&mut self, port: u16, value: u16) {
        self.writes.push((port, PortValue::Word(value)));
    }
}
