//! # VGA Text Console
//!
//! This crate drives a VGA text mode display: an 80x25 grid of character
//! cells in video memory plus a hardware cursor held by the CRT controller.
//!
//! ## Philosophy
//!
//! This is NOT a terminal emulator. No ANSI escape codes, no VT100, no TTY model.
//! Bytes go into cells; a line feed moves to the next row; output that runs
//! off the bottom scrolls the screen by one row.
//!
//! ## Design Principles
//!
//! 1. **Checked geometry**: Coordinates and offsets are validated types
//! 2. **Testable**: Video memory and ports are traits, faked in tests
//! 3. **No unsafe except bring-up**: MMIO and port access live in `hal_x86_64`
//! 4. **Hardware cursor is the truth**: No shadow copy of the cursor is kept

#![cfg_attr(not(test), no_std)]

#[cfg(test)]
use serde::{Deserialize, Serialize};

pub mod cursor;
pub mod error;
pub mod grid;
pub mod log;
pub mod screen;
#[cfg(test)]
pub(crate) mod testing;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod vga;

pub use cursor::{CursorPorts, CRTC_CURSOR_HIGH, CRTC_CURSOR_LOW};
pub use error::ConsoleError;
pub use grid::{CellOffset, Position, GRID_BYTES, GRID_CELLS};
pub use log::LogLevel;
pub use screen::{ScreenConfig, TextScreen, REPLACEMENT_GLYPH};
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use vga::{init_vga_screen, VgaScreen};

/// VGA text mode dimensions
pub const VGA_WIDTH: usize = 80;
pub const VGA_HEIGHT: usize = 25;

/// White on black
pub const DEFAULT_ATTRIBUTE: Attribute = Attribute::new(VgaColor::White, VgaColor::Black);

/// VGA color codes
#[cfg_attr(test, derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VgaColor {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

impl VgaColor {
    /// Make a VGA attribute byte from foreground and background colors
    ///
    /// The background only has three bits; bright backgrounds lose their
    /// intensity bit, which the hardware reads as blink.
    pub const fn make_attr(fg: VgaColor, bg: VgaColor) -> u8 {
        ((bg as u8) & 0x07) << 4 | (fg as u8)
    }
}

/// Cell attribute byte
///
/// Bits 0-3 foreground, bits 4-6 background, bit 7 blink. The byte is
/// stored exactly as given; hardware and emulators interpret it.
#[cfg_attr(test, derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Attribute(u8);

impl Attribute {
    const BLINK: u8 = 0x80;

    pub const fn new(fg: VgaColor, bg: VgaColor) -> Self {
        Self(VgaColor::make_attr(fg, bg))
    }

    /// Wraps a raw attribute byte
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn byte(self) -> u8 {
        self.0
    }

    pub const fn with_blink(self) -> Self {
        Self(self.0 | Self::BLINK)
    }

    pub const fn blinks(self) -> bool {
        self.0 & Self::BLINK != 0
    }

    pub const fn foreground(self) -> u8 {
        self.0 & 0x0F
    }

    pub const fn background(self) -> u8 {
        (self.0 >> 4) & 0x07
    }
}

impl Default for Attribute {
    fn default() -> Self {
        DEFAULT_ATTRIBUTE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vga_dimensions() {
        assert_eq!(VGA_WIDTH, 80);
        assert_eq!(VGA_HEIGHT, 25);
    }

    #[test]
    fn test_vga_color_attr() {
        let attr = VgaColor::make_attr(VgaColor::White, VgaColor::Black);
        assert_eq!(attr, 0x0F); // White on black

        let attr = VgaColor::make_attr(VgaColor::LightGreen, VgaColor::Black);
        assert_eq!(attr, 0x0A); // Light green on black

        let attr = VgaColor::make_attr(VgaColor::Yellow, VgaColor::Blue);
        assert_eq!(attr, 0x1E);
    }

    #[test]
    fn test_bright_background_does_not_set_blink() {
        let attr = Attribute::new(VgaColor::Black, VgaColor::LightGray);
        assert_eq!(attr.byte(), 0x70);
        let attr = Attribute::new(VgaColor::Black, VgaColor::White);
        assert!(!attr.blinks());
        assert_eq!(attr.background(), 0x07);
    }

    #[test]
    fn test_attribute_fields() {
        let attr = Attribute::new(VgaColor::LightRed, VgaColor::Blue).with_blink();
        assert_eq!(attr.byte(), 0x9C);
        assert!(attr.blinks());
        assert_eq!(attr.foreground(), VgaColor::LightRed as u8);
        assert_eq!(attr.background(), VgaColor::Blue as u8);
    }

    #[test]
    fn test_default_attribute() {
        assert_eq!(DEFAULT_ATTRIBUTE.byte(), 0x0F);
        assert_eq!(Attribute::default(), DEFAULT_ATTRIBUTE);
        assert_eq!(Attribute::from_byte(0).byte(), 0);
    }

    #[test]
    fn test_color_serialization() {
        let json = serde_json::to_string(&VgaColor::LightCyan).unwrap();
        assert_eq!(json, "\"LightCyan\"");
        let color: VgaColor = serde_json::from_str(&json).unwrap();
        assert_eq!(color, VgaColor::LightCyan);
    }

    #[test]
    fn test_attribute_serializes_as_raw_byte() {
        let attr = Attribute::new(VgaColor::Yellow, VgaColor::Blue);
        assert_eq!(serde_json::to_string(&attr).unwrap(), "30");
        let back: Attribute = serde_json::from_str("30").unwrap();
        assert_eq!(back, attr);
    }
}
