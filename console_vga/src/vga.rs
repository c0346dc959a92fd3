//! VGA text console bring-up on PC hardware
//!
//! Maps the physical text buffer (0xB8000) through the higher-half direct
//! map and pairs it with real port I/O.

use hal_x86_64::{MmioTextBuffer, RealPortIo, VGA_TEXT_BUFFER_PHYS};

use crate::error::ConsoleError;
use crate::grid::GRID_BYTES;
use crate::screen::{ScreenConfig, TextScreen};

/// Screen driving real VGA hardware
pub type VgaScreen = TextScreen<MmioTextBuffer, RealPortIo>;

/// Creates the VGA text screen
///
/// `hhdm_offset` is the virtual base of the direct physical map (0 when
/// running identity-mapped).
///
/// # Safety
///
/// The caller must ensure:
/// - The text buffer is mapped at `hhdm_offset + 0xB8000`
/// - The CPU runs with I/O privilege for the CRTC ports
/// - No other handle to VGA memory or the CRTC exists
pub unsafe fn init_vga_screen(
    hhdm_offset: usize,
    config: ScreenConfig,
) -> Result<VgaScreen, ConsoleError> {
    let virt = hhdm_offset + VGA_TEXT_BUFFER_PHYS;
    let buffer = MmioTextBuffer::new(virt, GRID_BYTES)?;
    TextScreen::with_config(buffer, RealPortIo::new(), config)
}
