//! Hardware cursor
//!
//! The cursor lives in two CRT controller registers, addressed through an
//! index/data port pair. The registers hold a *cell index*, high byte in
//! register 14 and low byte in register 15. Nothing here caches the value;
//! every read and write goes to the ports.

use hal_x86_64::PortIo;

/// CRTC register: cursor location high byte
pub const CRTC_CURSOR_HIGH: u8 = 14;
/// CRTC register: cursor location low byte
pub const CRTC_CURSOR_LOW: u8 = 15;

/// CRT controller index/data port pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPorts {
    /// Index (register select) port
    pub index: u16,
    /// Data port
    pub data: u16,
}

impl CursorPorts {
    /// Color adapters (VGA, EGA in color mode)
    pub const VGA: CursorPorts = CursorPorts {
        index: 0x3D4,
        data: 0x3D5,
    };

    /// Monochrome adapters (MDA, Hercules)
    pub const MDA: CursorPorts = CursorPorts {
        index: 0x3B4,
        data: 0x3B5,
    };
}

impl Default for CursorPorts {
    fn default() -> Self {
        Self::VGA
    }
}

/// Reads the cursor cell index from the controller
pub fn read_cursor<P: PortIo>(port_io: &mut P, ports: CursorPorts) -> u16 {
    port_io.outb(ports.index, CRTC_CURSOR_HIGH);
    let high = port_io.inb(ports.data) as u16;
    port_io.outb(ports.index, CRTC_CURSOR_LOW);
    let low = port_io.inb(ports.data) as u16;
    (high << 8) | low
}

/// Writes a cell index to the controller, high byte first
pub fn write_cursor<P: PortIo>(port_io: &mut P, ports: CursorPorts, cell_index: u16) {
    port_io.outb(ports.index, CRTC_CURSOR_HIGH);
    port_io.outb(ports.data, (cell_index >> 8) as u8);
    port_io.outb(ports.index, CRTC_CURSOR_LOW);
    port_io.outb(ports.data, (cell_index & 0xFF) as u8);
}
