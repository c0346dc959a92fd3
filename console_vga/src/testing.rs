//! Test doubles for the console

use hal_x86_64::PortIo;

use crate::cursor::CursorPorts;

/// Simulated CRT controller
///
/// Holds a register file addressed through the index/data port pair, so
/// cursor writes can be read back. Every byte written to either port is
/// logged in order.
#[derive(Debug)]
pub struct SimCrtc {
    ports: CursorPorts,
    selected: u8,
    registers: [u8; 32],
    writes: Vec<(u16, u8)>,
}

impl SimCrtc {
    pub fn new(ports: CursorPorts) -> Self {
        Self {
            ports,
            selected: 0,
            registers: [0; 32],
            writes: Vec::new(),
        }
    }

    /// Places the cursor at `cell_index` without logging a write
    pub fn with_cursor(mut self, cell_index: u16) -> Self {
        self.registers[14] = (cell_index >> 8) as u8;
        self.registers[15] = (cell_index & 0xFF) as u8;
        self
    }

    pub fn register(&self, index: u8) -> u8 {
        self.registers[index as usize]
    }

    /// Cell index currently held by registers 14/15
    pub fn cursor_index(&self) -> u16 {
        ((self.registers[14] as u16) << 8) | self.registers[15] as u16
    }

    pub fn writes(&self) -> &[(u16, u8)] {
        &self.writes
    }

    /// Number of register selects written to the index port
    pub fn index_selects(&self) -> usize {
        self.writes
            .iter()
            .filter(|&&(port, _)| port == self.ports.index)
            .count()
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl PortIo for SimCrtc {
    fn inb(&mut self, port: u16) -> u8 {
        assert_eq!(port, self.ports.data, "SimCrtc: read from non-data port");
        self.registers[self.selected as usize]
    }

    fn outb(&mut self, port: u16, value: u8) {
        self.writes.push((port, value));
        if port == self.ports.index {
            self.selected = value & 0x1F;
        } else if port == self.ports.data {
            self.registers[self.selected as usize] = value;
        } else {
            panic!("SimCrtc: write to unknown port 0x{:04X}", port);
        }
    }

    fn inw(&mut self, port: u16) -> u16 {
        panic!("SimCrtc: word read from port 0x{:04X}", port);
    }

    fn outw(&mut self, port: u16, _value: u16) {
        panic!("SimCrtc: word write to port 0x{:04X}", port);
    }
}
