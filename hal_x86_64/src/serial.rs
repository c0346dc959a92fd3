//! 16550 UART serial port
//!
//! Early log sink. Implements `core::fmt::Write`, so the console logging
//! macros can target it exactly as they target the screen.

use core::fmt;

use crate::port_io::PortIo;

/// COM1 base port
pub const COM1: u16 = 0x3F8;

/// Line status register offset
const LINE_STATUS: u16 = 5;
/// Transmit holding register empty
const LSR_TX_EMPTY: u8 = 0x20;

/// Serial port driven through a [`PortIo`] backend
pub struct SerialPort<P: PortIo> {
    port_io: P,
    base: u16,
}

impl<P: PortIo> SerialPort<P> {
    /// Creates a serial port at `base` (typically [`COM1`])
    pub const fn new(port_io: P, base: u16) -> Self {
        Self { port_io, base }
    }

    /// Programs 38400 baud, 8N1, FIFO enabled
    pub fn init(&mut self) {
        self.outb(1, 0x00); // Disable interrupts
        self.outb(3, 0x80); // DLAB on
        self.outb(0, 0x03); // Divisor low: 38400 baud
        self.outb(1, 0x00); // Divisor high
        self.outb(3, 0x03); // 8 bits, no parity, one stop bit
        self.outb(2, 0xC7); // FIFO on, clear, 14-byte threshold
        self.outb(4, 0x0B); // IRQs enabled, RTS/DSR set
    }

    /// Writes one byte, spinning until the transmitter is ready
    pub fn write_byte(&mut self, byte: u8) {
        while !self.transmit_ready() {
            core::hint::spin_loop();
        }
        self.outb(0, byte);
    }

    /// Consumes the port, returning the backend
    pub fn into_inner(self) -> P {
        self.port_io
    }

    fn transmit_ready(&mut self) -> bool {
        self.inb(LINE_STATUS) & LSR_TX_EMPTY != 0
    }

    fn inb(&mut self, offset: u16) -> u8 {
        self.port_io.inb(self.base + offset)
    }

    fn outb(&mut self, offset: u16, value: u8) {
        self.port_io.outb(self.base + offset, value);
    }
}

impl<P: PortIo> fmt::Write for SerialPort<P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(byte);
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use crate::port_io::FakePortIo;
    use core::fmt::Write;

    #[test]
    fn test_init_sequence() {
        let mut serial = SerialPort::new(FakePortIo::new(), COM1);
        serial.init();

        let io = serial.into_inner();
        assert_eq!(
            io.byte_writes(),
            vec![
                (0x3F9, 0x00),
                (0x3FB, 0x80),
                (0x3F8, 0x03),
                (0x3F9, 0x00),
                (0x3FB, 0x03),
                (0x3FA, 0xC7),
                (0x3FC, 0x0B),
            ]
        );
    }

    #[test]
    fn test_write_waits_for_transmitter() {
        let mut io = FakePortIo::new();
        io.script_reads(&[(0x3FD, 0x00), (0x3FD, LSR_TX_EMPTY)]);
        let mut serial = SerialPort::new(io, COM1);

        serial.write_byte(b'K');

        let io = serial.into_inner();
        assert_eq!(io.remaining_reads(), 0);
        assert_eq!(io.byte_writes(), vec![(0x3F8, b'K')]);
    }

    #[test]
    fn test_newline_translated_to_crlf() {
        let mut io = FakePortIo::new();
        for _ in 0..3 {
            io.script_read(0x3FD, LSR_TX_EMPTY);
        }
        let mut serial = SerialPort::new(io, COM1);

        write!(serial, "a\n").unwrap();

        let io = serial.into_inner();
        assert_eq!(
            io.byte_writes(),
            vec![(0x3F8, b'a'), (0x3F8, b'\r'), (0x3F8, b'\n')]
        );
    }
}
