//! # Text Screen
//!
//! The VGA text driver proper: writes characters into the cell grid,
//! keeps the hardware cursor in step, and scrolls when output runs off the
//! bottom of the screen.
//!
//! ## Rendering
//!
//! A print starts at an explicit [`Position`] or, failing that, at the
//! hardware cursor. For each character:
//!
//! 1. If the insertion point is [`CellOffset::END`], scroll one row and
//!    continue at the start of the bottom row
//! 2. A line feed writes nothing and jumps to the last column of its row;
//!    any other byte is stored as `(byte, attribute)`
//! 3. Advance one cell
//!
//! Once all characters are written the final insertion point is committed
//! to the cursor registers. Scrolling is lazy: filling the grid exactly
//! leaves the cursor at `END` and only the next character scrolls.

use core::fmt;

use hal::TextBuffer;
use hal_x86_64::PortIo;

use crate::cursor::{self, CursorPorts};
use crate::error::ConsoleError;
use crate::grid::{CellOffset, Position, GRID_BYTES, GRID_CELLS, ROW_BYTES};
use crate::{Attribute, DEFAULT_ATTRIBUTE};

/// Glyph written for characters outside ASCII (code page 437 small square)
pub const REPLACEMENT_GLYPH: u8 = 0xFE;

/// Runtime console configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    /// CRT controller ports holding the cursor
    pub ports: CursorPorts,
    /// Attribute used when a write names none
    pub default_attr: Attribute,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            ports: CursorPorts::VGA,
            default_attr: DEFAULT_ATTRIBUTE,
        }
    }
}

/// VGA text screen
///
/// Owns the video memory handle and the port backend. All mutation goes
/// through `&mut self`; callers sharing a screen between contexts must
/// serialize access themselves.
pub struct TextScreen<B: TextBuffer, P: PortIo> {
    buffer: B,
    port_io: P,
    config: ScreenConfig,
}

impl<B: TextBuffer, P: PortIo> TextScreen<B, P> {
    /// Creates a screen with the default configuration
    pub fn new(buffer: B, port_io: P) -> Result<Self, ConsoleError> {
        Self::with_config(buffer, port_io, ScreenConfig::default())
    }

    /// Creates a screen, failing if `buffer` cannot hold the whole grid
    pub fn with_config(
        buffer: B,
        port_io: P,
        config: ScreenConfig,
    ) -> Result<Self, ConsoleError> {
        buffer.ensure_len(GRID_BYTES)?;
        Ok(Self {
            buffer,
            port_io,
            config,
        })
    }

    /// Releases the video memory and port handles
    pub fn into_parts(self) -> (B, P) {
        (self.buffer, self.port_io)
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn port_io(&self) -> &P {
        &self.port_io
    }

    pub fn config(&self) -> ScreenConfig {
        self.config
    }

    pub fn default_attribute(&self) -> Attribute {
        self.config.default_attr
    }

    pub fn set_default_attribute(&mut self, attr: Attribute) {
        self.config.default_attr = attr;
    }

    /// Blanks every cell with the default attribute and homes the cursor
    pub fn clear(&mut self) {
        let attr = self.config.default_attr;
        for index in 0..GRID_CELLS {
            let offset = index * 2;
            self.buffer.write(offset, b' ');
            self.buffer.write(offset + 1, attr.byte());
        }
        self.set_cursor(CellOffset::ORIGIN);
    }

    /// Prints at the hardware cursor
    pub fn print(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.print_at(text, -1, -1)
    }

    /// Prints starting at `(col, row)`
    ///
    /// When either coordinate is negative, printing resumes at the hardware
    /// cursor instead. Non-negative coordinates outside the grid are
    /// rejected before anything is written.
    pub fn print_at(&mut self, text: &str, col: isize, row: isize) -> Result<(), ConsoleError> {
        let at = if col >= 0 && row >= 0 {
            Some(Position::new(col as usize, row as usize)?)
        } else {
            None
        };
        self.render(text.chars().map(glyph), at)?;
        Ok(())
    }

    /// Prints raw code page 437 bytes, returning the final insertion point
    pub fn print_bytes_at(
        &mut self,
        bytes: &[u8],
        at: Option<Position>,
    ) -> Result<CellOffset, ConsoleError> {
        self.render(bytes.iter().copied(), at)
    }

    /// Prints one byte and commits the cursor after it
    ///
    /// `attr` of `None` selects the default attribute. An explicit
    /// attribute is written as given, including `0` (black on black).
    pub fn print_char(
        &mut self,
        byte: u8,
        at: Option<Position>,
        attr: Option<Attribute>,
    ) -> Result<CellOffset, ConsoleError> {
        let start = self.locate(at)?;
        let attr = attr.unwrap_or(self.config.default_attr);
        let offset = self.put(start, byte, attr);
        self.set_cursor(offset);
        Ok(offset)
    }

    /// Erases the cell before the cursor and moves the cursor onto it
    ///
    /// Does nothing at the top-left cell.
    pub fn print_backspace(&mut self) -> Result<(), ConsoleError> {
        let Some(prev) = self.cursor()?.prev() else {
            return Ok(());
        };
        let attr = self.config.default_attr;
        self.write_cell(prev, b' ', attr);
        self.set_cursor(prev);
        Ok(())
    }

    /// Reads the insertion point from the cursor registers
    pub fn cursor(&mut self) -> Result<CellOffset, ConsoleError> {
        let index = cursor::read_cursor(&mut self.port_io, self.config.ports);
        CellOffset::from_cell_index(index as usize)
    }

    /// Cursor coordinate, or `None` when the cursor rests past the last cell
    pub fn cursor_position(&mut self) -> Result<Option<Position>, ConsoleError> {
        Ok(self.cursor()?.position())
    }

    /// Writes the cursor registers
    pub fn set_cursor(&mut self, offset: CellOffset) {
        // GRID_CELLS fits in 16 bits, so the cast is lossless
        cursor::write_cursor(
            &mut self.port_io,
            self.config.ports,
            offset.cell_index() as u16,
        );
    }

    /// Reads back a cell's character and attribute
    pub fn read_cell(&self, pos: Position) -> (u8, Attribute) {
        let offset = pos.offset().get();
        (
            self.buffer.read(offset),
            Attribute::from_byte(self.buffer.read(offset + 1)),
        )
    }

    /// Moves every row up by one and zero-fills the bottom row
    ///
    /// The cursor is not touched.
    pub fn scroll_up(&mut self) {
        self.buffer.copy_within(ROW_BYTES, 0, GRID_BYTES - ROW_BYTES);
        self.buffer.fill(GRID_BYTES - ROW_BYTES, ROW_BYTES, 0);
    }

    fn locate(&mut self, at: Option<Position>) -> Result<CellOffset, ConsoleError> {
        match at {
            Some(pos) => Ok(pos.offset()),
            None => self.cursor(),
        }
    }

    fn render<I>(&mut self, bytes: I, at: Option<Position>) -> Result<CellOffset, ConsoleError>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut offset = self.locate(at)?;
        let attr = self.config.default_attr;
        for byte in bytes {
            offset = self.put(offset, byte, attr);
        }
        self.set_cursor(offset);
        Ok(offset)
    }

    /// Writes one character at `offset` and returns the next insertion point
    fn put(&mut self, offset: CellOffset, byte: u8, attr: Attribute) -> CellOffset {
        let offset = if offset.is_end() {
            self.scroll_up();
            CellOffset::LAST_ROW_START
        } else {
            offset
        };

        let offset = if byte == b'\n' {
            offset.end_of_row()
        } else {
            self.write_cell(offset, byte, attr);
            offset
        };

        offset.advance()
    }

    fn write_cell(&mut self, offset: CellOffset, byte: u8, attr: Attribute) {
        let offset = offset.get();
        self.buffer.write(offset, byte);
        self.buffer.write(offset + 1, attr.byte());
    }
}

impl<B: TextBuffer, P: PortIo> fmt::Write for TextScreen<B, P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map_err(|_| fmt::Error)
    }
}

fn glyph(c: char) -> u8 {
    if c.is_ascii() {
        c as u8
    } else {
        REPLACEMENT_GLYPH
    }
}
