//! # x86_64 Hardware Abstraction Layer
//!
//! This crate implements the HAL for x86_64 PCs.
//!
//! ## Scope
//!
//! - [`port_io`]: byte and word port transactions (`in`/`out`)
//! - [`mmio`]: volatile access to the VGA text buffer at `0xB8000`
//! - [`serial`]: COM1 UART used as the early log sink

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod mmio;
pub mod port_io;
pub mod serial;

pub use mmio::{MmioTextBuffer, VGA_TEXT_BUFFER_PHYS};
#[cfg(feature = "alloc")]
pub use port_io::FakePortIo;
pub use port_io::{PortIo, PortValue, RealPortIo};
pub use serial::{SerialPort, COM1};
