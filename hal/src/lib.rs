//! # Hardware Abstraction Layer (HAL)
//!
//! This crate defines hardware abstraction traits for the text console.
//!
//! ## Philosophy
//!
//! **Architecture must be fully abstracted and swappable.**
//!
//! The console driver never touches video memory directly. It goes through
//! [`TextBuffer`], which architecture crates implement over real MMIO and
//! tests implement over plain RAM.
//!
//! ## Design Principles
//!
//! 1. **No x86-specific assumptions**: Port I/O lives in `hal_x86_64`
//! 2. **Trait-based**: All video memory access goes through traits
//! 3. **Minimal unsafe**: None in this crate
//! 4. **Testable**: `RamTextBuffer` can replace video memory in tests

#![cfg_attr(not(test), no_std)]

pub mod text_buffer;

#[cfg(feature = "alloc")]
pub use text_buffer::RamTextBuffer;
pub use text_buffer::{HalError, TextBuffer};
