//! # Serial console and SPI/DMA loopback demos for the STM32F1
//!
//! Two firmware programs built on [`stm32f1xx-hal`]:
//!
//! - `hello` prints `Hello, world N!` on USART1 once per second.
//! - `spi-dma` runs bursts of ten 16 byte SPI1 transfers, transmit and
//!   receive both driven by DMA1, each burst triggered by a rising edge on
//!   PB8. The first received byte must count up by one per burst; any
//!   deviation is printed and the check resynchronizes.
//!
//! This library holds the parts of both programs that do not touch
//! registers, so they can be tested on the host with `cargo test --lib`.
//!
//! [`stm32f1xx-hal`]: https://crates.io/crates/stm32f1xx-hal
//!
//! # Usage
//!
//! Select a board with its Cargo feature (`blue-pill` is the default) and
//! build the binaries with the `rt` feature for `thumbv7m-none-eabi`:
//!
//! ```text
//! cargo firmware
//! probe-rs run --chip STM32F103C8 target/thumbv7m-none-eabi/release/spi-dma
//! ```
//!
//! For the loopback test, jumper MOSI (PA7) to MISO (PA6). The console is
//! USART1 on PA9/PA10 at 115 200 baud.

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod burst;
pub mod capture;
pub mod chip_select;
pub mod console;
pub mod counter;
pub mod sequence;
pub mod trigger;

pub use crate::burst::BurstCheck;
pub use crate::capture::{Capture, CaptureError, DMA_RPT, TEST_SIZE};
pub use crate::chip_select::ChipSelect;
pub use crate::console::Console;
pub use crate::counter::HelloCounter;
pub use crate::sequence::{Mismatch, SequenceChecker};
pub use crate::trigger::{EdgeLine, ReadRequest};
