//! # Burst capture
//!
//! One burst is [`DMA_RPT`] back-to-back DMA transfers of [`TEST_SIZE`]
//! bytes each. The receive buffer is reused per transfer, so every block is
//! copied into a [`Capture`] before the next transfer starts.

use core::fmt;

/// Bytes per DMA transfer
pub const TEST_SIZE: usize = 16;

/// Transfers per burst
pub const DMA_RPT: usize = 10;

/// Address bits covered by one block, `log2(TEST_SIZE)`
pub const RING_BITS: u32 = TEST_SIZE.trailing_zeros();

const _: () = assert!(TEST_SIZE.is_power_of_two());

pub type Block = [u8; TEST_SIZE];

/// Transmit block: a fixed pseudo-random fill.
///
/// Byte 0 is overwritten with the burst number by [`stamp`] before each
/// burst.
pub const fn tx_pattern() -> Block {
    let mut block = [0; TEST_SIZE];
    let mut state: u32 = 0x2545_f491;
    let mut i = 0;
    while i < TEST_SIZE {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        block[i] = (state >> 24) as u8;
        i += 1;
    }
    block
}

/// Writes the burst number into the first transmit byte.
pub fn stamp(block: &mut Block, burst: u8) {
    block[0] = burst;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum CaptureError {
    /// Slot index not below [`DMA_RPT`]
    SlotOutOfRange(usize),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::SlotOutOfRange(i) => {
                write!(f, "capture slot {} out of range (max {})", i, DMA_RPT - 1)
            }
        }
    }
}

/// Received data of a whole burst.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    data: [u8; TEST_SIZE * DMA_RPT],
}

impl Capture {
    pub const fn new() -> Self {
        Capture {
            data: [0; TEST_SIZE * DMA_RPT],
        }
    }

    /// Copies `block` into slot `index`.
    pub fn store(&mut self, index: usize, block: &Block) -> Result<(), CaptureError> {
        if index >= DMA_RPT {
            return Err(CaptureError::SlotOutOfRange(index));
        }
        let start = index * TEST_SIZE;
        self.data[start..start + TEST_SIZE].copy_from_slice(block);
        Ok(())
    }

    /// First received byte of the burst, the one the sequence check uses.
    pub fn first(&self) -> u8 {
        self.data[0]
    }
}

impl Default for Capture {
    fn default() -> Self {
        Self::new()
    }
}
