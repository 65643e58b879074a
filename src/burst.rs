//! # Burst bookkeeping
//!
//! Ties the transmit stamp, the receive [`Capture`] and the
//! [`SequenceChecker`] together for one burst:
//!
//! 1. [`BurstCheck::prepare`] stamps the transmit block once at start-up.
//! 2. Each of the [`DMA_RPT`](crate::capture::DMA_RPT) received blocks goes
//!    to [`BurstCheck::record`].
//! 3. [`BurstCheck::finish`] checks the burst and stamps the transmit block
//!    for the next one.

use crate::capture::{self, Block, Capture, CaptureError};
use crate::sequence::{Mismatch, SequenceChecker};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurstCheck {
    received: Capture,
    checker: SequenceChecker,
    burst: u8,
}

impl BurstCheck {
    pub const fn new() -> Self {
        BurstCheck {
            received: Capture::new(),
            checker: SequenceChecker::new(),
            burst: 0,
        }
    }

    /// Stamps `tx` with the number of the upcoming burst.
    pub fn prepare(&self, tx: &mut Block) {
        capture::stamp(tx, self.burst);
    }

    pub fn record(&mut self, index: usize, rx: &Block) -> Result<(), CaptureError> {
        self.received.store(index, rx)
    }

    /// Checks the completed burst, then advances and restamps `tx`.
    ///
    /// The stamp advances on a mismatch too.
    pub fn finish(&mut self, tx: &mut Block) -> Result<(), Mismatch> {
        let result = self.checker.observe(self.received.first());
        self.burst = self.burst.wrapping_add(1);
        self.prepare(tx);
        result
    }
}

impl Default for BurstCheck {
    fn default() -> Self {
        Self::new()
    }
}
