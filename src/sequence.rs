//! # Receive sequence check
//!
//! The first byte of consecutive bursts is expected to count up by one,
//! modulo 256. A deviation is reported and the checker resynchronizes to
//! the observed value.

use core::fmt;

/// An observed first byte differing from the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mismatch {
    /// The running burst count; only its low byte is compared.
    pub expected: u32,
    pub observed: u8,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR: {:x} {:x}", self.expected, self.observed)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceChecker {
    // Zero until the first observation.
    next: u32,
}

impl SequenceChecker {
    pub const fn new() -> Self {
        SequenceChecker { next: 0 }
    }

    /// Feeds the first byte of a burst.
    pub fn observe(&mut self, first: u8) -> Result<(), Mismatch> {
        let mut result = Ok(());
        if self.next == 0 {
            self.next = u32::from(first);
        } else if self.next % 256 != u32::from(first) {
            result = Err(Mismatch {
                expected: self.next,
                observed: first,
            });
            self.next = u32::from(first);
        }
        self.next = self.next.wrapping_add(1);
        result
    }
}
