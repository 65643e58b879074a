/// Counter printed by the `hello` program.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HelloCounter {
    value: u32,
}

impl HelloCounter {
    pub const fn new() -> Self {
        HelloCounter { value: 0 }
    }

    /// Returns the current value and advances, wrapping at `u32::MAX`.
    pub fn next(&mut self) -> u32 {
        let value = self.value;
        self.value = self.value.wrapping_add(1);
        value
    }
}
