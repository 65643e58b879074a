//! # Serial console
//!
//! Line-oriented status output on top of anything implementing
//! [`core::fmt::Write`], normally the `Tx` half of a HAL `Serial`.

use core::fmt::{self, Write};

use fugit::HertzU32 as Hertz;

/// Human readable status lines, terminated with CRLF so plain terminal
/// emulators render them without extra settings.
pub struct Console<W> {
    tx: W,
}

impl<W: Write> Console<W> {
    pub fn new(tx: W) -> Self {
        Console { tx }
    }

    /// Writes one line.
    pub fn line(&mut self, args: fmt::Arguments) -> fmt::Result {
        self.tx.write_fmt(args)?;
        self.tx.write_str("\r\n")
    }

    /// `Hello, world {counter}!`
    pub fn hello(&mut self, counter: u32) -> fmt::Result {
        self.line(format_args!("Hello, world {}!", counter))
    }

    /// `{label} @ {freq} MHz`, with the frequency printed to six decimals.
    pub fn frequency(&mut self, label: &str, freq: Hertz) -> fmt::Result {
        let hz = freq.raw();
        self.line(format_args!(
            "{} @ {}.{:06} MHz",
            label,
            hz / 1_000_000,
            hz % 1_000_000
        ))
    }

    /// Returns the underlying writer.
    pub fn release(self) -> W {
        self.tx
    }
}

impl<W: Write> Write for Console<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.tx.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    fn console() -> Console<String<128>> {
        Console::new(String::new())
    }

    #[test]
    fn hello_line() {
        let mut c = console();
        c.hello(0).unwrap();
        c.hello(41).unwrap();
        assert_eq!(
            c.release().as_str(),
            "Hello, world 0!\r\nHello, world 41!\r\n"
        );
    }

    #[test]
    fn frequency_has_six_decimals() {
        let mut c = console();
        c.frequency("SPI DMA example", Hertz::MHz(18)).unwrap();
        c.frequency("SPI DMA example", Hertz::from_raw(281_250))
            .unwrap();
        assert_eq!(
            c.release().as_str(),
            "SPI DMA example @ 18.000000 MHz\r\nSPI DMA example @ 0.281250 MHz\r\n"
        );
    }

    #[test]
    fn full_sink_reports_error() {
        let mut c: Console<String<8>> = Console::new(String::new());
        assert!(c.hello(7).is_err());
    }

    #[test]
    fn formatted_line() {
        let mut c = console();
        c.line(format_args!("Configure {} DMA", "TX")).unwrap();
        assert_eq!(c.release().as_str(), "Configure TX DMA\r\n");
    }
}
