//! # Board configuration
//!
//! Pin assignment and clock constants for the supported boards. The pin
//! table is selected by a Cargo feature; `blue-pill` is the default.
//!
//! | Signal              | Blue Pill            |
//! |---------------------|----------------------|
//! | Console TX / RX     | USART1 PA9 / PA10    |
//! | SPI SCK             | SPI1 PA5             |
//! | SPI MISO            | SPI1 PA6             |
//! | SPI MOSI            | SPI1 PA7             |
//! | SPI CS (active low) | PA4                  |
//! | Trigger interrupt   | PB8 (EXTI line 8)    |
//!
//! For the loopback test, jumper PA7 to PA6 and drive PB8 from whatever
//! should start a burst (a button or a second board).

use fugit::HertzU32 as Hertz;

/// External crystal of the Blue Pill
pub const HSE: Hertz = Hertz::MHz(8);

/// Core clock
pub const SYSCLK: Hertz = Hertz::MHz(72);

/// APB1 clock, at its 36 MHz ceiling
pub const PCLK1: Hertz = Hertz::MHz(36);

/// Console baud rate
pub const CONSOLE_BAUD: u32 = 115_200;

/// Requested SPI clock; the peripheral rounds this down, see
/// [`achieved_spi_frequency`].
pub const SPI_FREQ: Hertz = Hertz::MHz(20);

/// EXTI line of the trigger pin
pub const TRIGGER_LINE: u8 = 8;

/// `true` when the selected board wires up the SPI pins.
pub const HAS_SPI_PINS: bool = cfg!(board_spi_pins);

/// Baud rate divisor field the SPI peripheral uses for `target` when its
/// bus runs at `pclk`.
///
/// The divisor is `2^(br + 1)`, picked from the ratio `pclk / target` with
/// the same table the HAL applies in `Spi::spi1`. A zero `target` selects
/// the largest divisor.
pub const fn spi_baud_divisor_bits(pclk: Hertz, target: Hertz) -> u8 {
    if target.raw() == 0 {
        return 0b111;
    }
    match pclk.raw() / target.raw() {
        0..=2 => 0b000,
        3..=5 => 0b001,
        6..=11 => 0b010,
        12..=23 => 0b011,
        24..=47 => 0b100,
        48..=95 => 0b101,
        96..=191 => 0b110,
        _ => 0b111,
    }
}

/// SPI clock actually produced when `target` is requested on a bus at `pclk`.
pub const fn achieved_spi_frequency(pclk: Hertz, target: Hertz) -> Hertz {
    let br = spi_baud_divisor_bits(pclk, target);
    Hertz::from_raw(pclk.raw() >> (br + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_megahertz_on_apb2_rounds_to_eighteen() {
        // 72 / 20 = 3 -> divide by 4
        assert_eq!(spi_baud_divisor_bits(SYSCLK, SPI_FREQ), 0b001);
        assert_eq!(achieved_spi_frequency(SYSCLK, SPI_FREQ), Hertz::MHz(18));
    }

    #[test]
    fn fast_requests_clamp_to_half_the_bus() {
        assert_eq!(
            achieved_spi_frequency(SYSCLK, Hertz::MHz(72)),
            Hertz::MHz(36)
        );
        assert_eq!(
            achieved_spi_frequency(SYSCLK, Hertz::MHz(100)),
            Hertz::MHz(36)
        );
    }

    #[test]
    fn slow_requests_clamp_to_the_largest_divisor() {
        assert_eq!(spi_baud_divisor_bits(SYSCLK, Hertz::kHz(100)), 0b111);
        assert_eq!(
            achieved_spi_frequency(SYSCLK, Hertz::kHz(100)),
            Hertz::from_raw(281_250)
        );
    }

    #[test]
    fn zero_target_uses_the_largest_divisor() {
        assert_eq!(spi_baud_divisor_bits(SYSCLK, Hertz::from_raw(0)), 0b111);
        assert_eq!(
            achieved_spi_frequency(SYSCLK, Hertz::from_raw(0)),
            Hertz::from_raw(281_250)
        );
    }

    #[test]
    fn one_megahertz() {
        // 72 / 1 = 72 -> divide by 64
        assert_eq!(
            achieved_spi_frequency(SYSCLK, Hertz::MHz(1)),
            Hertz::from_raw(1_125_000)
        );
    }

    #[test]
    fn spi_pins_follow_board_feature() {
        assert_eq!(HAS_SPI_PINS, cfg!(feature = "blue-pill"));
    }
}
