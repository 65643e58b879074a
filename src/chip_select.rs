use embedded_hal_02::digital::v2::OutputPin;

/// Active low chip select line.
///
/// Every edge is padded with a few cycles so the peripheral sees CS settle
/// before the first clock and after the last one.
#[derive(Debug)]
pub struct ChipSelect<P> {
    pin: P,
}

impl<P: OutputPin> ChipSelect<P> {
    /// Takes the pin and deselects it.
    pub fn new(mut pin: P) -> Result<Self, P::Error> {
        pin.set_high()?;
        Ok(ChipSelect { pin })
    }

    pub fn select(&mut self) -> Result<(), P::Error> {
        settle();
        self.pin.set_low()?;
        settle();
        Ok(())
    }

    pub fn deselect(&mut self) -> Result<(), P::Error> {
        settle();
        self.pin.set_high()?;
        settle();
        Ok(())
    }

    /// Returns the pin, leaving it at its current level.
    pub fn release(self) -> P {
        self.pin
    }
}

#[inline(always)]
fn settle() {
    #[cfg(target_arch = "arm")]
    {
        cortex_m::asm::nop();
        cortex_m::asm::nop();
        cortex_m::asm::nop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Debug, Default)]
    struct Recorder {
        levels: Vec<bool>,
    }

    impl OutputPin for Recorder {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.levels.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.levels.push(true);
            Ok(())
        }
    }

    struct Broken;

    impl OutputPin for Broken {
        type Error = ();

        fn set_low(&mut self) -> Result<(), ()> {
            Err(())
        }

        fn set_high(&mut self) -> Result<(), ()> {
            Err(())
        }
    }

    #[test]
    fn starts_deselected() {
        let cs = ChipSelect::new(Recorder::default()).unwrap();
        assert_eq!(cs.release().levels, [true]);
    }

    #[test]
    fn select_then_deselect() {
        let mut cs = ChipSelect::new(Recorder::default()).unwrap();
        cs.select().unwrap();
        cs.deselect().unwrap();
        assert_eq!(cs.release().levels, [true, false, true]);
    }

    #[test]
    fn pin_errors_propagate() {
        assert!(ChipSelect::new(Broken).is_err());
    }
}
