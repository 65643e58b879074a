//! SPI1 loopback through DMA1, one burst per rising edge on PB8
//!
//! Short MOSI (PA7) to MISO (PA6). Each rising edge on PB8 runs ten
//! back-to-back 16 byte transfers with CS (PA4) held low. The first
//! received byte of a burst must be one more than that of the previous
//! burst; mismatches are printed on USART1 and the check resynchronizes.
//!
//! Byte 0 of the transmit block carries the burst number, so the loopback
//! jumper alone satisfies the check. A peer driving MISO with its own
//! counter works the same way.

#![no_main]
#![no_std]

use panic_halt as _;

use core::cell::RefCell;

use cortex_m::{interrupt::Mutex, peripheral::NVIC, singleton};
use cortex_m_rt::entry;
use stm32f1xx_hal::{
    dma::ReadWriteDma,
    gpio::{gpiob::PB8, Edge, ExtiPin, Input, PullDown},
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
    spi::{Mode, Phase, Polarity, Spi},
};

use stm32f1xx_demos::{
    board,
    capture::{self, Block},
    trigger, BurstCheck, ChipSelect, Console, EdgeLine, ReadRequest, DMA_RPT, TEST_SIZE,
};

struct TriggerLine {
    pin: PB8<Input<PullDown>>,
    exti: pac::EXTI,
}

impl EdgeLine for TriggerLine {
    fn is_pending(&mut self) -> bool {
        self.pin.check_interrupt()
    }

    fn clear_pending(&mut self) {
        self.pin.clear_interrupt_pending_bit();
    }

    fn mask(&mut self) {
        self.pin.disable_interrupt(&mut self.exti);
    }

    fn unmask(&mut self) {
        self.pin.enable_interrupt(&mut self.exti);
    }
}

// Owned by EXTI9_5 once the line is armed; main only re-arms it.
static TRIGGER: Mutex<RefCell<Option<TriggerLine>>> = Mutex::new(RefCell::new(None));

static READ_REQUEST: ReadRequest = ReadRequest::new();

#[interrupt]
fn EXTI9_5() {
    cortex_m::interrupt::free(|cs| {
        if let Some(line) = TRIGGER.borrow(cs).borrow_mut().as_mut() {
            // masked until the burst has been checked
            READ_REQUEST.service(line);
        }
    });
}

/// Unmasks the trigger line again. An edge latched during the burst fires
/// EXTI9_5 right away and requests the next burst.
fn rearm_trigger() {
    cortex_m::interrupt::free(|cs| {
        if let Some(line) = TRIGGER.borrow(cs).borrow_mut().as_mut() {
            trigger::rearm(line);
        }
    });
}

#[entry]
fn main() -> ! {
    let p = pac::Peripherals::take().unwrap();

    let mut flash = p.FLASH.constrain();
    let rcc = p.RCC.constrain();

    let clocks = rcc
        .cfgr
        .use_hse(board::HSE)
        .sysclk(board::SYSCLK)
        .pclk1(board::PCLK1)
        .freeze(&mut flash.acr);

    let mut afio = p.AFIO.constrain();
    let mut gpioa = p.GPIOA.split();

    // Enable USART1 so we can print status output
    let tx = gpioa.pa9.into_alternate_push_pull(&mut gpioa.crh);
    let rx = gpioa.pa10;
    let serial = Serial::new(
        p.USART1,
        (tx, rx),
        &mut afio.mapr,
        Config::default().baudrate(board::CONSOLE_BAUD.bps()),
        &clocks,
    );
    let mut console = Console::new(serial.split().0);

    if !board::HAS_SPI_PINS {
        console
            .line(format_args!("Default SPI pins were not defined"))
            .ok();
        loop {
            cortex_m::asm::wfi();
        }
    }

    let mut gpiob = p.GPIOB.split();
    let mut exti = p.EXTI;

    let mut pin = gpiob.pb8.into_pull_down_input(&mut gpiob.crh);
    pin.make_interrupt_source(&mut afio);
    pin.trigger_on_edge(&mut exti, Edge::Rising);
    pin.enable_interrupt(&mut exti);
    cortex_m::interrupt::free(|cs| {
        TRIGGER
            .borrow(cs)
            .replace(Some(TriggerLine { pin, exti }));
    });
    // NOTE(unsafe) the handler only touches TRIGGER and READ_REQUEST,
    // both of which are initialized by now
    unsafe { NVIC::unmask(pac::Interrupt::EXTI9_5) };

    // SPI1 mode 0
    let sck = gpioa.pa5.into_alternate_push_pull(&mut gpioa.crl);
    let miso = gpioa.pa6;
    let mosi = gpioa.pa7.into_alternate_push_pull(&mut gpioa.crl);
    let spi_mode = Mode {
        polarity: Polarity::IdleLow,
        phase: Phase::CaptureOnFirstTransition,
    };
    let spi = Spi::spi1(
        p.SPI1,
        (sck, miso, mosi),
        &mut afio.mapr,
        spi_mode,
        board::SPI_FREQ,
        clocks,
    );
    console
        .frequency(
            "SPI DMA example",
            board::achieved_spi_frequency(clocks.pclk2(), board::SPI_FREQ),
        )
        .ok();

    let mut cs = ChipSelect::new(gpioa.pa4.into_push_pull_output(&mut gpioa.crl)).unwrap();

    // SPI1 requests are hardwired to DMA1: RX on channel 2, TX on channel 3.
    // Both sides move one byte per request; memory increments, the data
    // register does not.
    let dma = p.DMA1.split();
    console.line(format_args!("Configure TX DMA")).ok();
    console.line(format_args!("Configure RX DMA")).ok();
    let mut spi_dma = spi.with_rx_tx_dma(dma.2, dma.3);

    let mut tx_buf: &'static mut Block = singleton!(: Block = capture::tx_pattern()).unwrap();
    let mut rx_buf: &'static mut Block = singleton!(: Block = [0; TEST_SIZE]).unwrap();

    let mut check = BurstCheck::new();
    check.prepare(tx_buf);

    console.line(format_args!("Starting DMAs...")).ok();

    loop {
        if READ_REQUEST.take() {
            cs.select().ok();
            for j in 0..DMA_RPT {
                // RX and TX channels are enabled together and the
                // transfer completes once the last byte has been received
                let ((rx, tx), link) = spi_dma.read_write(rx_buf, tx_buf).wait();
                check.record(j, rx).unwrap();
                rx_buf = rx;
                tx_buf = tx;
                spi_dma = link;
            }
            cs.deselect().ok();

            if let Err(mismatch) = check.finish(tx_buf) {
                console.line(format_args!("{}", mismatch)).ok();
            }
            rearm_trigger();
        }
        cortex_m::asm::nop();
        cortex_m::asm::nop();
        cortex_m::asm::nop();
    }
}
