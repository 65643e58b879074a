//! Prints "Hello, world N!" on USART1 (PA9/PA10, 115 200 baud) once per second

#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_halt as _;

use cortex_m_rt::entry;
use stm32f1xx_hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};

use stm32f1xx_demos::{board, Console, HelloCounter};

#[entry]
fn main() -> ! {
    // Get access to the core peripherals from the cortex-m crate
    let cp = cortex_m::Peripherals::take().unwrap();
    // Get access to the device specific peripherals from the peripheral access crate
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

    // USART1
    let tx = gpioa.pa9.into_alternate_push_pull(&mut gpioa.crh);
    let rx = gpioa.pa10;

    let serial = Serial::new(
        p.USART1,
        (tx, rx),
        &mut afio.mapr,
        Config::default().baudrate(board::CONSOLE_BAUD.bps()),
        &clocks,
    );
    let (tx, _rx) = serial.split();
    let mut console = Console::new(tx);

    let mut delay = cp.SYST.delay(&clocks);
    let mut counter = HelloCounter::new();

    loop {
        console.hello(counter.next()).ok();
        delay.delay_ms(1_000_u16);
    }
}
