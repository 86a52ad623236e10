//! Clock, alarm and thermometer on a Raspberry Pi Pico (RP2040).
//!
//! The display multiplexer runs on a high-priority interrupt executor so it keeps
//! rendering while the clock logic runs in thread mode.
//!
//! Wiring:
//! - segment shift register: latch GP2, data GP3, clock GP4
//! - digit select (active high): GP10, GP11, GP12, GP13
//! - colon GP14, degree sign GP15 (active low)
//! - navigate button GP20, value button GP21 (to ground)
#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::info;
use defmt_rtt as _;
use embassy_executor::{Executor, InterruptExecutor, Spawner};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::rtc::{self, Rtc};
use embassy_rp::bind_interrupts;
use embassy_time::{Instant, Ticker};
use mex_clock::button::Buttons;
use mex_clock::led4::{Led4, Led4Static, OutputArray, ShiftRegisterBus};
use mex_clock::rtc_clock::RtcClock;
use mex_clock::temperature::InternalTemperature;
use mex_clock::{Clock, DEFAULT_BRIGHTNESS, Result, SCHEDULER_TICK};
use panic_probe as _;
use static_cell::StaticCell;

type AppClock = Clock<
    'static,
    ShiftRegisterBus<'static>,
    RtcClock<'static>,
    Buttons<'static>,
    InternalTemperature<'static>,
>;

bind_interrupts!(struct Irqs {
    RTC_IRQ => rtc::InterruptHandler;
});

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_THREAD: StaticCell<Executor> = StaticCell::new();
static LED4_STATIC: Led4Static<ShiftRegisterBus<'static>> = Led4::new_static();

#[interrupt]
#[expect(unsafe_code, reason = "Interrupt handler required by the interrupt executor")]
unsafe fn SWI_IRQ_1() {
    // SAFETY: SWI_IRQ_1 is dedicated to EXECUTOR_HIGH.
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

#[entry]
fn main() -> ! {
    let executor = EXECUTOR_THREAD.init(Executor::new());
    executor.run(|spawner| {
        if let Err(err) = start(spawner) {
            panic!("{err}");
        }
    })
}

fn start(spawner: Spawner) -> Result<()> {
    let p = embassy_rp::init(Default::default());

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let render_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    let bus = ShiftRegisterBus::new(
        OutputArray::new([
            Output::new(p.PIN_10, Level::Low),
            Output::new(p.PIN_11, Level::Low),
            Output::new(p.PIN_12, Level::Low),
            Output::new(p.PIN_13, Level::Low),
        ]),
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_14, Level::High),
        Output::new(p.PIN_15, Level::High),
    );
    let led4 = Led4::new(&LED4_STATIC, bus, render_spawner)?;
    led4.set_brightness(DEFAULT_BRIGHTNESS);

    let time_source = RtcClock::new(Rtc::new(p.RTC, Irqs));
    let buttons = Buttons::new(Input::new(p.PIN_20, Pull::Up), Input::new(p.PIN_21, Pull::Up));
    let thermometer = InternalTemperature::new(p.ADC, p.ADC_TEMP_SENSOR);

    let clock = Clock::new(led4, time_source, buttons, thermometer, Instant::now());
    info!("starting in {:?}", clock.mode());
    let token = clock_loop(clock)?;
    spawner.spawn(token);
    Ok(())
}

#[embassy_executor::task]
async fn clock_loop(mut clock: AppClock) -> ! {
    let mut ticker = Ticker::every(SCHEDULER_TICK);
    loop {
        clock.tick(Instant::now());
        ticker.next().await;
    }
}
