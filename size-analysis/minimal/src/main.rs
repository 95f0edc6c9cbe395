#![no_std]
#![no_main]

use core::sync::atomic::{AtomicU32, Ordering};
use lap_beam::config::MinimalConfig;
use lap_beam::{
    FnClock, LapTimer, Sensor, SensorChannel, SensorReading, TimerConfig, render_lap,
};
use panic_halt as _;

// Millisecond counter bumped by SysTick (single writer)
static MILLIS: AtomicU32 = AtomicU32::new(0);

fn millis() -> u32 {
    MILLIS.load(Ordering::Relaxed)
}

// Minimal channel set
#[derive(Debug, Copy, Clone, PartialEq, Eq, SensorChannel)]
pub enum Beam {
    Start = 0,
}

// Minimal sensor implementation - measures only struct size
pub struct MinimalSensor;

impl Sensor for MinimalSensor {
    type Channel = Beam;
    type Error = ();

    fn read(&mut self, _channel: Beam) -> Result<SensorReading, Self::Error> {
        Ok(core::hint::black_box(150))
    }
}

// Entry point
#[cortex_m_rt::entry]
fn main() -> ! {
    let clock = FnClock(millis);

    let Ok(timer) = LapTimer::<_, _, MinimalConfig, { MinimalConfig::HISTORY_SIZE }>::new(
        MinimalSensor,
        clock,
    ) else {
        loop {
            cortex_m::asm::nop();
        }
    };
    let mut timer = timer.min_lap(1_000);
    timer.start();

    loop {
        // Poll and render to ensure evaluator and formatter code is included
        // Use black_box to prevent optimizer from removing the code
        let _ = core::hint::black_box(timer.poll(Beam::Start.id()));
        let top = render_lap::<{ MinimalConfig::LINE_WIDTH }>("P1", Some(timer.times().current_lap));
        let bottom = render_lap::<{ MinimalConfig::LINE_WIDTH }>("Best", timer.best_lap());
        let _ = core::hint::black_box((top, bottom));
        cortex_m::asm::nop();
    }
}

#[cortex_m_rt::exception]
fn SysTick() {
    MILLIS.store(millis().wrapping_add(1), Ordering::Relaxed);
}

// Required: exception handler
#[cortex_m_rt::exception]
unsafe fn HardFault(_ef: &cortex_m_rt::ExceptionFrame) -> ! {
    loop {
        cortex_m::asm::nop();
    }
}
