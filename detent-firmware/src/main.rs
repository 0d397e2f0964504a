//! Detent - Rotary Encoder Firmware
//!
//! Decodes a mechanical quadrature rotary encoder on an RP2040 and logs
//! each confirmed detent over defmt.
//!
//! Edge capture tasks run on an interrupt executor, so each edge is
//! timestamped and queued in interrupt context, preempting the decoder.
//! The main task runs the polling loop on the thread-mode executor,
//! dispatching queued edges and driving each encoder's state machine.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use detent_core::{Decoder, GpioPin};

use crate::pins::SioPins;
use crate::sink::LogSink;

mod channels;
mod pins;
mod sink;
mod tasks;

/// Encoder contact wired to GPIO0
const ENCODER_LEFT_PIN: GpioPin = 0;

/// Encoder contact wired to GPIO1
const ENCODER_RIGHT_PIN: GpioPin = 1;

/// Runs the edge capture tasks above thread mode
static EDGE_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EDGE_EXECUTOR.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Detent firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Contacts pull to ground when closed
    let left = Input::new(p.PIN_0, Pull::Up);
    let right = Input::new(p.PIN_1, Pull::Up);

    // Let the pull-ups settle before seeding encoder state from the pins
    Timer::after_millis(10).await;

    let mut decoder = Decoder::new();
    let id = match decoder.register(ENCODER_LEFT_PIN, ENCODER_RIGHT_PIN, &SioPins) {
        Ok(id) => id,
        Err(e) => defmt::panic!("Failed to register rotary encoder: {}", e),
    };
    if let Some(encoder) = decoder.encoder(id) {
        info!(
            "Encoder {} on GPIO{}/GPIO{}, initial state {}",
            id.index(),
            encoder.left_pin(),
            encoder.right_pin(),
            encoder.state()
        );
    }

    // Edge capture preempts the polling loop
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let edge_spawner = EDGE_EXECUTOR.start(interrupt::SWI_IRQ_1);
    edge_spawner
        .spawn(tasks::edge_capture_task(left, ENCODER_LEFT_PIN))
        .unwrap();
    edge_spawner
        .spawn(tasks::edge_capture_task(right, ENCODER_RIGHT_PIN))
        .unwrap();

    info!("Ready!");

    let mut sink = LogSink;
    loop {
        let stats = decoder.drain(channels::next_edge, &SioPins, &mut sink);
        let resyncs = stats.resyncs + decoder.run_encoder_tasks(&SioPins, &mut sink);
        let events = stats.events;

        if resyncs > 0 {
            warn!("Resynchronized {} encoder(s) after an invalid edge", resyncs);
        }
        if events > 0 {
            trace!("Dispatched {} edges", events);
        }

        embassy_futures::yield_now().await;
    }
}
