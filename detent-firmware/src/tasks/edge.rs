//! Edge capture task
//!
//! One instance per encoder pin, spawned on the interrupt executor so it
//! runs as soon as the GPIO interrupt wakes it, ahead of the polling
//! loop. Waits for any edge, then records the new level and the capture
//! time into the global edge queue.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use detent_core::{EdgeMask, GpioPin};

use crate::channels::record_edge;

/// Edge capture task, one per encoder pin
#[embassy_executor::task(pool_size = 2)]
pub async fn edge_capture_task(mut input: Input<'static>, pin: GpioPin) {
    info!("Edge capture started on GPIO{}", pin);

    loop {
        input.wait_for_any_edge().await;
        let captured_at = Instant::now().as_micros();
        let mask = EdgeMask::from_level(input.is_high());
        trace!("GPIO{} edge {:#x} at {}us", pin, mask.bits(), captured_at);
        record_edge(pin, mask, captured_at);
    }
}
