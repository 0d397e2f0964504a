//! End-to-end decoding scenarios through the shared edge queue

use std::cell::Cell;

use detent_core::config::{DEBOUNCE_DEPTH, ENCODER_EVENT_BUFFER_LEN, EVENT_QUEUE_CAPACITY};
use detent_core::{
    record, Decoder, EdgeEvent, EdgeMask, EncoderPhase, EventQueue, GpioPin, MechanicalState,
    Micros, PinLevels, PollStats, RegistrationError, Rotation, RotationSink,
};

/// Simulated GPIO bank, levels as a bitmask of high pins
#[derive(Default)]
struct Bank(Cell<u32>);

impl Bank {
    fn set(&self, pin: GpioPin, high: bool) {
        let bits = self.0.get();
        self.0.set(if high { bits | (1 << pin) } else { bits & !(1 << pin) });
    }
}

impl PinLevels for Bank {
    fn is_high(&self, pin: GpioPin) -> bool {
        self.0.get() & (1 << pin) != 0
    }
}

#[derive(Default)]
struct Collect(Vec<Rotation>);

impl RotationSink for Collect {
    fn emit(&mut self, rotation: Rotation) {
        self.0.push(rotation);
    }
}

struct Rig {
    bank: Bank,
    queue: EventQueue<EdgeEvent, EVENT_QUEUE_CAPACITY>,
    decoder: Decoder,
    sink: Collect,
}

impl Rig {
    fn new() -> Self {
        Self {
            bank: Bank::default(),
            queue: EventQueue::new(),
            decoder: Decoder::new(),
            sink: Collect::default(),
        }
    }

    /// Drive a pin and record the edge the way interrupt context would
    fn edge(&mut self, pin: GpioPin, high: bool, at: Micros) {
        self.bank.set(pin, high);
        record(&mut self.queue, pin, EdgeMask::from_level(high), at);
    }

    fn poll(&mut self) -> PollStats {
        self.decoder.poll(&mut self.queue, &self.bank, &mut self.sink)
    }
}

#[test]
fn alternation_reports_only_after_consensus() {
    let mut rig = Rig::new();
    let id = rig.decoder.register(0, 1, &rig.bank).unwrap();

    // Right contact toggles every 10 ms: left, right, left, right candidates
    for i in 0..4u64 {
        rig.edge(1, i % 2 == 0, i * 10_000);
    }
    let stats = rig.poll();
    assert_eq!(stats, PollStats { events: 4, resyncs: 0 });
    assert!(rig.sink.0.is_empty());

    rig.edge(1, true, 40_000);
    rig.poll();
    assert_eq!(rig.sink.0, vec![Rotation::RotateLeft]);

    let encoder = rig.decoder.encoder(id).unwrap();
    assert_eq!(encoder.state(), MechanicalState::RightUp);
    assert_eq!(encoder.transition_count(Rotation::RotateLeft), 3);
    assert_eq!(encoder.transition_count(Rotation::RotateRight), 2);
}

#[test]
fn full_rotation_through_queue() {
    let mut rig = Rig::new();
    rig.decoder.register(0, 1, &rig.bank).unwrap();

    // Left leads right: three right transitions per detent cycle
    let mut now = 0;
    for _ in 0..3 {
        for (pin, high) in [(0, true), (1, true), (0, false), (1, false)] {
            now += 12_000;
            rig.edge(pin, high, now);
        }
        rig.poll();
    }

    assert_eq!(rig.sink.0.len(), 7);
    assert!(rig.sink.0.iter().all(|&r| r == Rotation::RotateRight));
}

#[test]
fn contact_bounce_is_absorbed() {
    let mut rig = Rig::new();
    let id = rig.decoder.register(0, 1, &rig.bank).unwrap();

    rig.edge(1, true, 100_000);
    rig.poll();
    let before = rig.decoder.encoder(id).unwrap().transition_count(Rotation::RotateRight);

    // Contact chatters back down 50 µs later
    rig.edge(1, false, 100_050);
    rig.poll();

    let encoder = rig.decoder.encoder(id).unwrap();
    assert_eq!(encoder.state(), MechanicalState::BothDown);
    assert_eq!(encoder.transition_count(Rotation::RotateRight), before);
    assert!(rig.sink.0.is_empty());
}

#[test]
fn invalid_edge_flushes_and_rereads_pins() {
    let mut rig = Rig::new();
    let id = rig.decoder.register(0, 1, &rig.bank).unwrap();

    // A lost falling edge: right rises twice in the record
    rig.edge(1, true, 0);
    record(&mut rig.queue, 1, EdgeMask::RISE, 10_000);
    // Buffered after the fault, must be discarded
    rig.edge(0, true, 20_000);

    let stats = rig.poll();
    assert_eq!(stats, PollStats { events: 3, resyncs: 1 });

    let encoder = rig.decoder.encoder(id).unwrap();
    assert_eq!(encoder.pending_events(), 0);
    // Re-read from the pins, which now have both contacts up
    assert_eq!(encoder.state(), MechanicalState::BothUp);
    assert_eq!(encoder.phase(), EncoderPhase::Resynchronizing);
    assert_eq!(encoder.transition_count(Rotation::RotateRight), 0);

    // First valid edge afterwards is committed but not counted
    rig.edge(0, false, 60_000);
    rig.poll();
    let encoder = rig.decoder.encoder(id).unwrap();
    assert_eq!(encoder.state(), MechanicalState::RightUp);
    assert_eq!(encoder.phase(), EncoderPhase::Operating);
    assert_eq!(encoder.transition_count(Rotation::RotateRight), 0);

    rig.edge(1, false, 80_000);
    rig.poll();
    let encoder = rig.decoder.encoder(id).unwrap();
    assert_eq!(encoder.transition_count(Rotation::RotateRight), 1);
}

#[test]
fn fault_on_one_encoder_leaves_the_other() {
    let mut rig = Rig::new();
    let first = rig.decoder.register(0, 1, &rig.bank).unwrap();
    let second = rig.decoder.register(6, 7, &rig.bank).unwrap();

    rig.edge(7, true, 0);
    record(&mut rig.queue, 1, EdgeMask::FALL, 1_000); // impossible from BothDown
    rig.edge(6, true, 20_000);

    let stats = rig.poll();
    assert_eq!(stats.resyncs, 1);

    let healthy = rig.decoder.encoder(second).unwrap();
    assert_eq!(healthy.state(), MechanicalState::BothUp);
    assert_eq!(healthy.transition_count(Rotation::RotateLeft), 2);
    assert_eq!(
        rig.decoder.encoder(first).unwrap().phase(),
        EncoderPhase::Resynchronizing
    );
}

#[test]
fn burst_larger_than_pending_queue_decodes_in_one_poll() {
    let mut rig = Rig::new();
    let id = rig.decoder.register(0, 1, &rig.bank).unwrap();

    // Well past one encoder's pending queue, well within the shared queue
    let edges = ENCODER_EVENT_BUFFER_LEN as u64 + 44;
    for i in 0..edges {
        rig.edge(1, i % 2 == 0, i * 10_000);
    }

    let stats = rig.poll();
    assert_eq!(stats, PollStats { events: edges as usize, resyncs: 0 });

    let encoder = rig.decoder.encoder(id).unwrap();
    assert_eq!(encoder.pending_events(), 0);
    assert_eq!(encoder.state(), MechanicalState::BothDown);
    assert_eq!(
        encoder.transition_count(Rotation::RotateLeft)
            + encoder.transition_count(Rotation::RotateRight),
        DEBOUNCE_DEPTH as u8
    );
}

#[test]
fn dual_edge_mask_is_ignored() {
    let mut rig = Rig::new();
    let id = rig.decoder.register(0, 1, &rig.bank).unwrap();

    record(&mut rig.queue, 0, EdgeMask::BOTH, 0);
    let stats = rig.poll();

    assert_eq!(stats, PollStats { events: 1, resyncs: 0 });
    let encoder = rig.decoder.encoder(id).unwrap();
    assert_eq!(encoder.state(), MechanicalState::BothDown);
    assert_eq!(encoder.phase(), EncoderPhase::Operating);
}

#[test]
fn second_owner_of_a_pin_is_refused() {
    let mut rig = Rig::new();
    let first = rig.decoder.register(2, 3, &rig.bank).unwrap();

    assert_eq!(
        rig.decoder.register(3, 4, &rig.bank),
        Err(RegistrationError::PinInUse)
    );
    assert_eq!(rig.decoder.owner_of(2), Some(first));
    assert_eq!(rig.decoder.owner_of(3), Some(first));
    assert_eq!(rig.decoder.owner_of(4), None);

    // First registration still decodes
    rig.edge(3, true, 0);
    rig.poll();
    assert_eq!(
        rig.decoder.encoder(first).unwrap().transition_count(Rotation::RotateLeft),
        1
    );
}

#[test]
fn registration_seeds_from_pins() {
    let mut rig = Rig::new();
    rig.bank.set(0, true);
    let id = rig.decoder.register(0, 1, &rig.bank).unwrap();
    assert_eq!(
        rig.decoder.encoder(id).unwrap().state(),
        MechanicalState::LeftUp
    );
}

#[test]
#[should_panic(expected = "edge event queue overflowed")]
fn queue_overflow_halts() {
    let mut rig = Rig::new();
    rig.decoder.register(0, 1, &rig.bank).unwrap();
    for i in 0..=EVENT_QUEUE_CAPACITY as u64 {
        record(&mut rig.queue, 0, EdgeMask::RISE, i);
    }
}
