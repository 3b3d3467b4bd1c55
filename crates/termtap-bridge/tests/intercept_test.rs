//! Integration tests for the I/O tap against a mock terminal engine.

use std::sync::{Arc, Mutex};

use proptest::prelude::*;

use termtap_bridge::{InputTap, OutputTap, TapObserver, TapSlot};
use termtap_core::{EventKind, TapEvent};

/// Stand-in for the terminal engine's data path: a render queue fed after
/// output processing and a transmission sink fed after the input tap.
struct MockEngine {
    output_tap: OutputTap,
    input_tap: InputTap,
    rendered: Vec<u8>,
    transmitted: Vec<u8>,
}

impl MockEngine {
    fn new(slot: TapSlot) -> Self {
        Self {
            output_tap: OutputTap::new(slot.clone()),
            input_tap: InputTap::new(slot),
            rendered: Vec::new(),
            transmitted: Vec::new(),
        }
    }

    /// Remote output arrives: process (render) first, then fire the tap.
    fn feed_output(&mut self, data: &[u8]) {
        self.rendered.extend_from_slice(data);
        self.output_tap.data_processed(data);
    }

    /// User input arrives: fire the tap first, then transmit.
    fn feed_input(&mut self, data: &[u8]) {
        self.input_tap.before_send(data);
        self.transmitted.extend_from_slice(data);
    }
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<(EventKind, Vec<u8>)>>,
}

impl Recorder {
    fn recorded(&self) -> Vec<(EventKind, Vec<u8>)> {
        self.events.lock().unwrap().clone()
    }
}

impl TapObserver for Recorder {
    fn on_event(&self, event: &TapEvent<'_>) {
        self.events
            .lock()
            .unwrap()
            .push((event.kind, event.data.to_vec()));
    }
}

#[test]
fn test_output_chunks_arrive_in_order_and_byte_exact() {
    let slot = TapSlot::new();
    let recorder = Arc::new(Recorder::default());
    slot.register(recorder.clone());

    let mut engine = MockEngine::new(slot);
    let chunk_a = vec![0xaau8; 2048];
    let chunk_b = vec![0xbbu8; 2048];
    engine.feed_output(&chunk_a);
    engine.feed_output(&chunk_b);

    let events = recorder.recorded();
    assert_eq!(events.len(), 2, "exactly one event per chunk");
    assert_eq!(events[0], (EventKind::Output, chunk_a));
    assert_eq!(events[1], (EventKind::Output, chunk_b));
    assert_eq!(
        events.iter().map(|(_, d)| d.len()).sum::<usize>(),
        4096,
        "no truncation, no duplication"
    );
    assert_eq!(engine.rendered.len(), 4096, "rendering unaffected");
}

#[test]
fn test_input_observed_before_transmission() {
    struct SinkChecker {
        transmitted_at_callback: Mutex<Option<usize>>,
        sink: Arc<Mutex<Vec<u8>>>,
    }

    impl TapObserver for SinkChecker {
        fn on_event(&self, event: &TapEvent<'_>) {
            assert_eq!(event.kind, EventKind::Input);
            assert_eq!(event.data, b"ls -la\n");
            // Record how much the sink had already seen at callback time
            *self.transmitted_at_callback.lock().unwrap() =
                Some(self.sink.lock().unwrap().len());
        }
    }

    let sink = Arc::new(Mutex::new(Vec::new()));
    let checker = Arc::new(SinkChecker {
        transmitted_at_callback: Mutex::new(None),
        sink: sink.clone(),
    });

    let slot = TapSlot::new();
    slot.register(checker.clone());

    let input_tap = InputTap::new(slot);
    let line = b"ls -la\n";
    input_tap.before_send(line);
    sink.lock().unwrap().extend_from_slice(line);

    assert_eq!(
        *checker.transmitted_at_callback.lock().unwrap(),
        Some(0),
        "callback must run before the bytes reach the transmission sink"
    );
    assert_eq!(sink.lock().unwrap().as_slice(), line);
}

#[test]
fn test_no_observer_leaves_engine_behavior_unchanged() {
    let slot = TapSlot::new();
    let mut engine = MockEngine::new(slot);

    engine.feed_output(b"remote says hi\r\n");
    engine.feed_input(b"echo ok\n");

    assert_eq!(engine.rendered, b"remote says hi\r\n");
    assert_eq!(engine.transmitted, b"echo ok\n");
}

#[test]
fn test_unregister_mid_session() {
    let slot = TapSlot::new();
    let recorder = Arc::new(Recorder::default());
    slot.register(recorder.clone());

    let mut engine = MockEngine::new(slot.clone());
    engine.feed_output(b"before");
    slot.unregister();
    engine.feed_output(b"after");
    engine.feed_input(b"after too");

    let events = recorder.recorded();
    assert_eq!(events, vec![(EventKind::Output, b"before".to_vec())]);
    // Engine path still ran normally
    assert_eq!(engine.rendered, b"beforeafter");
    assert_eq!(engine.transmitted, b"after too");
}

#[test]
fn test_panicking_observer_does_not_disturb_engine() {
    struct Panicker;
    impl TapObserver for Panicker {
        fn on_event(&self, _event: &TapEvent<'_>) {
            panic!("buggy observer");
        }
    }

    let slot = TapSlot::new();
    slot.register(Arc::new(Panicker));

    let mut engine = MockEngine::new(slot);
    engine.feed_output(b"rendered anyway");
    engine.feed_input(b"sent anyway");

    assert_eq!(engine.rendered, b"rendered anyway");
    assert_eq!(engine.transmitted, b"sent anyway");
}

proptest! {
    /// For any interleaving of output and input runs, a registered
    /// observer sees them in exactly engine order with byte-exact content.
    #[test]
    fn prop_observer_sees_engine_order(
        runs in prop::collection::vec(
            (any::<bool>(), prop::collection::vec(any::<u8>(), 0..256)),
            0..64,
        )
    ) {
        let slot = TapSlot::new();
        let recorder = Arc::new(Recorder::default());
        slot.register(recorder.clone());

        let mut engine = MockEngine::new(slot);
        let mut expected = Vec::new();
        for (is_input, bytes) in &runs {
            if *is_input {
                engine.feed_input(bytes);
                expected.push((EventKind::Input, bytes.clone()));
            } else {
                engine.feed_output(bytes);
                expected.push((EventKind::Output, bytes.clone()));
            }
        }

        prop_assert_eq!(recorder.recorded(), expected);
    }
}
