//! Poll loops: sample the stick, encode, gate and push to the output.

use embedded_hal_async::delay::DelayNs;

use crate::control::RunFlag;
use crate::encoder::{AxisReport, HatReport, HidReport};
use crate::gate::{ChangeGate, KeyGate};
use crate::input::StickInput;
use crate::keyboard::{KeyEvent, KeyMap};
use crate::output::{KeySink, OutputError, ReportSink};
use crate::types::{Direction, Role};

/// Default delay between poll ticks.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1;

/// Largest report any bridge serializes.
const MAX_REPORT_SIZE: usize = 8;

/// Forwards stick changes as fixed-layout HID reports.
///
/// Each tick samples the input, looks up the direction, encodes it as `R`
/// and sends it only if it differs from the last report the output
/// accepted. When the output is not ready or the send fails, the report is
/// dropped for this tick and offered again on the next one.
pub struct ReportBridge<I, O, R> {
    input: I,
    output: O,
    gate: ChangeGate<R>,
    poll_interval_ms: u32,
}

/// Two-axis joystick bridge.
pub type StickBridge<I, O> = ReportBridge<I, O, AxisReport>;

/// Hat-switch gamepad bridge.
pub type HatBridge<I, O> = ReportBridge<I, O, HatReport>;

impl<I, O, R> ReportBridge<I, O, R>
where
    I: StickInput,
    O: ReportSink,
    R: HidReport + From<Direction>,
{
    /// Create a new bridge from a stick input and a report sink.
    pub fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            gate: ChangeGate::new(R::NEUTRAL),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Use a different delay between poll ticks.
    #[must_use]
    pub fn with_poll_interval(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    pub fn poll_interval_ms(&self) -> u32 {
        self.poll_interval_ms
    }

    /// Sample the input and encode the current report without sending it.
    pub fn encode(&mut self) -> R {
        R::from(Direction::from_raw(self.input.sample()))
    }

    /// Run one poll tick.
    ///
    /// Returns `Ok(Some(report))` if a report was sent, `Ok(None)` if the
    /// stick did not change, or the output error that dropped the report.
    pub async fn process_one(&mut self) -> Result<Option<R>, OutputError> {
        let report = self.encode();
        if !self.gate.is_changed(&report) {
            return Ok(None);
        }
        if !self.output.is_ready() {
            return Err(OutputError::NotReady);
        }

        let mut buf = [0u8; MAX_REPORT_SIZE];
        let len = report.serialize(&mut buf);
        trace!("Sending report: {:?}", &buf[..len]);
        self.output.send(&buf[..len]).await?;
        self.gate.commit(report);
        Ok(Some(report))
    }

    /// Poll until `flag` is cleared, sleeping between ticks.
    ///
    /// Marks the flag as running on entry. Output errors are logged and the
    /// loop keeps going.
    pub async fn run<D: DelayNs>(&mut self, flag: &RunFlag, delay: &mut D) {
        flag.start();
        while flag.is_running() {
            match self.process_one().await {
                Ok(_) | Err(OutputError::NotReady) => {}
                Err(e) => warn!("Report dropped: {:?}", e),
            }
            delay.delay_ms(self.poll_interval_ms).await;
        }
        debug!("Stick poll loop stopped");
    }

    /// The last report the output accepted.
    pub fn previous(&self) -> &R {
        self.gate.previous()
    }

    /// Get a reference to the stick input.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get a mutable reference to the stick input.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get a reference to the output sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Decompose the bridge into its input and output components.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

/// Forwards each stick role as an independent key press/release.
///
/// Opposite roles may be held together. A role produces exactly one press
/// when it becomes pressed and one release when it is let go.
pub struct KeyboardBridge<I, O> {
    input: I,
    output: O,
    keymap: KeyMap,
    gate: KeyGate,
    poll_interval_ms: u32,
}

impl<I: StickInput, O: KeySink> KeyboardBridge<I, O> {
    /// Create a bridge that simulates the arrow keys.
    pub fn new(input: I, output: O) -> Self {
        Self::with_keymap(input, output, KeyMap::default())
    }

    /// Create a bridge with a custom role-to-key mapping.
    pub fn with_keymap(input: I, output: O, keymap: KeyMap) -> Self {
        Self {
            input,
            output,
            keymap,
            gate: KeyGate::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Use a different delay between poll ticks.
    #[must_use]
    pub fn with_poll_interval(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Run one poll tick.
    ///
    /// Returns the number of key events delivered. If any event failed, the
    /// first error is returned and the failed roles are retried next tick.
    pub async fn process_one(&mut self) -> Result<usize, OutputError> {
        let raw = self.input.sample();
        let mut delivered = 0;
        let mut failure = None;

        for role in Role::ALL {
            let Some(pressed) = self.gate.edge(role, raw) else {
                continue;
            };
            let event = KeyEvent::for_role(&self.keymap, role, pressed);
            let result = match event {
                KeyEvent::Press(key) => self.output.press(key).await,
                KeyEvent::Release(key) => self.output.release(key).await,
            };
            match result {
                Ok(()) => {
                    trace!("Key event: {:?}", event);
                    self.gate.commit(role, pressed);
                    delivered += 1;
                }
                Err(e) => {
                    failure.get_or_insert(e);
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(delivered),
        }
    }

    /// Poll until `flag` is cleared, sleeping between ticks.
    pub async fn run<D: DelayNs>(&mut self, flag: &RunFlag, delay: &mut D) {
        flag.start();
        while flag.is_running() {
            match self.process_one().await {
                Ok(_) | Err(OutputError::NotReady) => {}
                Err(e) => warn!("Key event dropped: {:?}", e),
            }
            delay.delay_ms(self.poll_interval_ms).await;
        }
        debug!("Keyboard poll loop stopped");
    }

    /// Check whether the key for `role` is held down on the host.
    pub fn is_held(&self, role: Role) -> bool {
        self.gate.is_held(role)
    }

    /// Get a reference to the stick input.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get a mutable reference to the stick input.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get a reference to the output sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Decompose the bridge into its input and output components.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::keyboard::KeyboardOutput;
    use crate::types::RawState;
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use std::sync::{Arc, Mutex};
    use std::vec;
    use std::vec::Vec;

    const L: RawState = RawState::new(true, false, false, false);
    const U: RawState = RawState::new(false, false, true, false);
    const UL: RawState = RawState::new(true, false, true, false);
    const C: RawState = RawState::RELEASED;

    // Replays a fixed sequence of snapshots, then holds the last one.
    struct ScriptedInput {
        states: Vec<RawState>,
        index: usize,
    }

    impl ScriptedInput {
        fn new(states: Vec<RawState>) -> Self {
            Self { states, index: 0 }
        }
    }

    impl StickInput for ScriptedInput {
        fn sample(&mut self) -> RawState {
            let state = self
                .states
                .get(self.index)
                .or(self.states.last())
                .copied()
                .unwrap_or(RawState::RELEASED);
            self.index += 1;
            state
        }
    }

    // Records every report; can be made unready or failing.
    struct MockOutput {
        sent: Arc<Mutex<Vec<Vec<u8>>>>,
        ready: bool,
        fail_next: usize,
    }

    impl MockOutput {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                ready: true,
                fail_next: 0,
            }
        }
    }

    impl ReportSink for MockOutput {
        fn send(&mut self, report: &[u8]) -> impl Future<Output = Result<(), OutputError>> {
            let result = if self.fail_next > 0 {
                self.fail_next -= 1;
                Err(OutputError::Io)
            } else {
                self.sent.lock().unwrap().push(report.to_vec());
                Ok(())
            };
            core::future::ready(result)
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    // Records key events.
    struct MockKeys {
        events: Vec<KeyEvent>,
        fail_next: usize,
    }

    impl KeySink for MockKeys {
        fn press(&mut self, key: u8) -> impl Future<Output = Result<(), OutputError>> {
            core::future::ready(self.record(KeyEvent::Press(key)))
        }

        fn release(&mut self, key: u8) -> impl Future<Output = Result<(), OutputError>> {
            core::future::ready(self.record(KeyEvent::Release(key)))
        }
    }

    impl MockKeys {
        fn new() -> Self {
            Self {
                events: Vec::new(),
                fail_next: 0,
            }
        }

        fn record(&mut self, event: KeyEvent) -> Result<(), OutputError> {
            if self.fail_next > 0 {
                self.fail_next -= 1;
                return Err(OutputError::Busy);
            }
            self.events.push(event);
            Ok(())
        }
    }

    // Counts sleeps and clears the run flag after a fixed number of ticks.
    struct StopAfter<'a> {
        flag: &'a RunFlag,
        remaining: usize,
        slept_ms: Vec<u32>,
    }

    impl DelayNs for StopAfter<'_> {
        async fn delay_ns(&mut self, _ns: u32) {}

        async fn delay_ms(&mut self, ms: u32) {
            self.slept_ms.push(ms);
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.flag.stop();
            }
        }
    }

    // Helper to run a future to completion (simple blocking executor)
    fn block_on<F: Future>(mut f: F) -> F::Output {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);

        // SAFETY: We don't move f after pinning
        let mut f = unsafe { Pin::new_unchecked(&mut f) };

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {
                    panic!("Mock future returned Pending unexpectedly");
                }
            }
        }
    }

    #[test]
    fn test_stick_emits_once_per_change() {
        let input = ScriptedInput::new(vec![C, C, L, L, L, C, C, UL, UL]);
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();
        let mut bridge = StickBridge::new(input, output);

        let emitted: Vec<_> = (0..9).map(|_| block_on(bridge.process_one()).unwrap()).collect();
        assert_eq!(
            emitted,
            vec![
                None,
                None,
                Some(AxisReport::new(-1, 0)),
                None,
                None,
                Some(AxisReport::new(0, 0)),
                None,
                Some(AxisReport::new(-1, 1)),
                None,
            ]
        );

        let sent = sent_ref.lock().unwrap();
        assert_eq!(*sent, vec![vec![0xFF, 0x00], vec![0x00, 0x00], vec![0xFF, 0x01]]);
    }

    #[test]
    fn test_stick_steady_input_never_resends() {
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();
        let mut bridge = StickBridge::new(U, output);

        for _ in 0..100 {
            let _ = block_on(bridge.process_one());
        }
        assert_eq!(*sent_ref.lock().unwrap(), vec![vec![0x00, 0x01]]);
        assert_eq!(bridge.previous(), &AxisReport::new(0, 1));
    }

    #[test]
    fn test_not_ready_report_is_retried() {
        let mut output = MockOutput::new();
        output.ready = false;
        let sent_ref = output.sent.clone();
        let mut bridge = StickBridge::new(L, output);

        assert_eq!(block_on(bridge.process_one()), Err(OutputError::NotReady));
        assert_eq!(bridge.previous(), &AxisReport::NEUTRAL);

        bridge.output_mut().ready = true;
        assert_eq!(block_on(bridge.process_one()), Ok(Some(AxisReport::new(-1, 0))));
        assert_eq!(*sent_ref.lock().unwrap(), vec![vec![0xFF, 0x00]]);
    }

    #[test]
    fn test_failed_send_is_retried() {
        let mut output = MockOutput::new();
        output.fail_next = 1;
        let mut bridge = HatBridge::new(UL, output);

        assert_eq!(block_on(bridge.process_one()), Err(OutputError::Io));
        assert_eq!(block_on(bridge.process_one()), Ok(Some(HatReport(5))));
        assert_eq!(block_on(bridge.process_one()), Ok(None));
    }

    #[test]
    fn test_hat_bridge_sends_codes() {
        let input = ScriptedInput::new(vec![U, UL, L, C]);
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();
        let mut bridge = HatBridge::new(input, output);

        for _ in 0..4 {
            block_on(bridge.process_one()).unwrap();
        }
        assert_eq!(*sent_ref.lock().unwrap(), vec![vec![1], vec![5], vec![4], vec![0]]);
    }

    #[test]
    fn test_run_until_stopped() {
        let flag = RunFlag::new();
        let input = ScriptedInput::new(vec![C, L, L, C, C]);
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();
        let mut bridge = StickBridge::new(input, output).with_poll_interval(10);
        let mut delay = StopAfter {
            flag: &flag,
            remaining: 5,
            slept_ms: Vec::new(),
        };

        block_on(bridge.run(&flag, &mut delay));

        assert!(!flag.is_running());
        assert_eq!(delay.slept_ms, vec![10; 5]);
        assert_eq!(sent_ref.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_keyboard_press_release_once() {
        let input = ScriptedInput::new(vec![C, U, U, U, C, C]);
        let mut bridge = KeyboardBridge::new(input, MockKeys::new());

        let delivered: Vec<_> = (0..6).map(|_| block_on(bridge.process_one()).unwrap()).collect();
        assert_eq!(delivered, vec![0, 1, 0, 0, 1, 0]);
        assert_eq!(
            bridge.output().events,
            vec![KeyEvent::Press(0x52), KeyEvent::Release(0x52)]
        );
    }

    #[test]
    fn test_keyboard_opposite_roles_both_held() {
        let both = RawState::new(true, true, false, false);
        let keymap = KeyMap::new(0x04, 0x07, 0x1A, 0x16);
        let mut bridge = KeyboardBridge::with_keymap(both, MockKeys::new(), keymap);

        assert_eq!(block_on(bridge.process_one()), Ok(2));
        assert!(bridge.is_held(Role::Left));
        assert!(bridge.is_held(Role::Right));
        assert_eq!(
            bridge.output().events,
            vec![KeyEvent::Press(0x04), KeyEvent::Press(0x07)]
        );
    }

    #[test]
    fn test_keyboard_failed_event_is_retried() {
        let mut keys = MockKeys::new();
        keys.fail_next = 1;
        let mut bridge = KeyboardBridge::new(U, keys);

        assert_eq!(block_on(bridge.process_one()), Err(OutputError::Busy));
        assert!(!bridge.is_held(Role::Up));
        assert_eq!(block_on(bridge.process_one()), Ok(1));
        assert_eq!(bridge.output().events, vec![KeyEvent::Press(0x52)]);
    }

    #[test]
    fn test_keyboard_over_report_sink() {
        let input = ScriptedInput::new(vec![U, UL, L, C]);
        let output = MockOutput::new();
        let sent_ref = output.sent.clone();
        let mut bridge = KeyboardBridge::new(input, KeyboardOutput::new(output));

        for _ in 0..4 {
            block_on(bridge.process_one()).unwrap();
        }

        let sent = sent_ref.lock().unwrap();
        assert_eq!(
            *sent,
            vec![
                vec![0, 0, 0x52, 0, 0, 0, 0, 0],
                vec![0, 0, 0x52, 0x50, 0, 0, 0, 0],
                vec![0, 0, 0, 0x50, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
            ]
        );
    }
}
