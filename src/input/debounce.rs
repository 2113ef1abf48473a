//! Press/release debouncing over bursty terminal input.
//!
//! Terminals only report that a key produced bytes, never that it was
//! released, and a held key repeats at an irregular rate. Each poll stamps
//! every key seen with the current time. A key is released once its stamp
//! is older than the smoothing window, and pressed when it gains a stamp
//! it did not have on the previous cycle.

use super::keys::{key_name, KeyCode, KEY_NONE};
use super::source::KeySource;
use crate::config::RenderConfig;
use crate::error::BackendError;

/// Upper bound on events in one cycle: one per key code plus a terminator.
pub const EVENT_QUEUE_LEN: usize = 257;

/// A single press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecord {
    pub key: KeyCode,
    pub pressed: bool,
}

impl EventRecord {
    pub fn press(key: KeyCode) -> Self {
        Self { key, pressed: true }
    }

    pub fn release(key: KeyCode) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

/// Events produced by one debounce cycle, in ascending key-code order.
///
/// Rebuilt from scratch every cycle. Consumers drain it front to back with
/// [`pop`](Self::pop); `None` plays the role of the terminator.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<EventRecord>,
    next: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(EVENT_QUEUE_LEN),
            next: 0,
        }
    }

    fn reset(&mut self) {
        self.events.clear();
        self.next = 0;
    }

    fn push(&mut self, event: EventRecord) {
        debug_assert!(self.events.len() < EVENT_QUEUE_LEN - 1);
        self.events.push(event);
    }

    /// Take the next undrained event.
    pub fn pop(&mut self) -> Option<EventRecord> {
        let event = self.events.get(self.next).copied()?;
        self.next += 1;
        Some(event)
    }

    /// Events not yet drained.
    pub fn remaining(&self) -> &[EventRecord] {
        &self.events[self.next..]
    }

    pub fn len(&self) -> usize {
        self.remaining().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Iterator for EventQueue {
    type Item = EventRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.pop()
    }
}

/// Per-key "last seen" timestamps in milliseconds. `None` means the key is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTimestampTable {
    slots: [Option<u64>; 256],
}

impl Default for KeyTimestampTable {
    fn default() -> Self {
        Self { slots: [None; 256] }
    }
}

impl KeyTimestampTable {
    pub fn get(&self, key: KeyCode) -> Option<u64> {
        self.slots[key as usize]
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.get(key).is_some()
    }

    fn stamp(&mut self, key: KeyCode, now: u64) {
        self.slots[key as usize] = Some(now);
    }

    fn clear(&mut self, key: KeyCode) {
        self.slots[key as usize] = None;
    }

    /// Key codes currently held down, ascending.
    pub fn down_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        (1..=255u8).filter(|&key| self.is_down(key))
    }
}

/// Turns per-poll key sightings into press/release events.
#[derive(Debug)]
pub struct InputDebouncer {
    timestamps: KeyTimestampTable,
    smoothing_ms: u64,
    queue: EventQueue,
    seen: Vec<KeyCode>,
}

impl InputDebouncer {
    /// Create a debouncer that releases keys not seen for more than
    /// `smoothing_ms` milliseconds.
    pub fn new(smoothing_ms: u32) -> Self {
        Self {
            timestamps: KeyTimestampTable::default(),
            smoothing_ms: smoothing_ms as u64,
            queue: EventQueue::new(),
            seen: Vec::new(),
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.keypress_smoothing_ms)
    }

    pub fn smoothing_ms(&self) -> u64 {
        self.smoothing_ms
    }

    pub fn timestamps(&self) -> &KeyTimestampTable {
        &self.timestamps
    }

    /// Run one cycle: read whatever `source` has, then age every key.
    ///
    /// # Errors
    /// Propagates a failing read from the source. The timestamp table is
    /// left untouched in that case.
    pub fn poll<S: KeySource + ?Sized>(
        &mut self,
        source: &mut S,
        now_ms: u64,
    ) -> Result<&mut EventQueue, BackendError> {
        let mut seen = std::mem::take(&mut self.seen);
        seen.clear();
        let polled = source.poll_keys(&mut seen);
        if polled.is_ok() {
            self.update(&seen, now_ms);
        }
        self.seen = seen;
        polled.map(|()| &mut self.queue)
    }

    /// Run one cycle over an already-decoded set of keys.
    pub fn update(&mut self, keys: &[KeyCode], now_ms: u64) -> &mut EventQueue {
        let previous = self.timestamps.clone();
        for &key in keys {
            if key != KEY_NONE {
                self.timestamps.stamp(key, now_ms);
            }
        }

        self.queue.reset();
        for key in 1..=255u8 {
            let Some(stamp) = self.timestamps.get(key) else {
                continue;
            };

            if now_ms.saturating_sub(stamp) > self.smoothing_ms {
                self.timestamps.clear(key);
                log::debug!("key {} released", key_name(key));
                self.queue.push(EventRecord::release(key));
            } else if !previous.is_down(key) {
                log::debug!("key {} pressed", key_name(key));
                self.queue.push(EventRecord::press(key));
            }
        }

        &mut self.queue
    }

    /// Drain one event from the most recent cycle.
    pub fn next_event(&mut self) -> Option<EventRecord> {
        self.queue.pop()
    }

    /// Events left over from the most recent cycle.
    pub fn pending(&self) -> &[EventRecord] {
        self.queue.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::*;

    #[test]
    fn test_first_sighting_is_press() {
        let mut debouncer = InputDebouncer::new(42);
        let events: Vec<_> = debouncer.update(&[b'w'], 0).collect();
        assert_eq!(events, vec![EventRecord::press(b'w')]);
    }

    #[test]
    fn test_held_key_not_repressed() {
        let mut debouncer = InputDebouncer::new(42);
        debouncer.update(&[b'w'], 0);
        assert!(debouncer.update(&[b'w'], 20).is_empty());
        assert!(debouncer.update(&[b'w'], 40).is_empty());
        assert!(debouncer.timestamps().is_down(b'w'));
    }

    #[test]
    fn test_release_boundary() {
        let mut debouncer = InputDebouncer::new(42);
        debouncer.update(&[b'w'], 0);
        assert!(debouncer.update(&[], 41).is_empty());
        assert!(debouncer.update(&[], 42).is_empty());
        let events: Vec<_> = debouncer.update(&[], 43).collect();
        assert_eq!(events, vec![EventRecord::release(b'w')]);
        assert!(!debouncer.timestamps().is_down(b'w'));
    }

    #[test]
    fn test_refresh_extends_hold() {
        let mut debouncer = InputDebouncer::new(42);
        debouncer.update(&[b'a'], 0);
        debouncer.update(&[b'a'], 30);
        assert!(debouncer.update(&[], 60).is_empty());
        let events: Vec<_> = debouncer.update(&[], 73).collect();
        assert_eq!(events, vec![EventRecord::release(b'a')]);
    }

    #[test]
    fn test_events_in_ascending_key_order() {
        let mut debouncer = InputDebouncer::new(42);
        let events: Vec<_> = debouncer
            .update(&[KEY_UPARROW, b'z', b'a', KEY_ENTER], 0)
            .collect();
        let keys: Vec<_> = events.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![KEY_ENTER, b'a', b'z', KEY_UPARROW]);
        assert!(events.iter().all(|e| e.pressed));
    }

    #[test]
    fn test_duplicate_keys_in_cycle_single_event() {
        let mut debouncer = InputDebouncer::new(42);
        let events: Vec<_> = debouncer.update(&[b'd', b'd', b'd'], 0).collect();
        assert_eq!(events, vec![EventRecord::press(b'd')]);
    }

    #[test]
    fn test_mixed_press_and_release_same_cycle() {
        let mut debouncer = InputDebouncer::new(42);
        debouncer.update(&[b'w'], 0);
        let events: Vec<_> = debouncer.update(&[b'a'], 100).collect();
        assert_eq!(
            events,
            vec![EventRecord::press(b'a'), EventRecord::release(b'w')]
        );
    }

    #[test]
    fn test_repress_after_release() {
        let mut debouncer = InputDebouncer::new(42);
        debouncer.update(&[b'w'], 0);
        debouncer.update(&[], 50);
        let events: Vec<_> = debouncer.update(&[b'w'], 60).collect();
        assert_eq!(events, vec![EventRecord::press(b'w')]);
    }

    #[test]
    fn test_no_key_code_ignored() {
        let mut debouncer = InputDebouncer::new(42);
        assert!(debouncer.update(&[KEY_NONE], 0).is_empty());
        assert!(!debouncer.timestamps().is_down(KEY_NONE));
    }

    #[test]
    fn test_zero_smoothing_releases_next_cycle() {
        let mut debouncer = InputDebouncer::new(0);
        debouncer.update(&[b'x'], 10);
        let events: Vec<_> = debouncer.update(&[], 11).collect();
        assert_eq!(events, vec![EventRecord::release(b'x')]);
    }

    #[test]
    fn test_clock_going_backwards_does_not_release() {
        let mut debouncer = InputDebouncer::new(42);
        debouncer.update(&[b'x'], 1000);
        assert!(debouncer.update(&[], 900).is_empty());
    }

    #[test]
    fn test_queue_rebuilt_each_cycle() {
        let mut debouncer = InputDebouncer::new(42);
        debouncer.update(&[b'a', b'b'], 0);
        assert_eq!(debouncer.next_event(), Some(EventRecord::press(b'a')));
        // Undrained events from the previous cycle are discarded.
        debouncer.update(&[b'a', b'b'], 10);
        assert_eq!(debouncer.next_event(), None);
        assert!(debouncer.pending().is_empty());
    }

    #[test]
    fn test_down_keys_lists_held() {
        let mut debouncer = InputDebouncer::new(42);
        debouncer.update(&[b'q', b'e'], 0);
        let down: Vec<_> = debouncer.timestamps().down_keys().collect();
        assert_eq!(down, vec![b'e', b'q']);
    }
}
