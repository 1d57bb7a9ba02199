//! Letter reveal pacing and the cancellable reveal timer

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Typewriter pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Delay before the first letter of a message
    pub start_delay: Duration,
    /// Delay after an ordinary letter
    pub letter_delay: Duration,
    /// Delay after a punctuation letter
    pub punctuation_delay: Duration,
    /// Characters that get the punctuation pause
    pub punctuation: Vec<char>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(100),
            letter_delay: Duration::from_millis(20),
            punctuation_delay: Duration::from_millis(100),
            punctuation: vec!['!', ',', '.', ':', ';', '?'],
        }
    }
}

impl RevealConfig {
    /// Delay to wait after revealing `letter`
    pub fn delay_after(&self, letter: Option<char>) -> Duration {
        match letter {
            Some(c) if self.punctuation.contains(&c) => self.punctuation_delay,
            _ => self.letter_delay,
        }
    }
}

/// Handle identifying one scheduled reveal.
///
/// Every schedule produces a fresh handle; a handle from an earlier message
/// or session no longer matches and its callback is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealHandle(u64);

/// The single pending reveal owned by a dialogue engine
#[derive(Debug, Default)]
pub struct RevealTimer {
    pending: Option<(RevealHandle, Duration)>,
    next_generation: u64,
}

impl RevealTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is pending and schedule a reveal after `delay`
    pub fn schedule(&mut self, delay: Duration) -> RevealHandle {
        self.next_generation += 1;
        let handle = RevealHandle(self.next_generation);
        self.pending = Some((handle, delay));
        handle
    }

    /// Drop the pending reveal, if any
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Handle of the pending reveal
    pub fn pending(&self) -> Option<RevealHandle> {
        self.pending.map(|(handle, _)| handle)
    }

    /// Time left until the pending reveal is due
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.map(|(_, remaining)| remaining)
    }

    /// Whether `handle` is the one currently pending
    pub fn is_current(&self, handle: RevealHandle) -> bool {
        self.pending() == Some(handle)
    }

    /// Consume up to `budget` of waiting time. Returns the handle and the
    /// unused budget if the pending reveal came due, leaving it unscheduled.
    pub fn advance(&mut self, budget: Duration) -> Option<(RevealHandle, Duration)> {
        let (handle, remaining) = self.pending.as_mut()?;
        if budget < *remaining {
            *remaining -= budget;
            return None;
        }
        let leftover = budget - *remaining;
        let handle = *handle;
        self.pending = None;
        Some((handle, leftover))
    }

    /// Take the pending handle if it matches, leaving nothing scheduled
    pub(crate) fn take(&mut self, handle: RevealHandle) -> bool {
        if self.is_current(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_delay() {
        let config = RevealConfig::default();
        assert_eq!(config.delay_after(Some('.')), Duration::from_millis(100));
        assert_eq!(config.delay_after(Some('?')), Duration::from_millis(100));
        assert_eq!(config.delay_after(Some('a')), Duration::from_millis(20));
        assert_eq!(config.delay_after(Some('-')), Duration::from_millis(20));
        assert_eq!(config.delay_after(None), Duration::from_millis(20));
    }

    #[test]
    fn test_schedule_replaces_pending() {
        let mut timer = RevealTimer::new();
        let first = timer.schedule(Duration::from_millis(100));
        let second = timer.schedule(Duration::from_millis(20));
        assert_ne!(first, second);
        assert!(!timer.is_current(first));
        assert!(timer.is_current(second));
        assert_eq!(timer.remaining(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_advance_carries_leftover() {
        let mut timer = RevealTimer::new();
        let handle = timer.schedule(Duration::from_millis(100));

        assert!(timer.advance(Duration::from_millis(60)).is_none());
        assert_eq!(timer.remaining(), Some(Duration::from_millis(40)));

        let (fired, leftover) = timer.advance(Duration::from_millis(50)).unwrap();
        assert_eq!(fired, handle);
        assert_eq!(leftover, Duration::from_millis(10));
        assert!(timer.pending().is_none());
        assert!(timer.advance(Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_cancel() {
        let mut timer = RevealTimer::new();
        let handle = timer.schedule(Duration::from_millis(10));
        timer.cancel();
        assert!(!timer.take(handle));
        assert!(timer.pending().is_none());
    }
}
