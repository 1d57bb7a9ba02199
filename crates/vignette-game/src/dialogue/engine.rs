//! Dialogue session state machine
//!
//! A session is an ordered list of marked-up messages. Each message is
//! revealed letter by letter by a cancellable timer owned by the engine; an
//! "activate" input skips the reveal, advances to the next message, or
//! closes the session after the last one. Time only moves through
//! [`DialogueEngine::update`], so the engine is deterministic under test.

use std::time::Duration;

use tracing::debug;

use super::markup::{parse, ParsedMessage};
use super::reveal::{RevealConfig, RevealHandle, RevealTimer};
use super::view::DialogueView;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialoguePhase {
    /// No session
    #[default]
    Idle,
    /// Session just opened; becomes `Revealing` once the reveal timer starts
    /// running on the next update
    Entering,
    /// Letters are appearing
    Revealing,
    /// Every letter of the current message is shown
    Revealed,
    /// The last message is being dismissed. Passed through on the way to
    /// `Closed` and announced with [`DialogueEvent::Dismissed`].
    AdvancingOut,
    /// Session ended; becomes `Idle` on the next update
    Closed,
}

/// Notifications for the host, drained with [`DialogueEngine::take_events`]
#[derive(Debug, Clone, PartialEq)]
pub enum DialogueEvent {
    /// A session opened with this many messages
    Opened { messages: usize },
    /// The cursor moved on to another message
    Advanced { index: usize },
    /// Message `index` is leaving the screen as the session ends
    Dismissed { index: usize },
    /// The session closed, with the chosen key if it closed by selection
    Closed { selection: Option<String> },
}

#[derive(Debug)]
struct Session {
    messages: Vec<String>,
    message_index: usize,
    current: ParsedMessage,
    reveal_index: i64,
}

impl Session {
    fn is_last(&self) -> bool {
        self.message_index + 1 >= self.messages.len()
    }

    fn fully_revealed(&self) -> bool {
        self.reveal_index >= self.current.len() as i64
    }
}

/// Typewriter dialogue engine
#[derive(Debug, Default)]
pub struct DialogueEngine {
    pub config: RevealConfig,
    phase: DialoguePhase,
    session: Option<Session>,
    timer: RevealTimer,
    events: Vec<DialogueEvent>,
}

impl DialogueEngine {
    pub fn new() -> Self {
        Self::with_config(RevealConfig::default())
    }

    pub fn with_config(config: RevealConfig) -> Self {
        Self {
            config,
            phase: DialoguePhase::Idle,
            session: None,
            timer: RevealTimer::new(),
            events: Vec::new(),
        }
    }

    /// Start a session, replacing any open one
    pub fn open(&mut self, messages: Vec<String>) {
        if self.is_active() {
            debug!("Dialogue session interrupted by a new one");
        }
        self.timer.cancel();

        let count = messages.len();
        let current = messages.first().map(|m| parse(m)).unwrap_or_default();
        let empty = messages.is_empty();
        self.session = Some(Session {
            messages,
            message_index: 0,
            current,
            reveal_index: if empty { 0 } else { -1 },
        });

        if empty {
            self.phase = DialoguePhase::Revealed;
        } else {
            self.phase = DialoguePhase::Entering;
            self.timer.schedule(self.config.start_delay);
        }
        debug!("Dialogue session opened with {} message(s)", count);
        self.events.push(DialogueEvent::Opened { messages: count });
    }

    /// The click/confirm input: skip, advance or close depending on phase
    pub fn activate(&mut self) {
        match self.phase() {
            DialoguePhase::Entering | DialoguePhase::Revealing => self.skip(),
            DialoguePhase::Revealed => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                if session.is_last() {
                    self.close(None);
                } else {
                    session.message_index += 1;
                    session.current = parse(&session.messages[session.message_index]);
                    session.reveal_index = -1;
                    let index = session.message_index;
                    self.timer.schedule(self.config.start_delay);
                    self.phase = DialoguePhase::Revealing;
                    debug!("Dialogue advanced to message {}", index);
                    self.events.push(DialogueEvent::Advanced { index });
                }
            }
            phase => debug!("Activate ignored in {:?}", phase),
        }
    }

    /// Close the session with a choice. Only accepted once the last message
    /// is fully revealed; returns whether it was.
    pub fn select_choice(&mut self, key: impl Into<String>) -> bool {
        if !self.choices_available() {
            debug!("Choice selection ignored in {:?}", self.phase());
            return false;
        }
        self.close(Some(key.into()));
        true
    }

    /// Let `dt` of wall time pass for the reveal timer
    pub fn update(&mut self, dt: Duration) {
        match self.phase() {
            DialoguePhase::Closed => {
                self.session = None;
                self.phase = DialoguePhase::Idle;
                return;
            }
            DialoguePhase::Entering => self.phase = DialoguePhase::Revealing,
            _ => {}
        }

        let mut budget = dt;
        while let Some((handle, leftover)) = self.timer.advance(budget) {
            self.reveal_next(handle);
            budget = leftover;
        }
    }

    /// Deliver a reveal callback for `handle`. Returns false, changing
    /// nothing, when the handle is not the pending one.
    pub fn fire(&mut self, handle: RevealHandle) -> bool {
        if !self.timer.take(handle) {
            debug!("Stale reveal callback {:?} ignored", handle);
            return false;
        }
        self.reveal_next(handle);
        true
    }

    fn reveal_next(&mut self, handle: RevealHandle) {
        let Some(session) = self.session.as_mut() else {
            debug!("Reveal {:?} fired without a session", handle);
            return;
        };
        session.reveal_index += 1;
        if session.fully_revealed() {
            session.reveal_index = session.current.len() as i64;
            self.phase = DialoguePhase::Revealed;
        } else {
            let letter = session.current.text.get(session.reveal_index as usize).copied();
            self.timer.schedule(self.config.delay_after(letter));
            self.phase = DialoguePhase::Revealing;
        }
    }

    fn skip(&mut self) {
        self.timer.cancel();
        if let Some(session) = self.session.as_mut() {
            session.reveal_index = session.current.len() as i64;
        }
        self.phase = DialoguePhase::Revealed;
    }

    fn close(&mut self, selection: Option<String>) {
        self.phase = DialoguePhase::AdvancingOut;
        self.timer.cancel();
        if let Some(session) = self.session.as_mut() {
            let index = session.message_index;
            session.message_index = session.messages.len();
            self.events.push(DialogueEvent::Dismissed { index });
        }
        debug!("Dialogue session closed (selection: {:?})", selection);
        self.events.push(DialogueEvent::Closed { selection });
        self.phase = DialoguePhase::Closed;
    }

    pub fn phase(&self) -> DialoguePhase {
        self.phase
    }

    /// Whether a session is open and not yet closed
    pub fn is_active(&self) -> bool {
        !matches!(self.phase(), DialoguePhase::Idle | DialoguePhase::Closed)
    }

    pub fn message_index(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.message_index)
    }

    pub fn message_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.messages.len())
    }

    /// Revealed letters of the current message; -1 before the first
    pub fn reveal_index(&self) -> i64 {
        self.session.as_ref().map_or(-1, |s| s.reveal_index)
    }

    /// The current message, parsed
    pub fn current(&self) -> Option<&ParsedMessage> {
        self.session.as_ref().map(|s| &s.current)
    }

    /// Handle of the pending reveal, if one is scheduled
    pub fn pending_reveal(&self) -> Option<RevealHandle> {
        self.timer.pending()
    }

    /// Whether the last message is fully shown and choices may be taken
    pub fn choices_available(&self) -> bool {
        self.phase() == DialoguePhase::Revealed
            && self.session.as_ref().is_some_and(|s| s.is_last() && s.fully_revealed())
    }

    pub fn take_events(&mut self) -> Vec<DialogueEvent> {
        std::mem::take(&mut self.events)
    }

    /// What the presentation layer should draw this frame
    pub fn view(&self) -> DialogueView<'_> {
        let words = self
            .session
            .as_ref()
            .map(|s| DialogueView::words(&s.current, s.reveal_index))
            .unwrap_or_default();
        DialogueView {
            phase: self.phase(),
            message_index: self.message_index(),
            message_count: self.message_count(),
            words,
            choices_visible: self.choices_available(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn session(lines: &[&str]) -> DialogueEngine {
        let mut engine = DialogueEngine::new();
        engine.open(lines.iter().map(|s| s.to_string()).collect());
        engine
    }

    #[test]
    fn test_open_enters() {
        let mut engine = session(&["Hello"]);
        assert_eq!(engine.phase(), DialoguePhase::Entering);
        assert_eq!(engine.message_index(), 0);
        assert_eq!(engine.reveal_index(), -1);
        assert!(engine.is_active());
        assert_eq!(engine.take_events(), vec![DialogueEvent::Opened { messages: 1 }]);
    }

    #[test]
    fn test_entering_lasts_until_timer_runs() {
        let mut engine = session(&["Hello"]);
        engine.update(Duration::ZERO);
        assert_eq!(engine.phase(), DialoguePhase::Revealing);
        assert_eq!(engine.reveal_index(), -1);
        assert!(engine.pending_reveal().is_some());
    }

    #[test]
    fn test_reveal_pacing() {
        let mut engine = session(&["Hi."]);

        engine.update(ms(99));
        assert_eq!(engine.phase(), DialoguePhase::Revealing);
        assert_eq!(engine.reveal_index(), -1);
        engine.update(ms(1));
        assert_eq!(engine.reveal_index(), 0);
        assert_eq!(engine.phase(), DialoguePhase::Revealing);

        // 'H' then 'i' are ordinary letters
        engine.update(ms(20));
        assert_eq!(engine.reveal_index(), 1);
        engine.update(ms(20));
        assert_eq!(engine.reveal_index(), 2);

        // '.' pauses longer before the message completes
        engine.update(ms(99));
        assert_eq!(engine.phase(), DialoguePhase::Revealing);
        engine.update(ms(1));
        assert_eq!(engine.reveal_index(), 3);
        assert_eq!(engine.phase(), DialoguePhase::Revealed);
    }

    #[test]
    fn test_large_step_reveals_many_letters() {
        let mut engine = session(&["abcdef"]);
        // 100ms start plus five 20ms gaps reveals all six letters
        engine.update(ms(200));
        assert_eq!(engine.reveal_index(), 5);
        engine.update(ms(20));
        assert_eq!(engine.phase(), DialoguePhase::Revealed);
        assert_eq!(engine.reveal_index(), 6);
    }

    #[test]
    fn test_reveal_is_monotonic_and_stops() {
        let mut engine = session(&["[w]Hello,[/w] world!"]);
        let len = engine.current().unwrap().len() as i64;

        let mut last = engine.reveal_index();
        for _ in 0..200 {
            engine.update(ms(7));
            let index = engine.reveal_index();
            assert!(index >= last);
            assert!(index <= len);
            last = index;
        }
        assert_eq!(last, len);
        assert_eq!(engine.phase(), DialoguePhase::Revealed);
        assert!(engine.pending_reveal().is_none());

        engine.update(Duration::from_secs(10));
        assert_eq!(engine.reveal_index(), len);
    }

    #[test]
    fn test_skip_reveals_everything() {
        for elapsed in [0, 100, 140, 400] {
            let mut engine = session(&["Are you lost?"]);
            engine.update(ms(elapsed));
            engine.activate();
            assert_eq!(engine.reveal_index(), 13);
            assert_eq!(engine.phase(), DialoguePhase::Revealed);
            assert!(engine.pending_reveal().is_none());
        }
    }

    #[test]
    fn test_close_after_exhaustion() {
        let mut engine = session(&["a", "b"]);
        engine.take_events();

        engine.activate(); // skip a
        engine.activate(); // advance to b
        assert_eq!(engine.message_index(), 1);
        assert_eq!(engine.phase(), DialoguePhase::Revealing);
        assert_eq!(engine.reveal_index(), -1);

        engine.activate(); // skip b
        assert!(engine.is_active());
        engine.activate(); // close
        assert_eq!(engine.phase(), DialoguePhase::Closed);
        assert_eq!(engine.message_index(), 2);
        assert_eq!(
            engine.take_events(),
            vec![
                DialogueEvent::Advanced { index: 1 },
                DialogueEvent::Dismissed { index: 1 },
                DialogueEvent::Closed { selection: None },
            ]
        );

        engine.update(ms(16));
        assert_eq!(engine.phase(), DialoguePhase::Idle);
        assert!(engine.current().is_none());
    }

    #[test]
    fn test_stale_timer_cannot_touch_next_message() {
        let mut engine = session(&["first message", "second"]);
        engine.update(ms(140));
        let stale = engine.pending_reveal().unwrap();

        engine.activate(); // skip first
        let finalized = engine.reveal_index();
        assert!(!engine.fire(stale));
        assert_eq!(engine.reveal_index(), finalized);

        engine.activate(); // advance
        assert!(!engine.fire(stale));
        assert_eq!(engine.message_index(), 1);
        assert_eq!(engine.reveal_index(), -1);

        let fresh = engine.pending_reveal().unwrap();
        assert!(engine.fire(fresh));
        assert_eq!(engine.reveal_index(), 0);
    }

    #[test]
    fn test_empty_session() {
        let mut engine = session(&[]);
        assert_eq!(engine.phase(), DialoguePhase::Revealed);
        assert_eq!(engine.reveal_index(), 0);
        assert!(engine.pending_reveal().is_none());
        assert!(engine.view().words.is_empty());

        engine.update(Duration::from_secs(1));
        assert_eq!(engine.phase(), DialoguePhase::Revealed);

        engine.activate();
        assert_eq!(engine.phase(), DialoguePhase::Closed);
    }

    #[test]
    fn test_open_interrupts_session() {
        let mut engine = session(&["one", "two"]);
        engine.update(ms(120));
        let stale = engine.pending_reveal().unwrap();

        engine.open(vec!["three".to_string()]);
        assert_eq!(engine.message_count(), 1);
        assert_eq!(engine.reveal_index(), -1);
        assert_eq!(engine.phase(), DialoguePhase::Entering);
        assert!(!engine.fire(stale));
        assert_eq!(engine.current().unwrap().plain_text(), "three");
    }

    #[test]
    fn test_select_choice() {
        let mut engine = session(&["Pick one", "Well?"]);
        engine.take_events();

        assert!(!engine.select_choice("yes"));
        engine.activate();
        assert!(!engine.select_choice("yes"));
        engine.activate();
        engine.activate();
        assert!(engine.view().choices_visible);

        assert!(engine.select_choice("yes"));
        assert_eq!(engine.phase(), DialoguePhase::Closed);
        let events = engine.take_events();
        assert_eq!(
            events.last(),
            Some(&DialogueEvent::Closed {
                selection: Some("yes".to_string())
            })
        );
        assert!(!engine.select_choice("again"));
    }

    #[test]
    fn test_choice_while_last_message_reveals_is_ignored() {
        let mut engine = session(&["Pick", "Which one?"]);
        engine.activate();
        engine.activate();
        assert_eq!(engine.message_index(), 1);
        engine.update(ms(160));
        assert_eq!(engine.phase(), DialoguePhase::Revealing);
        let index = engine.reveal_index();
        assert!(index >= 0);
        engine.take_events();

        assert!(!engine.select_choice("yes"));
        assert_eq!(engine.reveal_index(), index);
        assert_eq!(engine.phase(), DialoguePhase::Revealing);
        assert!(engine.pending_reveal().is_some());
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_activate_when_idle_is_ignored() {
        let mut engine = DialogueEngine::new();
        engine.activate();
        engine.update(ms(500));
        assert_eq!(engine.phase(), DialoguePhase::Idle);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_view_follows_reveal() {
        let mut engine = session(&["[i]You awaken[/i]"]);
        assert!(engine.view().words.is_empty());

        engine.update(ms(140));
        let view = engine.view();
        assert_eq!(view.phase, DialoguePhase::Revealing);
        assert_eq!(view.words.len(), 1);
        assert_eq!(view.shown_text(), "You");
        assert!(view.words[0].letters[0].tags.contains('i'));

        engine.activate();
        assert_eq!(engine.view().shown_text(), "You awaken");
    }
}
