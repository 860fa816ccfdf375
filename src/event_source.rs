use anyhow::Result;
pub use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::time::Duration;

/// Seam between the demo loop and the terminal, so tests can script input.
pub trait EventSource {
    /// Poll for events with a timeout
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Read the next event
    fn read(&mut self) -> Result<Event>;
}

/// Real keyboard event source using crossterm
pub struct KeyboardEventSource;

impl EventSource for KeyboardEventSource {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(crossterm::event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(crossterm::event::read()?)
    }
}

/// Scripted event source for tests
pub struct SimulatedEventSource {
    events: VecDeque<Event>,
}

impl SimulatedEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn char_key(c: char) -> Event {
        Self::key(KeyCode::Char(c))
    }
}

impl EventSource for SimulatedEventSource {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        // Quit once the script runs dry so a loop under test terminates.
        Ok(self
            .events
            .pop_front()
            .unwrap_or_else(|| Self::char_key('q')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_events_drain_in_order() {
        let mut source = SimulatedEventSource::new(vec![
            SimulatedEventSource::char_key('1'),
            SimulatedEventSource::key(KeyCode::Enter),
        ]);

        assert!(source.poll(Duration::ZERO).unwrap());
        let Event::Key(first) = source.read().unwrap() else {
            panic!("expected key event");
        };
        assert_eq!(first.code, KeyCode::Char('1'));

        let Event::Key(second) = source.read().unwrap() else {
            panic!("expected key event");
        };
        assert_eq!(second.code, KeyCode::Enter);

        assert!(!source.poll(Duration::ZERO).unwrap());
    }

    #[test]
    fn exhausted_script_quits() {
        let mut source = SimulatedEventSource::new(vec![]);
        let Event::Key(key) = source.read().unwrap() else {
            panic!("expected key event");
        };
        assert_eq!(key.code, KeyCode::Char('q'));
    }
}
