//! Page-number indicator: keeps a text field synchronized with viewer page
//! state and turns committed edits into navigation requests.
//!
//! Two logical modes. *Synced*: no draft, the field mirrors the last
//! snapshot. *Editing*: the user has typed and the field shows the draft.
//! Any incoming snapshot preempts an edit in progress and discards the
//! draft; the authoritative state always wins.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, warn};

use crate::event_bus::{EventBus, SubscriptionId, Topic};
use crate::viewer::{Viewer, ViewerSnapshot};

/// State owned by the indicator. All zero/absent until the first snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorState {
    pub current_page_label: Option<String>,
    pub current_page_number: usize,
    pub pages_count: usize,
    /// In-progress, uncommitted text. `None` means the field displays the
    /// authoritative snapshot, not a pending edit.
    pub user_input: Option<String>,
    /// Whole-field selection, set on focus so one keystroke overwrites the
    /// current value. Cleared by the first edit and by every snapshot.
    pub select_all: bool,
}

impl IndicatorState {
    pub fn is_editing(&self) -> bool {
        self.user_input.is_some()
    }

    /// The editable text: draft if present, else label, else the index.
    pub fn display_value(&self) -> String {
        if let Some(input) = &self.user_input {
            return input.clone();
        }
        match &self.current_page_label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => self.current_page_number.to_string(),
        }
    }

    /// The read-only suffix after the field: `" (4 of 20)"` when the page
    /// carries a label, `" of 20"` otherwise.
    pub fn auxiliary_text(&self) -> String {
        match &self.current_page_label {
            Some(label) if !label.is_empty() => {
                format!(" ({} of {})", self.current_page_number, self.pages_count)
            }
            _ => format!(" of {}", self.pages_count),
        }
    }

    fn apply_snapshot(&mut self, snapshot: &ViewerSnapshot) {
        self.current_page_label = snapshot.current_page_label.clone();
        self.current_page_number = snapshot.current_page_number;
        self.pages_count = snapshot.pages_count;
        self.user_input = None;
        self.select_all = false;
    }
}

/// What the host should do after feeding a key to a focused indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Draft changed; redraw.
    Edited,
    /// Enter: commit the field, keep focus.
    Commit,
    /// Esc: release focus (focus loss commits, per the blur rule).
    Blur,
    /// Not an editing key; the host may handle it.
    Ignored,
}

/// The page-number indicator component.
///
/// State lives behind `Rc<RefCell<_>>` because attached bus handlers hold a
/// second reference to it. Everything runs on the UI thread; no handler
/// call re-enters another.
pub struct PageIndicator {
    state: Rc<RefCell<IndicatorState>>,
    subscriptions: Vec<SubscriptionId>,
}

impl Default for PageIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl PageIndicator {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(IndicatorState::default())),
            subscriptions: Vec::new(),
        }
    }

    /// Subscribe to the three page topics. Call once per `detach`; a second
    /// attach without an intervening detach is a no-op.
    pub fn attach(&mut self, bus: &mut EventBus) {
        if !self.subscriptions.is_empty() {
            warn!("indicator: attach called while already attached");
            return;
        }
        for topic in Topic::all() {
            let state = Rc::clone(&self.state);
            let id = bus.on(*topic, move |snapshot| {
                state.borrow_mut().apply_snapshot(snapshot);
            });
            self.subscriptions.push(id);
        }
        debug!("indicator: attached");
    }

    /// Release the subscriptions established by `attach`. Safe to call when
    /// already detached.
    pub fn detach(&mut self, bus: &mut EventBus) {
        for id in self.subscriptions.drain(..) {
            bus.unsubscribe(id);
        }
        debug!("indicator: detached");
    }

    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Replace the draft wholesale. Pure local update, no viewer interaction.
    pub fn on_user_edit(&mut self, text: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        state.user_input = Some(text.into());
        state.select_all = false;
    }

    /// Select the whole field so the next keystroke overwrites it.
    pub fn on_focus_gained(&mut self) {
        self.state.borrow_mut().select_all = true;
    }

    /// Keystroke translation for a focused field. Printable characters and
    /// Backspace edit the draft (honoring select-all); Enter and Esc are
    /// reported back for the host to commit or blur.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Enter => KeyOutcome::Commit,
            KeyCode::Esc => KeyOutcome::Blur,
            KeyCode::Backspace => {
                self.delete_back();
                KeyOutcome::Edited
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c);
                KeyOutcome::Edited
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Commit the field's current text as a navigation request and drop the
    /// draft. Fire-and-forget: label resolution is the viewer's problem.
    pub fn on_commit(&mut self, viewer: &mut dyn Viewer) -> String {
        let text = {
            let mut state = self.state.borrow_mut();
            let text = state.display_value();
            state.user_input = None;
            state.select_all = false;
            text
        };
        debug!("indicator: commit {text:?}");
        viewer.set_current_page_label(&text);
        text
    }

    pub fn state(&self) -> Ref<'_, IndicatorState> {
        self.state.borrow()
    }

    pub fn display_value(&self) -> String {
        self.state.borrow().display_value()
    }

    pub fn auxiliary_text(&self) -> String {
        self.state.borrow().auxiliary_text()
    }

    fn insert_char(&mut self, c: char) {
        let mut state = self.state.borrow_mut();
        let mut draft = if state.select_all {
            String::new()
        } else {
            state
                .user_input
                .clone()
                .unwrap_or_else(|| state.display_value())
        };
        draft.push(c);
        state.user_input = Some(draft);
        state.select_all = false;
    }

    fn delete_back(&mut self) {
        let mut state = self.state.borrow_mut();
        let mut draft = if state.select_all {
            String::new()
        } else {
            state
                .user_input
                .clone()
                .unwrap_or_else(|| state.display_value())
        };
        draft.pop();
        state.user_input = Some(draft);
        state.select_all = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn snapshot(label: Option<&str>, number: usize, pages: usize) -> ViewerSnapshot {
        ViewerSnapshot {
            current_page_label: label.map(str::to_string),
            current_page_number: number,
            pages_count: pages,
        }
    }

    struct RecordingViewer {
        requests: Vec<String>,
    }

    impl RecordingViewer {
        fn new() -> Self {
            Self { requests: Vec::new() }
        }
    }

    impl Viewer for RecordingViewer {
        fn current_page_label(&self) -> Option<String> {
            None
        }

        fn current_page_number(&self) -> usize {
            1
        }

        fn pages_count(&self) -> usize {
            1
        }

        fn set_current_page_label(&mut self, label: &str) {
            self.requests.push(label.to_string());
        }
    }

    #[test]
    fn initial_state_is_synced_and_zeroed() {
        let indicator = PageIndicator::new();
        let state = indicator.state();
        assert!(!state.is_editing());
        assert_eq!(state.display_value(), "0");
        assert_eq!(state.auxiliary_text(), " of 0");
    }

    #[test]
    fn labeled_snapshot_renders_label_with_parenthesized_position() {
        let mut indicator = PageIndicator::new();
        let mut bus = EventBus::new();
        indicator.attach(&mut bus);

        bus.emit(Topic::PageChanging, &snapshot(Some("iv"), 4, 20));

        assert_eq!(indicator.display_value(), "iv");
        assert_eq!(indicator.auxiliary_text(), " (4 of 20)");
    }

    #[test]
    fn unlabeled_snapshot_falls_back_to_page_number() {
        let mut indicator = PageIndicator::new();
        let mut bus = EventBus::new();
        indicator.attach(&mut bus);

        bus.emit(Topic::PageChanging, &snapshot(None, 7, 20));

        assert_eq!(indicator.display_value(), "7");
        assert_eq!(indicator.auxiliary_text(), " of 20");
    }

    #[test]
    fn empty_label_counts_as_absent() {
        let mut indicator = PageIndicator::new();
        let mut bus = EventBus::new();
        indicator.attach(&mut bus);

        bus.emit(Topic::PageLabels, &snapshot(Some(""), 3, 9));

        assert_eq!(indicator.display_value(), "3");
        assert_eq!(indicator.auxiliary_text(), " of 9");
    }

    #[test]
    fn keystrokes_enter_editing_mode() {
        let mut indicator = PageIndicator::new();
        let mut bus = EventBus::new();
        indicator.attach(&mut bus);
        bus.emit(Topic::PageChanging, &snapshot(None, 7, 20));

        assert_eq!(indicator.handle_key(key(KeyCode::Char('1'))), KeyOutcome::Edited);
        assert!(indicator.state().is_editing());
        // Without select-all the keystroke appends to the displayed value.
        assert_eq!(indicator.display_value(), "71");
    }

    #[test]
    fn focus_gained_selects_all_so_first_key_overwrites() {
        let mut indicator = PageIndicator::new();
        let mut bus = EventBus::new();
        indicator.attach(&mut bus);
        bus.emit(Topic::PageChanging, &snapshot(Some("xii"), 12, 40));

        indicator.on_focus_gained();
        indicator.handle_key(key(KeyCode::Char('3')));
        indicator.handle_key(key(KeyCode::Char('4')));

        assert_eq!(indicator.display_value(), "34");
    }

    #[test]
    fn backspace_with_selection_clears_field() {
        let mut indicator = PageIndicator::new();
        let mut bus = EventBus::new();
        indicator.attach(&mut bus);
        bus.emit(Topic::PageChanging, &snapshot(None, 7, 20));

        indicator.on_focus_gained();
        indicator.handle_key(key(KeyCode::Backspace));

        assert_eq!(indicator.display_value(), "");
    }

    #[test]
    fn snapshot_preempts_edit_in_progress() {
        let mut indicator = PageIndicator::new();
        let mut bus = EventBus::new();
        indicator.attach(&mut bus);
        bus.emit(Topic::PageChanging, &snapshot(None, 7, 20));

        indicator.on_user_edit("xx");
        assert!(indicator.state().is_editing());

        bus.emit(Topic::PageChanging, &snapshot(None, 8, 20));

        assert!(!indicator.state().is_editing());
        assert_eq!(indicator.display_value(), "8");
    }

    #[test]
    fn commit_forwards_text_and_resets_draft() {
        let mut indicator = PageIndicator::new();
        let mut bus = EventBus::new();
        let mut viewer = RecordingViewer::new();
        indicator.attach(&mut bus);
        bus.emit(Topic::PageChanging, &snapshot(None, 7, 20));

        indicator.on_user_edit("12");
        let sent = indicator.on_commit(&mut viewer);

        assert_eq!(sent, "12");
        assert_eq!(viewer.requests, vec!["12"]);
        assert!(!indicator.state().is_editing());
    }

    #[test]
    fn commit_without_draft_forwards_displayed_value() {
        let mut indicator = PageIndicator::new();
        let mut bus = EventBus::new();
        let mut viewer = RecordingViewer::new();
        indicator.attach(&mut bus);
        bus.emit(Topic::PageChanging, &snapshot(Some("iv"), 4, 20));

        indicator.on_commit(&mut viewer);

        assert_eq!(viewer.requests, vec!["iv"]);
    }

    #[test]
    fn empty_commit_is_forwarded_unconditionally() {
        let mut indicator = PageIndicator::new();
        let mut viewer = RecordingViewer::new();

        indicator.on_user_edit("");
        indicator.on_commit(&mut viewer);

        assert_eq!(viewer.requests, vec![""]);
    }

    #[test]
    fn detach_stops_notifications() {
        let mut indicator = PageIndicator::new();
        let mut bus = EventBus::new();
        indicator.attach(&mut bus);
        bus.emit(Topic::PageChanging, &snapshot(None, 7, 20));

        indicator.detach(&mut bus);
        bus.emit(Topic::PageChanging, &snapshot(None, 9, 20));

        assert_eq!(indicator.display_value(), "7");
        assert!(!indicator.is_attached());
    }

    #[test]
    fn double_attach_does_not_double_subscribe() {
        let mut indicator = PageIndicator::new();
        let mut bus = EventBus::new();
        indicator.attach(&mut bus);
        indicator.attach(&mut bus);

        assert_eq!(bus.subscriber_count(Topic::PageChanging), 1);

        indicator.detach(&mut bus);
        assert_eq!(bus.subscriber_count(Topic::PageChanging), 0);
    }

    #[test]
    fn control_chords_are_ignored() {
        let mut indicator = PageIndicator::new();
        let outcome =
            indicator.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(outcome, KeyOutcome::Ignored);
        assert!(!indicator.state().is_editing());
    }
}
