pub mod test_helpers {
    use crate::event_source::{Event, KeyCode, SimulatedEventSource};
    use crate::viewer::Viewer;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    /// Viewer double: fields are plain data and every navigation request is
    /// recorded instead of resolved.
    #[derive(Debug, Clone, Default)]
    pub struct ScriptedViewer {
        pub label: Option<String>,
        pub page_number: usize,
        pub pages_count: usize,
        pub requests: Vec<String>,
    }

    impl ScriptedViewer {
        pub fn new(label: Option<&str>, page_number: usize, pages_count: usize) -> Self {
            Self {
                label: label.map(str::to_string),
                page_number,
                pages_count,
                requests: Vec::new(),
            }
        }
    }

    impl Viewer for ScriptedViewer {
        fn current_page_label(&self) -> Option<String> {
            self.label.clone()
        }

        fn current_page_number(&self) -> usize {
            self.page_number
        }

        fn pages_count(&self) -> usize {
            self.pages_count
        }

        fn set_current_page_label(&mut self, label: &str) {
            self.requests.push(label.to_string());
        }
    }

    /// Builder for scripted user input
    pub struct KeySequenceBuilder {
        events: Vec<Event>,
    }

    impl Default for KeySequenceBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl KeySequenceBuilder {
        pub fn new() -> Self {
            Self { events: Vec::new() }
        }

        pub fn press_char(mut self, c: char) -> Self {
            self.events.push(SimulatedEventSource::char_key(c));
            self
        }

        /// Type a whole string, one key per character
        pub fn type_str(mut self, text: &str) -> Self {
            for c in text.chars() {
                self.events.push(SimulatedEventSource::char_key(c));
            }
            self
        }

        pub fn press(mut self, code: KeyCode) -> Self {
            self.events.push(SimulatedEventSource::key(code));
            self
        }

        pub fn press_enter(self) -> Self {
            self.press(KeyCode::Enter)
        }

        pub fn press_tab(self) -> Self {
            self.press(KeyCode::Tab)
        }

        pub fn press_esc(self) -> Self {
            self.press(KeyCode::Esc)
        }

        pub fn quit(self) -> Self {
            self.press_char('q')
        }

        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::new(self.events)
        }
    }

    /// Create a test terminal for buffer-level assertions
    pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    /// Capture the current terminal buffer as a string, trimming trailing
    /// whitespace and empty lines
    pub fn capture_terminal_state(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut lines = Vec::new();

        for y in 0..buffer.area.height {
            let mut line = String::new();
            for x in 0..buffer.area.width {
                line.push_str(buffer[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }
}
