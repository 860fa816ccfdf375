//! Synthetic document backing the demo binary and the integration tests.
//!
//! Front-matter pages carry lowercase roman-numeral labels and body pages
//! carry arabic labels offset past the front matter, which is how PDF page
//! labels usually look in the wild. Label resolution failures stay inside
//! the viewer: they are logged and the page does not move.

use log::{debug, warn};
use thiserror::Error;

use crate::viewer::Viewer;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelResolveError {
    #[error("unknown page label {0:?}")]
    UnknownLabel(String),
    #[error("page {0} is out of range (1..={1})")]
    OutOfRange(usize, usize),
}

pub struct DemoDocument {
    title: String,
    pages_count: usize,
    front_matter: usize,
    labels_enabled: bool,
    page: usize, // 0-based
}

impl DemoDocument {
    pub fn new(title: impl Into<String>, pages_count: usize, front_matter: usize) -> Self {
        let pages_count = pages_count.max(1);
        Self {
            title: title.into(),
            pages_count,
            front_matter: front_matter.min(pages_count.saturating_sub(1)),
            labels_enabled: true,
            page: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn labels_enabled(&self) -> bool {
        self.labels_enabled
    }

    /// Turn the label table on or off. The host announces this on the bus
    /// as a `pagelabels` notification.
    pub fn toggle_labels(&mut self) {
        self.labels_enabled = !self.labels_enabled;
        debug!("demo: labels_enabled={}", self.labels_enabled);
    }

    /// Display label for a 0-based page index under the current scheme.
    pub fn label_for(&self, idx: usize) -> String {
        if idx < self.front_matter {
            roman_lower(idx + 1)
        } else {
            (idx - self.front_matter + 1).to_string()
        }
    }

    /// Resolve user input to a 0-based page index: the label table first,
    /// then a 1-based number in the active scheme.
    pub fn resolve_label(&self, text: &str) -> Result<usize, LabelResolveError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(LabelResolveError::UnknownLabel(text.to_string()));
        }

        if self.labels_enabled {
            let lowered = trimmed.to_ascii_lowercase();
            for idx in 0..self.front_matter {
                if roman_lower(idx + 1) == lowered {
                    return Ok(idx);
                }
            }
        }

        let Ok(number) = trimmed.parse::<usize>() else {
            return Err(LabelResolveError::UnknownLabel(text.to_string()));
        };
        if number == 0 {
            return Err(LabelResolveError::OutOfRange(number, self.max_typed_number()));
        }

        let idx = if self.labels_enabled {
            self.front_matter + number - 1
        } else {
            number - 1
        };
        if idx >= self.pages_count {
            return Err(LabelResolveError::OutOfRange(number, self.max_typed_number()));
        }
        Ok(idx)
    }

    fn max_typed_number(&self) -> usize {
        if self.labels_enabled {
            self.pages_count - self.front_matter
        } else {
            self.pages_count
        }
    }

    pub fn go_to(&mut self, idx: usize) -> bool {
        let idx = idx.min(self.pages_count - 1);
        if idx == self.page {
            return false;
        }
        self.page = idx;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if self.page + 1 >= self.pages_count {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn first_page(&mut self) -> bool {
        let moved = self.page != 0;
        self.page = 0;
        moved
    }

    /// Deterministic filler for the demo's document pane.
    pub fn body_lines(&self) -> Vec<String> {
        const FILLER: &[&str] = &[
            "The margins of this page are intentionally generous.",
            "Nothing on this page is worth reading twice.",
            "A paragraph, then another, then a page break.",
            "Typeset in a terminal, where every glyph is a cell.",
            "The footer would hold a printed page number, if we printed.",
            "Somewhere past the front matter the real text begins.",
            "Chapters end where the page count says they do.",
            "This line exists to give the page some weight.",
        ];

        let mut lines = vec![
            format!("{} — page {}", self.title, self.label_for(self.page)),
            String::new(),
        ];
        for i in 0..12 {
            lines.push(FILLER[(self.page + i) % FILLER.len()].to_string());
        }
        lines
    }
}

impl Viewer for DemoDocument {
    fn current_page_label(&self) -> Option<String> {
        self.labels_enabled.then(|| self.label_for(self.page))
    }

    fn current_page_number(&self) -> usize {
        self.page + 1
    }

    fn pages_count(&self) -> usize {
        self.pages_count
    }

    fn set_current_page_label(&mut self, label: &str) {
        match self.resolve_label(label) {
            Ok(idx) => {
                self.go_to(idx);
            }
            Err(err) => warn!("demo: navigation rejected: {err}"),
        }
    }
}

/// Lowercase roman numeral for n >= 1.
pub fn roman_lower(mut n: usize) -> String {
    const TABLE: &[(usize, &str)] = &[
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];

    let mut out = String::new();
    for &(value, digits) in TABLE {
        while n >= value {
            out.push_str(digits);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roman_numerals() {
        assert_eq!(roman_lower(1), "i");
        assert_eq!(roman_lower(4), "iv");
        assert_eq!(roman_lower(9), "ix");
        assert_eq!(roman_lower(14), "xiv");
        assert_eq!(roman_lower(1987), "mcmlxxxvii");
    }

    #[test]
    fn front_matter_pages_carry_roman_labels() {
        let doc = DemoDocument::new("Demo", 20, 4);
        assert_eq!(doc.label_for(0), "i");
        assert_eq!(doc.label_for(3), "iv");
        assert_eq!(doc.label_for(4), "1");
        assert_eq!(doc.label_for(19), "16");
    }

    #[test]
    fn roman_labels_resolve_to_their_page() {
        let doc = DemoDocument::new("Demo", 20, 4);
        assert_eq!(doc.resolve_label("iv"), Ok(3));
        assert_eq!(doc.resolve_label(" II "), Ok(1));
    }

    #[test]
    fn arabic_labels_resolve_with_front_matter_offset() {
        let doc = DemoDocument::new("Demo", 20, 4);
        assert_eq!(doc.resolve_label("1"), Ok(4));
        assert_eq!(doc.resolve_label("12"), Ok(15));
        assert_eq!(doc.resolve_label("16"), Ok(19));
        assert_eq!(
            doc.resolve_label("17"),
            Err(LabelResolveError::OutOfRange(17, 16))
        );
    }

    #[test]
    fn numbers_resolve_absolutely_when_labels_disabled() {
        let mut doc = DemoDocument::new("Demo", 20, 4);
        doc.toggle_labels();
        assert_eq!(doc.resolve_label("1"), Ok(0));
        assert_eq!(doc.resolve_label("20"), Ok(19));
        assert_eq!(
            doc.resolve_label("iv"),
            Err(LabelResolveError::UnknownLabel("iv".to_string()))
        );
    }

    #[test]
    fn garbage_labels_leave_page_unchanged() {
        let mut doc = DemoDocument::new("Demo", 20, 4);
        doc.go_to(6);
        doc.set_current_page_label("xx");
        doc.set_current_page_label("");
        doc.set_current_page_label("0");
        assert_eq!(doc.current_page_number(), 7);
    }

    #[test]
    fn label_toggle_clears_current_label() {
        let mut doc = DemoDocument::new("Demo", 20, 4);
        assert_eq!(doc.current_page_label(), Some("i".to_string()));
        doc.toggle_labels();
        assert_eq!(doc.current_page_label(), None);
    }

    #[test]
    fn navigation_clamps_at_document_edges() {
        let mut doc = DemoDocument::new("Demo", 3, 0);
        assert!(!doc.prev_page());
        assert!(doc.next_page());
        assert!(doc.next_page());
        assert!(!doc.next_page());
        assert_eq!(doc.current_page_number(), 3);
        assert!(doc.first_page());
        assert!(!doc.first_page());
    }
}
