/// The viewer owns pagination state and navigation behavior; the indicator
/// only reads snapshots from it and pushes navigation requests back.
pub trait Viewer {
    /// Display label of the current page, if the document defines one
    /// (front-matter roman numerals etc.). `None` means "use the index".
    fn current_page_label(&self) -> Option<String>;

    /// 1-based index of the current page.
    fn current_page_number(&self) -> usize;

    /// Total number of pages in the document.
    fn pages_count(&self) -> usize;

    /// Request navigation to the page identified by `label` (a custom label
    /// or a 1-based index as text). Resolution and error reporting are the
    /// viewer's job; callers fire and forget.
    fn set_current_page_label(&mut self, label: &str);

    fn snapshot(&self) -> ViewerSnapshot {
        ViewerSnapshot {
            current_page_label: self.current_page_label(),
            current_page_number: self.current_page_number(),
            pages_count: self.pages_count(),
        }
    }
}

/// The viewer's authoritative page-state tuple at a point in time.
/// Carried by every bus event so subscribers never reach back into the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerSnapshot {
    pub current_page_label: Option<String>,
    pub current_page_number: usize,
    pub pages_count: usize,
}
