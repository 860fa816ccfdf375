//! Demo host: mounts the page indicator over a synthetic document.
//!
//! Owns the viewer, the bus and the indicator, and does the wiring the
//! library leaves to hosts: attach/detach at mount/unmount, `pagechanging`
//! on navigation and successful commits, `firstpage` on jump-to-start,
//! `pagelabels` when the label scheme is toggled.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use log::info;
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::demo_doc::DemoDocument;
use crate::event_bus::{EventBus, Topic};
use crate::event_source::EventSource;
use crate::indicator::{KeyOutcome, PageIndicator};
use crate::theme::Base16Palette;
use crate::viewer::Viewer;
use crate::widget::PageNumberBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Body,
    Indicator,
}

pub struct App {
    doc: DemoDocument,
    bus: EventBus,
    indicator: PageIndicator,
    page_bar: PageNumberBar,
    palette: &'static Base16Palette,
    focus: Focus,
    should_quit: bool,
}

impl App {
    pub fn new(doc: DemoDocument, palette: &'static Base16Palette) -> Self {
        Self {
            doc,
            bus: EventBus::new(),
            indicator: PageIndicator::new(),
            page_bar: PageNumberBar::new(),
            palette,
            focus: Focus::Body,
            should_quit: false,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn document(&self) -> &DemoDocument {
        &self.doc
    }

    pub fn indicator(&self) -> &PageIndicator {
        &self.indicator
    }

    pub fn mount(&mut self) {
        self.indicator.attach(&mut self.bus);
        self.bus.emit(Topic::FirstPage, &self.doc.snapshot());
    }

    pub fn unmount(&mut self) {
        self.indicator.detach(&mut self.bus);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::Indicator => self.handle_indicator_key(key),
            Focus::Body => self.handle_body_key(key),
        }
    }

    fn handle_indicator_key(&mut self, key: KeyEvent) {
        match self.indicator.handle_key(key) {
            KeyOutcome::Commit => self.commit(),
            KeyOutcome::Blur => self.blur(),
            KeyOutcome::Edited => {}
            KeyOutcome::Ignored => {
                if key.code == KeyCode::Tab {
                    self.blur();
                }
            }
        }
    }

    fn handle_body_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j' | 'l') | KeyCode::Down | KeyCode::Right | KeyCode::PageDown => {
                if self.doc.next_page() {
                    self.announce_page_change();
                }
            }
            KeyCode::Char('k' | 'h') | KeyCode::Up | KeyCode::Left | KeyCode::PageUp => {
                if self.doc.prev_page() {
                    self.announce_page_change();
                }
            }
            KeyCode::Char('g') => {
                self.doc.first_page();
                self.bus.emit(Topic::FirstPage, &self.doc.snapshot());
            }
            KeyCode::Char('L') => {
                self.doc.toggle_labels();
                self.bus.emit(Topic::PageLabels, &self.doc.snapshot());
            }
            KeyCode::Tab | KeyCode::Enter => {
                self.focus = Focus::Indicator;
                self.indicator.on_focus_gained();
            }
            _ => {}
        }
    }

    /// Leaving the field commits whatever is in it.
    fn blur(&mut self) {
        self.commit();
        self.focus = Focus::Body;
    }

    fn commit(&mut self) {
        let before = self.doc.current_page_number();
        let text = self.indicator.on_commit(&mut self.doc);
        info!("demo: committed page request {text:?}");
        if self.doc.current_page_number() != before {
            self.announce_page_change();
        }
    }

    fn announce_page_change(&mut self) {
        self.bus.emit(Topic::PageChanging, &self.doc.snapshot());
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        let body = Paragraph::new(
            self.doc
                .body_lines()
                .into_iter()
                .map(Line::from)
                .collect::<Vec<_>>(),
        )
        .style(Style::default().fg(self.palette.base_05).bg(self.palette.base_00))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", self.doc.title()))
                .border_style(Style::default().fg(self.palette.base_03)),
        );
        f.render_widget(body, chunks[0]);

        let state = self.indicator.state();
        let bar_width = self.page_bar.desired_width(&state) + 1;
        let status = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(bar_width)])
            .split(chunks[1]);

        let hint = match self.focus {
            Focus::Body => " j/k: page | g: first | L: labels | Tab: page field | q: quit",
            Focus::Indicator => " type a page label | Enter: go | Esc/Tab: leave field",
        };
        f.render_widget(
            Paragraph::new(hint).style(Style::default().fg(self.palette.base_03)),
            status[0],
        );

        self.page_bar.render(
            f,
            status[1],
            &state,
            self.palette,
            self.focus == Focus::Indicator,
        );
    }
}

pub fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut dyn EventSource,
    tick_rate: Duration,
) -> Result<()>
where
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
{
    app.mount();

    loop {
        terminal.draw(|f| app.draw(f))?;

        if events.poll(tick_rate)? {
            if let Event::Key(key) = events.read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    app.unmount();
    Ok(())
}
