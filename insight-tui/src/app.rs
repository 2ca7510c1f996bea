//! Dashboard state: a district list with the summary modal over it.
//!
//! The app owns the modal's `open` flag. The modal only asks to close,
//! by sending [`AppMessage::CloseSummary`] from its `on_close`.

use std::time::Instant;

use insight_dom::{
    Align, Border, Color, Document, Edges, Element, Justify, Key, KeyEvent, LayoutResult, Rect,
    Size, Style, TextWrap,
};
use insight_ui::{Lang, Narrator, SummaryData, SummaryModal, theme};
use log::{debug, info};
use tokio::sync::mpsc;

const APP_BG: Color = Color::oklch(0.17, 0.012, 260.0);
const HINT: &str = "↑/↓ select · Enter open · l language · q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMessage {
    OpenSummary(usize),
    CloseSummary,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub lang: Lang,
    pub reduced_motion: bool,
}

pub struct App {
    districts: Vec<SummaryData>,
    selected: usize,
    open: bool,
    modal: SummaryModal,
    document: Option<Document>,
    messages: mpsc::UnboundedSender<AppMessage>,
    quit: bool,
}

impl App {
    /// Without a document the modal never listens for keys (headless use).
    pub fn new(
        districts: Vec<SummaryData>,
        narrator: Narrator,
        options: Options,
        document: Option<Document>,
    ) -> (Self, mpsc::UnboundedReceiver<AppMessage>) {
        let (messages, rx) = mpsc::unbounded_channel();
        let close = messages.clone();
        let modal = SummaryModal::new(
            move || {
                // Receiver lives as long as the event loop.
                let _ = close.send(AppMessage::CloseSummary);
            },
            narrator,
        )
        .id("summary")
        .reduced_motion(options.reduced_motion)
        .lang(options.lang);

        let app = Self {
            districts,
            selected: 0,
            open: false,
            modal,
            document,
            messages,
            quit: false,
        };
        (app, rx)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn lang(&self) -> Lang {
        self.modal.current_lang()
    }

    pub fn modal(&self) -> &SummaryModal {
        &self.modal
    }

    pub fn open_summary(&mut self, index: usize, now: Instant) {
        let Some(district) = self.districts.get(index) else {
            return;
        };
        info!("Opening summary for {}", district.name);
        self.selected = index;
        self.open = true;
        self.sync(now);
    }

    pub fn close_summary(&mut self, now: Instant) {
        if self.open {
            debug!("Closing summary");
        }
        self.open = false;
        self.sync(now);
    }

    fn sync(&mut self, now: Instant) {
        let summary = self.districts.get(self.selected);
        self.modal
            .sync(self.open, summary, self.document.as_ref(), now);
    }

    pub fn handle_message(&mut self, message: AppMessage, now: Instant) {
        match message {
            AppMessage::OpenSummary(index) => self.open_summary(index, now),
            AppMessage::CloseSummary => self.close_summary(now),
        }
    }

    pub fn handle_key(&mut self, event: KeyEvent, now: Instant) {
        if event.modifiers.ctrl && event.key == Key::Char('c') {
            info!("Quit requested");
            self.quit = true;
            return;
        }

        // Document listeners see every key; the modal's Escape handler lives here.
        if let Some(document) = &self.document {
            document.dispatch_key(&event);
        }

        if !event.modifiers.none() {
            return;
        }
        match event.key {
            Key::Char('l') => self.cycle_lang(),
            _ if self.open => {}
            Key::Up | Key::Char('k') => self.selected = self.selected.saturating_sub(1),
            Key::Down | Key::Char('j') => {
                if self.selected + 1 < self.districts.len() {
                    self.selected += 1;
                }
            }
            Key::Home => self.selected = 0,
            Key::End => self.selected = self.districts.len().saturating_sub(1),
            Key::Enter => self.open_summary(self.selected, now),
            Key::Char('q') => {
                info!("Quit requested");
                self.quit = true;
            }
            _ => {}
        }
    }

    fn cycle_lang(&mut self) {
        let lang = self.modal.current_lang().next();
        debug!("Narration language set to {}", lang);
        self.modal.set_lang(lang);
    }

    /// Track the pointer for chart tooltips. Returns true when a redraw is needed.
    pub fn hover(&mut self, layout: &LayoutResult, x: u16, y: u16) -> bool {
        self.open && self.modal.hover(layout, x, y)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.modal.tick(now)
    }

    pub fn is_animating(&self) -> bool {
        self.modal.is_animating()
    }

    pub fn element(&self, screen: Rect, now: Instant) -> Element {
        Element::col()
            .id("app")
            .width(Size::Fill)
            .height(Size::Fill)
            .padding(Edges::symmetric(1, 2))
            .gap(1)
            .align(Align::Stretch)
            .style(Style::new().background(APP_BG).foreground(theme::TEXT))
            .child(self.header())
            .child(self.district_list())
            .child(
                Element::text(HINT)
                    .id("hint")
                    .style(Style::new().foreground(theme::TEXT_MUTED)),
            )
            .child_opt(self.modal.element(screen, now))
    }

    fn header(&self) -> Element {
        Element::col()
            .id("header")
            .child(
                Element::text("MGNREGA District Insights")
                    .id("title")
                    .style(Style::new().foreground(theme::HEADING).bold()),
            )
            .child(
                Element::text(format!(
                    "{} districts · narration language: {}",
                    self.districts.len(),
                    self.lang()
                ))
                .id("subtitle")
                .style(Style::new().foreground(theme::TEXT_MUTED)),
            )
    }

    fn district_list(&self) -> Element {
        let list = Element::col()
            .id("districts")
            .width(Size::Fill)
            .height(Size::Fill)
            .padding(Edges::symmetric(0, 1))
            .align(Align::Stretch)
            .style(Style::new().border(Border::Rounded).foreground(theme::PANEL_BORDER));

        if self.districts.is_empty() {
            return list.child(
                Element::text("No districts loaded.")
                    .id("districts-empty")
                    .style(Style::new().foreground(theme::TEXT_MUTED)),
            );
        }

        list.children(
            self.districts
                .iter()
                .enumerate()
                .map(|(index, district)| self.district_row(index, district)),
        )
    }

    fn district_row(&self, index: usize, district: &SummaryData) -> Element {
        let selected = index == self.selected;
        let style = if selected {
            Style::new().background(theme::ACCENT_BG).foreground(theme::HEADING).bold()
        } else {
            Style::new().foreground(theme::TEXT)
        };
        let messages = self.messages.clone();

        Element::row()
            .id(format!("district-{index}"))
            .width(Size::Fill)
            .justify(Justify::SpaceBetween)
            .style(style)
            .on_click(move |_| {
                let _ = messages.send(AppMessage::OpenSummary(index));
            })
            .child(
                Element::text(district.heading())
                    .id(format!("district-{index}-name"))
                    .text_wrap(TextWrap::Truncate),
            )
            .child(
                Element::text(district.period())
                    .id(format!("district-{index}-period"))
                    .style(Style::new().foreground(theme::TEXT_MUTED)),
            )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use insight_dom::{MouseButton, Modifiers, dispatch_click, layout};
    use insight_ui::{DialogState, SilentEngine};

    use super::*;

    fn district(name: &str) -> SummaryData {
        SummaryData {
            name: name.into(),
            state: "Assam".into(),
            year: "2024-2025".into(),
            approved_labour_budget: Some(1_000_000.0),
            ..Default::default()
        }
    }

    fn app() -> (App, mpsc::UnboundedReceiver<AppMessage>) {
        App::new(
            vec![district("Kamrup"), district("Barpeta"), district("Majuli")],
            Narrator::new(Arc::new(SilentEngine)),
            Options {
                lang: Lang::En,
                reduced_motion: true,
            },
            Some(Document::new()),
        )
    }

    fn key(k: Key) -> KeyEvent {
        KeyEvent::plain(k)
    }

    fn drain(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppMessage>, now: Instant) {
        while let Ok(message) = rx.try_recv() {
            app.handle_message(message, now);
        }
        app.tick(now);
    }

    fn listeners(app: &App) -> usize {
        app.document.as_ref().map_or(0, Document::listener_count)
    }

    #[test]
    fn test_navigation_and_open() {
        let (mut app, _rx) = app();
        let now = Instant::now();

        app.handle_key(key(Key::Down), now);
        app.handle_key(key(Key::Char('j')), now);
        app.handle_key(key(Key::Down), now);
        assert_eq!(app.selected(), 2);

        app.handle_key(key(Key::Char('k')), now);
        assert_eq!(app.selected(), 1);

        app.handle_key(key(Key::Enter), now);
        assert!(app.is_open());
        assert_eq!(app.modal().summary().map(|s| s.name.as_str()), Some("Barpeta"));
        assert_eq!(listeners(&app), 1);
    }

    #[test]
    fn test_escape_closes_through_message() {
        let (mut app, mut rx) = app();
        let now = Instant::now();
        app.handle_key(key(Key::Enter), now);

        app.handle_key(key(Key::Escape), now);
        // Still open until the app applies the close request.
        assert!(app.is_open());

        drain(&mut app, &mut rx, now);
        assert!(!app.is_open());
        assert_eq!(listeners(&app), 0);
        assert_eq!(app.modal().state(), DialogState::Closed);

        // Escape with nothing open does nothing.
        app.handle_key(key(Key::Escape), now);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_list_keys_ignored_while_open() {
        let (mut app, _rx) = app();
        let now = Instant::now();
        app.handle_key(key(Key::Enter), now);

        app.handle_key(key(Key::Down), now);
        app.handle_key(key(Key::Char('q')), now);

        assert_eq!(app.selected(), 0);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _rx) = app();
        let now = Instant::now();
        app.handle_key(key(Key::Enter), now);

        app.handle_key(KeyEvent::new(Key::Char('c'), Modifiers::ctrl()), now);
        assert!(app.should_quit());

        let (mut app, _rx) = self::app();
        app.handle_key(key(Key::Char('q')), now);
        assert!(app.should_quit());
    }

    #[test]
    fn test_language_cycles() {
        let (mut app, _rx) = app();
        let now = Instant::now();

        app.handle_key(key(Key::Char('l')), now);
        assert_eq!(app.lang(), Lang::Hi);

        app.handle_key(key(Key::Enter), now);
        app.handle_key(key(Key::Char('l')), now);
        assert_eq!(app.lang(), Lang::As);
    }

    #[test]
    fn test_click_on_row_opens_district() {
        let (mut app, mut rx) = app();
        let now = Instant::now();
        let screen = Rect::from_size(100, 36);

        let root = app.element(screen, now);
        let result = layout(&root, screen);
        let row = result["district-2"];
        dispatch_click(&root, &result, row.x + 1, row.y, MouseButton::Left);
        drain(&mut app, &mut rx, now);

        assert!(app.is_open());
        assert_eq!(app.selected(), 2);
    }

    #[test]
    fn test_backdrop_click_closes() {
        let (mut app, mut rx) = app();
        let now = Instant::now();
        let screen = Rect::from_size(100, 36);
        app.open_summary(0, now);
        app.tick(now);

        let root = app.element(screen, now);
        let result = layout(&root, screen);
        dispatch_click(&root, &result, 0, 0, MouseButton::Left);
        drain(&mut app, &mut rx, now);

        assert!(!app.is_open());
    }
}
