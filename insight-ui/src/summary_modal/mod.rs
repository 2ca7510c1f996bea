//! District summary modal: heading, spoken summary toggle, bar chart.
//!
//! Built on [`Dialog`] (untitled, extra wide). Buttons inside the content
//! cannot borrow the modal, so they post [`SummaryAction`]s on a channel
//! that [`SummaryModal::tick`] drains.

mod render;

use std::time::Instant;

use insight_dom::{Document, Element, LayoutResult, Rect};
use log::{debug, warn};
use tokio::sync::mpsc;

use crate::callback::Callback;
use crate::chart::BarChart;
use crate::dialog::{Dialog, DialogState, DialogTransition, DialogWidth};
use crate::speech::{Lang, Narrator};
use crate::summary::{ChartPoint, SummaryData, chart_data, format, narration};

pub use render::{LISTEN_LABEL, STOP_LABEL, TREND_TEASER};

/// Height of the chart area in rows.
const CHART_HEIGHT: u16 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryAction {
    ToggleVoice,
}

pub struct SummaryModal {
    dialog: Dialog,
    on_close: Callback,
    summary: Option<SummaryData>,
    points: Vec<ChartPoint>,
    hovered: Option<usize>,
    narrator: Narrator,
    lang: Lang,
    actions_tx: mpsc::UnboundedSender<SummaryAction>,
    actions_rx: mpsc::UnboundedReceiver<SummaryAction>,
}

impl SummaryModal {
    pub fn new(on_close: impl Into<Callback>, narrator: Narrator) -> Self {
        let on_close = on_close.into();
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        Self {
            dialog: Dialog::new(on_close.clone()).width(DialogWidth::ThreeXl),
            on_close,
            summary: None,
            points: Vec::new(),
            hovered: None,
            narrator,
            lang: Lang::default(),
            actions_tx,
            actions_rx,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.dialog = self.dialog.id(id);
        self
    }

    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.dialog.set_reduced_motion(enabled);
        self
    }

    pub fn lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    pub fn set_lang(&mut self, lang: Lang) {
        self.lang = lang;
    }

    pub fn current_lang(&self) -> Lang {
        self.lang
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    pub fn summary(&self) -> Option<&SummaryData> {
        self.summary.as_ref()
    }

    pub fn chart_id(&self) -> String {
        format!("{}-chart", self.dialog.dialog_id())
    }

    /// Apply the caller's open flag and record. Without a record the modal
    /// stays closed and renders nothing. Closing stops any narration.
    pub fn sync(
        &mut self,
        open: bool,
        summary: Option<&SummaryData>,
        document: Option<&Document>,
        now: Instant,
    ) {
        if self.summary.as_ref() != summary {
            debug!(
                "Summary modal showing {:?}",
                summary.map(|s| s.name.as_str())
            );
            self.narrator.stop();
            self.summary = summary.cloned();
            self.points = summary.map(chart_data).unwrap_or_default();
            self.hovered = None;
        }

        let open = open && self.summary.is_some();
        if !open && self.dialog.is_open() {
            self.narrator.stop();
            self.hovered = None;
        }
        self.dialog.sync(open, document, now);
    }

    /// Handle queued button actions and speech reports, and advance
    /// animations. Returns true when something visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while let Ok(action) = self.actions_rx.try_recv() {
            match action {
                SummaryAction::ToggleVoice => self.toggle_voice(),
            }
            changed = true;
        }
        changed |= self.narrator.poll();
        if let Some(transition) = self.dialog.tick(now) {
            changed = true;
            if transition == DialogTransition::Closed {
                self.hovered = None;
            }
        }
        changed || self.dialog.is_animating()
    }

    /// Start or stop the spoken summary.
    pub fn toggle_voice(&mut self) {
        let Some(summary) = &self.summary else {
            return;
        };
        if let Err(e) = self.narrator.toggle(&narration(summary), self.lang) {
            warn!("Could not narrate summary: {}", e);
        }
    }

    /// Update the hovered bar from a pointer position. Returns true when it changed.
    pub fn hover(&mut self, layout: &LayoutResult, x: u16, y: u16) -> bool {
        let hovered = layout
            .get(&self.chart_id())
            .and_then(|&area| self.chart().bar_at(area, x, y));
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    pub fn hovered(&self) -> Option<&ChartPoint> {
        self.hovered.and_then(|i| self.points.get(i))
    }

    /// Tooltip for the hovered bar, e.g. `Approved Budget: ₹1,200,000`.
    pub fn tooltip(&self) -> Option<String> {
        self.hovered().map(|point| {
            format!(
                "{}: {}",
                point.label(),
                format::tooltip_value(point.metric, point.value)
            )
        })
    }

    pub fn is_speaking(&self) -> bool {
        self.narrator.is_speaking()
    }

    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    pub fn state(&self) -> DialogState {
        self.dialog.state()
    }

    pub fn is_listening(&self) -> bool {
        self.dialog.is_listening()
    }

    pub fn is_animating(&self) -> bool {
        self.dialog.is_animating()
    }

    pub fn is_mounted(&self) -> bool {
        self.summary.is_some() && self.dialog.is_mounted()
    }

    fn chart(&self) -> BarChart {
        BarChart::new(self.points.clone()).height(CHART_HEIGHT)
    }

    /// The modal subtree, or None when closed or without a record.
    pub fn element(&self, screen: Rect, now: Instant) -> Option<Element> {
        let summary = self.summary.as_ref()?;
        if !self.dialog.is_mounted() {
            return None;
        }
        let content = render::content(self, summary);
        self.dialog.element(content, screen, now)
    }
}
