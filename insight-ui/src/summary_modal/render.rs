use insight_dom::{Align, Element, Justify, Role, Size, Style, TextAlign, TextWrap};

use super::{SummaryAction, SummaryModal};
use crate::summary::SummaryData;
use crate::theme;

pub const LISTEN_LABEL: &str = "Listen Summary";
pub const STOP_LABEL: &str = "Stop Listening";
pub const TREND_TEASER: &str = "📆 Yearly Trend (Coming Soon): Compare yearly MGNREGA performance and hear changes for deeper insights.";
const HOVER_HINT: &str = "Point at a bar to see its exact value";

pub(super) fn content(modal: &SummaryModal, summary: &SummaryData) -> Element {
    let id = modal.dialog.dialog_id();

    Element::col()
        .id(format!("{id}-body"))
        .width(Size::Fill)
        .align(Align::Stretch)
        .gap(1)
        .child(dismiss_row(modal, id))
        .child(
            Element::col()
                .id(format!("{id}-heading"))
                .align(Align::Stretch)
                .child(
                    centered(summary.heading())
                        .id(format!("{id}-name"))
                        .role(Role::Heading)
                        .style(Style::new().foreground(theme::HEADING).bold()),
                )
                .child(
                    centered(summary.period())
                        .id(format!("{id}-period"))
                        .style(Style::new().foreground(theme::TEXT_MUTED)),
                ),
        )
        .child(voice_row(modal, id))
        .child(
            Element::custom(modal.chart())
                .id(modal.chart_id())
                .role(Role::Img)
                .aria_label("Summary bar chart")
                .width(Size::Fill)
                .height(Size::Fixed(super::CHART_HEIGHT)),
        )
        .child(
            centered(modal.tooltip().unwrap_or_else(|| HOVER_HINT.to_string()))
                .id(format!("{id}-tooltip"))
                .style(Style::new().foreground(if modal.hovered.is_some() {
                    theme::TEXT
                } else {
                    theme::TEXT_MUTED
                })),
        )
        .child(
            centered(TREND_TEASER)
                .id(format!("{id}-trend"))
                .text_wrap(TextWrap::Wrap)
                .style(Style::new().foreground(theme::TEXT_MUTED)),
        )
        .child(cta_row(modal, id))
}

fn centered(text: impl Into<String>) -> Element {
    Element::text(text)
        .width(Size::Fill)
        .text_align(TextAlign::Center)
}

fn dismiss_row(modal: &SummaryModal, id: &str) -> Element {
    let mut dismiss = Element::button(" ✕ ")
        .id(format!("{id}-dismiss"))
        .aria_label("Close")
        .style(Style::new().background(theme::ACCENT_BG).foreground(theme::TEXT));
    if modal.dialog.is_open() {
        let on_close = modal.on_close.clone();
        dismiss = dismiss.on_click(move |_| on_close.call());
    }
    Element::row()
        .width(Size::Fill)
        .justify(Justify::End)
        .child(dismiss)
}

fn voice_row(modal: &SummaryModal, id: &str) -> Element {
    let speaking = modal.is_speaking();
    let (label, fg, bg) = if speaking {
        (format!(" ■ {STOP_LABEL} "), theme::DANGER, theme::DANGER_BG)
    } else {
        (format!(" ♪ {LISTEN_LABEL} "), theme::ACCENT, theme::ACCENT_BG)
    };
    let mut listen = Element::button(label)
        .id(format!("{id}-listen"))
        .style(Style::new().foreground(fg).background(bg).bold());
    if modal.dialog.is_open() {
        let actions = modal.actions_tx.clone();
        listen = listen.on_click(move |_| {
            // Receiver lives as long as the modal.
            let _ = actions.send(SummaryAction::ToggleVoice);
        });
    }

    Element::row()
        .width(Size::Fill)
        .justify(Justify::Center)
        .child(listen)
}

fn cta_row(modal: &SummaryModal, id: &str) -> Element {
    let mut cta = Element::button("  Close  ")
        .id(format!("{id}-cta"))
        .style(Style::new().background(theme::CTA_BG).foreground(theme::HEADING).bold());
    if modal.dialog.is_open() {
        let on_close = modal.on_close.clone();
        cta = cta.on_click(move |_| on_close.call());
    }
    Element::row()
        .width(Size::Fill)
        .justify(Justify::Center)
        .child(cta)
}
