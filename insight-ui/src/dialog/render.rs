use insight_dom::{
    Align, Backdrop, Border, Edges, Element, Justify, Position, Rect, Role, Size, Style,
};

use super::Dialog;
use crate::theme;

/// Overlay drawn above everything else in the tree.
const OVERLAY_Z: i16 = 100;
/// Backdrop darkening at full overlay opacity.
const BACKDROP_DIM: f32 = 0.35;

/// Animated values sampled for one frame.
#[derive(Debug, Clone, Copy)]
pub(super) struct Frame {
    pub overlay_opacity: f32,
    pub panel_opacity: f32,
    pub panel_offset: f32,
}

pub(super) fn overlay(dialog: &Dialog, content: Element, screen: Rect, frame: Frame) -> Element {
    let on_close = dialog.on_close.clone();
    let mut overlay = Element::col()
        .id(dialog.id.clone())
        .position(Position::Absolute)
        .width(Size::Fill)
        .height(Size::Fill)
        .z_index(OVERLAY_Z)
        .backdrop(Backdrop::Dim(BACKDROP_DIM * frame.overlay_opacity.clamp(0.0, 1.0)))
        .justify(Justify::Center)
        .align(Align::Center)
        .role(Role::Dialog)
        .aria_modal(true);

    // An exiting dialog is already closed; its backdrop stays inert.
    if dialog.open {
        overlay = overlay.on_click(move |_| on_close.call());
    }
    if let Some(title_id) = dialog.title_id() {
        overlay = overlay.labelled_by(title_id);
    }

    overlay.child(panel(dialog, content, screen, frame))
}

fn panel(dialog: &Dialog, content: Element, screen: Rect, frame: Frame) -> Element {
    let max_height = (screen.height as u32 * 9 / 10) as u16;
    Element::col()
        .id(dialog.panel_id())
        .width(Size::Fixed(dialog.width.resolve(screen.width)))
        .max_height(max_height)
        .position(Position::Relative)
        .top(frame.panel_offset.round() as i16)
        .padding(Edges::symmetric(1, 2))
        .gap(1)
        .style(
            Style::new()
                .background(theme::PANEL_BG)
                .foreground(theme::TEXT)
                .border(Border::Rounded)
                .opacity(frame.panel_opacity),
        )
        // Clicks inside the panel never reach the backdrop.
        .on_click(|event| event.stop_propagation())
        .child_opt(header(dialog))
        .child(
            Element::col()
                .id(dialog.content_id())
                .width(Size::Fill)
                .child(content),
        )
}

fn header(dialog: &Dialog) -> Option<Element> {
    let title = dialog.title.as_ref()?;
    let title_id = dialog.title_id()?;
    let on_close = dialog.on_close.clone();
    let mut close = Element::button("✕")
        .id(dialog.close_button_id())
        .aria_label("Close dialog")
        .style(Style::new().foreground(theme::TEXT_MUTED));
    if dialog.open {
        close = close.on_click(move |_| on_close.call());
    }

    Some(
        Element::row()
            .id(format!("{}-header", dialog.id))
            .width(Size::Fill)
            .justify(Justify::SpaceBetween)
            .child(
                Element::text(title.clone())
                    .id(title_id)
                    .role(Role::Heading)
                    .style(Style::new().foreground(theme::HEADING).bold()),
            )
            .child(close),
    )
}
