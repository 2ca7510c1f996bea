//! Modal dialog.
//!
//! The caller owns the open flag and reports it through [`Dialog::sync`];
//! the dialog never closes itself. Escape, a backdrop click and the header
//! close button all invoke `on_close`, and the caller decides what to do.
//!
//! While open the dialog holds exactly one document key listener. It is
//! released the moment the dialog is told to close, before the exit
//! animation plays, and when the dialog is dropped.

mod render;
mod state;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use insight_dom::{
    Document, Easing, Element, Key, ListenerGuard, Motion, Presence, PresenceChange, Rect,
    TrackId,
};
use log::debug;

use crate::callback::Callback;

pub use state::{DialogState, DialogTransition, DialogWidth};

static NEXT_DIALOG: AtomicU64 = AtomicU64::new(0);

/// Rows the panel travels while entering and exiting.
const PANEL_TRAVEL: f32 = 3.0;

pub struct Dialog {
    id: String,
    title: Option<String>,
    width: DialogWidth,
    on_close: Callback,
    open: bool,
    presence: Presence,
    overlay_opacity: TrackId,
    panel_opacity: TrackId,
    panel_offset: TrackId,
    listener: Option<ListenerGuard>,
}

impl std::fmt::Debug for Dialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialog")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("state", &self.state())
            .field("listening", &self.is_listening())
            .finish()
    }
}

impl Dialog {
    pub fn new(on_close: impl Into<Callback>) -> Self {
        let mut presence = Presence::new();
        let overlay_opacity =
            presence.add_track(0.0, 1.0, Motion::tween(Duration::from_millis(200), Easing::EaseOut));
        let panel_spring = Motion::spring(220.0, 25.0);
        let panel_opacity = presence.add_track(0.0, 1.0, panel_spring);
        let panel_offset = presence.add_track(PANEL_TRAVEL, 0.0, panel_spring);

        Self {
            id: format!("dialog-{}", NEXT_DIALOG.fetch_add(1, Ordering::Relaxed)),
            title: None,
            width: DialogWidth::default(),
            on_close: on_close.into(),
            open: false,
            presence,
            overlay_opacity,
            panel_opacity,
            panel_offset,
            listener: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Show a header with this title and a close button, and label the
    /// dialog by it.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn width(mut self, width: DialogWidth) -> Self {
        self.width = width;
        self
    }

    /// Skip enter and exit animations.
    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.presence.set_reduced_motion(enabled);
        self
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.presence.set_reduced_motion(enabled);
    }

    pub fn dialog_id(&self) -> &str {
        &self.id
    }

    /// Id of the header title element, present only when a title is set.
    pub fn title_id(&self) -> Option<String> {
        self.title.as_ref().map(|_| format!("{}-title", self.id))
    }

    pub fn panel_id(&self) -> String {
        format!("{}-panel", self.id)
    }

    pub fn close_button_id(&self) -> String {
        format!("{}-close", self.id)
    }

    pub fn content_id(&self) -> String {
        format!("{}-content", self.id)
    }

    /// Apply the caller's open flag.
    ///
    /// Opening attaches the Escape listener to `document` (when there is
    /// one; headless rendering passes `None`) and starts the enter
    /// animation. Closing detaches the listener immediately and starts the
    /// exit animation. Opening again while exiting reverses the animation
    /// from wherever it is. An open dialog synced without a document picks
    /// up the listener once one is supplied.
    pub fn sync(&mut self, open: bool, document: Option<&Document>, now: Instant) {
        if open == self.open {
            if open && self.listener.is_none() {
                self.listener = document.map(|doc| self.escape_listener(doc));
            }
            return;
        }
        self.open = open;

        if open {
            debug!("Dialog '{}' opening", self.id);
            self.listener = document.map(|doc| self.escape_listener(doc));
            self.presence.show(now);
        } else {
            debug!("Dialog '{}' closing", self.id);
            self.listener = None;
            self.presence.hide(now);
        }
    }

    fn escape_listener(&self, document: &Document) -> ListenerGuard {
        let on_close = self.on_close.clone();
        document.add_key_listener(move |event| {
            if event.key == Key::Escape {
                on_close.call();
            }
        })
    }

    /// Advance animations. Returns a transition when one completes.
    pub fn tick(&mut self, now: Instant) -> Option<DialogTransition> {
        let change = self.presence.tick(now)?;
        let transition = match change {
            PresenceChange::Entered => DialogTransition::Opened,
            PresenceChange::Exited => DialogTransition::Closed,
        };
        debug!("Dialog '{}' {:?}", self.id, transition);
        Some(transition)
    }

    pub fn state(&self) -> DialogState {
        self.presence.phase().into()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True while the dialog is in the element tree (open or exiting).
    pub fn is_mounted(&self) -> bool {
        self.presence.is_mounted()
    }

    /// True while the Escape listener is registered.
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.presence.is_animating()
    }

    /// The overlay subtree wrapping `content`, or None when closed.
    pub fn element(&self, content: Element, screen: Rect, now: Instant) -> Option<Element> {
        if !self.is_mounted() {
            return None;
        }
        let frame = render::Frame {
            overlay_opacity: self.presence.value(self.overlay_opacity, now),
            panel_opacity: self.presence.value(self.panel_opacity, now),
            panel_offset: self.presence.value(self.panel_offset, now),
        };
        Some(render::overlay(self, content, screen, frame))
    }
}
