//! Click dispatch with bubbling.
//!
//! A click is delivered to the topmost element under the pointer, then to
//! each ancestor in turn, until a handler calls
//! [`ClickEvent::stop_propagation`] or the root is reached.

use log::trace;

use crate::element::{find_element, Element};
use crate::event::MouseButton;
use crate::hit::hit_path;
use crate::layout::LayoutResult;

#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// Deepest element under the pointer.
    pub target: String,
    pub x: u16,
    pub y: u16,
    current: String,
    stopped: bool,
}

impl ClickEvent {
    /// Element whose handler is currently running.
    pub fn current_target(&self) -> &str {
        &self.current
    }

    /// Prevent the click from reaching any further ancestors.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }
}

/// What happened to a dispatched click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub target: Option<String>,
    /// Ids whose handlers ran, innermost first.
    pub handled_by: Vec<String>,
    /// Element whose handler stopped propagation, if any.
    pub stopped_at: Option<String>,
}

/// Dispatch a pointer press at (x, y). Only the left button produces clicks.
pub fn dispatch_click(
    root: &Element,
    layout: &LayoutResult,
    x: u16,
    y: u16,
    button: MouseButton,
) -> DispatchOutcome {
    if button != MouseButton::Left {
        return DispatchOutcome::default();
    }

    let path = hit_path(layout, root, x, y);
    let Some(target) = path.last().cloned() else {
        return DispatchOutcome::default();
    };

    let mut event = ClickEvent {
        target: target.clone(),
        x,
        y,
        current: target.clone(),
        stopped: false,
    };
    let mut outcome = DispatchOutcome {
        target: Some(target),
        ..Default::default()
    };

    for id in path.iter().rev() {
        let Some(element) = find_element(root, id) else {
            continue;
        };
        let Some(handler) = &element.on_click else {
            continue;
        };
        event.current = id.clone();
        handler.call(&mut event);
        outcome.handled_by.push(id.clone());
        if event.stopped {
            trace!("Click propagation stopped at '{}'", id);
            outcome.stopped_at = Some(id.clone());
            break;
        }
    }

    trace!(
        "Click at ({}, {}) target={:?} handled_by={:?}",
        x,
        y,
        outcome.target,
        outcome.handled_by
    );
    outcome
}
