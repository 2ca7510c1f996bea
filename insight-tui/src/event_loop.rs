//! Terminal event loop.
//!
//! Sleeps in `tokio::select!` until input, an app message or a speech
//! wakeup arrives. The frame timer only runs while the modal animates.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::EventStream;
use futures::StreamExt;
use insight_dom::{
    Document, Element, Event, LayoutResult, Rect, Terminal, convert_event, dispatch_click,
};
use insight_ui::{Narrator, SpeechEngine, SummaryData, wakeup};
use log::{debug, error, info, trace};
use tokio::time::{Duration, MissedTickBehavior};

use crate::app::{App, Options};
use crate::error::AppError;

/// Animation frame interval, about 60 fps.
const FRAME: Duration = Duration::from_millis(16);

pub async fn run(
    districts: Vec<SummaryData>,
    engine: Arc<dyn SpeechEngine>,
    options: Options,
) -> Result<(), AppError> {
    let (wakeup_tx, mut wakeup_rx) = wakeup::channel();
    let narrator = Narrator::new(engine).with_wakeup(wakeup_tx);
    let (mut app, mut messages) = App::new(districts, narrator, options, Some(Document::new()));

    let mut terminal = Terminal::new().map_err(AppError::Terminal)?;
    let (width, height) = terminal.size();
    let mut screen = Rect::from_size(width, height);

    let mut events = EventStream::new();
    let mut frames = tokio::time::interval(FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut root = Element::box_();
    let mut dirty = true;
    info!("Event loop started at {}x{}", width, height);

    loop {
        let now = Instant::now();
        dirty |= app.tick(now);
        if dirty {
            root = app.element(screen, now);
            terminal.render(&root).map_err(AppError::Terminal)?;
            dirty = false;
        }
        if app.should_quit() {
            break;
        }
        let animating = app.is_animating();

        tokio::select! {
            next = events.next() => match next {
                Some(Ok(raw)) => {
                    trace!("Crossterm event: {:?}", raw);
                    if let Some(event) = convert_event(raw) {
                        dirty |= handle_event(&mut app, &root, terminal.layout(), &mut screen, event);
                    }
                }
                Some(Err(e)) => error!("Event stream error: {}", e),
                None => {
                    info!("Event stream closed");
                    break;
                }
            },

            Some(message) = messages.recv() => {
                debug!("App message: {:?}", message);
                app.handle_message(message, Instant::now());
                dirty = true;
            }

            Some(()) = wakeup_rx.recv() => {
                // Several reports collapse into one redraw.
                wakeup_rx.drain();
                dirty = true;
            }

            _ = frames.tick(), if animating => {
                dirty = true;
            }
        }
    }

    info!("Event loop finished");
    Ok(())
}

/// Returns true when the event may have changed what is on screen.
fn handle_event(
    app: &mut App,
    root: &Element,
    layout: &LayoutResult,
    screen: &mut Rect,
    event: Event,
) -> bool {
    match event {
        Event::Key(key) => {
            app.handle_key(key, Instant::now());
            true
        }
        Event::Click { x, y, button } => {
            let outcome = dispatch_click(root, layout, x, y, button);
            trace!("Click at ({}, {}): {:?}", x, y, outcome);
            !outcome.handled_by.is_empty()
        }
        Event::MouseMove { x, y } => app.hover(layout, x, y),
        Event::Resize { width, height } => {
            *screen = Rect::from_size(width, height);
            true
        }
    }
}
