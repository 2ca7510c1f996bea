use std::sync::Arc;

use log::{debug, trace, warn};
use tokio::sync::mpsc;

use super::{Lang, SpeechEngine, SpeechEvent, SpeechEvents, Utterance, UtteranceId};
use crate::error::SpeechError;
use crate::wakeup::WakeupSender;

/// The listen/stop toggle over a speech engine.
///
/// `is_speaking` follows the engine's reports: it turns on when the active
/// utterance starts and off when it ends, fails or is stopped. Reports for
/// any other utterance are ignored, so a stopped utterance that ends late
/// cannot switch off a newer one.
pub struct Narrator {
    engine: Arc<dyn SpeechEngine>,
    tx: mpsc::UnboundedSender<(UtteranceId, SpeechEvent)>,
    rx: mpsc::UnboundedReceiver<(UtteranceId, SpeechEvent)>,
    wakeup: Option<WakeupSender>,
    next_id: u64,
    active: Option<UtteranceId>,
    speaking: bool,
    last_error: Option<String>,
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator")
            .field("engine", &self.engine.name())
            .field("active", &self.active)
            .field("speaking", &self.speaking)
            .finish()
    }
}

impl Narrator {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            engine,
            tx,
            rx,
            wakeup: None,
            next_id: 0,
            active: None,
            speaking: false,
            last_error: None,
        }
    }

    /// Wake the event loop whenever the engine reports progress.
    pub fn with_wakeup(mut self, wakeup: WakeupSender) -> Self {
        self.wakeup = Some(wakeup);
        self
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    /// An utterance was requested and has not ended yet (it may not have started).
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<UtteranceId> {
        self.active
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Stop when something is playing or about to, otherwise start speaking `text`.
    pub fn toggle(&mut self, text: &str, lang: Lang) -> Result<(), SpeechError> {
        if self.active.is_some() {
            self.stop();
            Ok(())
        } else {
            self.speak(text, lang).map(|_| ())
        }
    }

    pub fn speak(&mut self, text: &str, lang: Lang) -> Result<UtteranceId, SpeechError> {
        let id = UtteranceId(self.next_id);
        self.next_id += 1;

        let events = SpeechEvents::new(id, self.tx.clone(), self.wakeup.clone());
        let utterance = Utterance {
            id,
            text: text.to_string(),
            lang,
        };

        self.active = Some(id);
        self.speaking = false;
        self.last_error = None;
        debug!("Narrating {:?} in {} via {}", id, lang, self.engine.name());

        if let Err(e) = self.engine.speak(utterance, events) {
            warn!("Speech engine {} failed: {}", self.engine.name(), e);
            self.active = None;
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        Ok(id)
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.active.take() {
            debug!("Stopping narration {:?}", id);
            self.engine.stop();
        }
        self.speaking = false;
    }

    /// Apply queued engine reports. Returns true when any applied.
    pub fn poll(&mut self) -> bool {
        let mut applied = false;
        while let Ok((id, event)) = self.rx.try_recv() {
            if self.active != Some(id) {
                trace!("Ignoring {:?} for stale utterance {:?}", event, id);
                continue;
            }
            applied = true;
            match event {
                SpeechEvent::Started => self.speaking = true,
                SpeechEvent::Ended => {
                    self.speaking = false;
                    self.active = None;
                }
                SpeechEvent::Failed(reason) => {
                    warn!("Narration {:?} failed: {}", id, reason);
                    self.speaking = false;
                    self.active = None;
                    self.last_error = Some(reason);
                }
            }
        }
        applied
    }
}

impl Drop for Narrator {
    fn drop(&mut self) {
        if self.active.is_some() {
            self.engine.stop();
        }
    }
}
