use log::debug;

use super::{SpeechEngine, SpeechEvents, Utterance};
use crate::error::SpeechError;

/// Engine that speaks nothing: every utterance starts and ends at once.
/// Used headless and when speech is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentEngine;

impl SpeechEngine for SilentEngine {
    fn name(&self) -> &str {
        "silent"
    }

    fn speak(&self, utterance: Utterance, events: SpeechEvents) -> Result<(), SpeechError> {
        debug!("Silent utterance {:?} ({} chars)", utterance.id, utterance.text.len());
        events.started();
        events.ended();
        Ok(())
    }

    fn stop(&self) {}
}
