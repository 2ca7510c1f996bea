//! Text-to-speech behind a small engine trait.
//!
//! Engines report progress through [`SpeechEvents`], which queues the event
//! for the [`Narrator`] and wakes the event loop. Engines never call back
//! into UI state directly.

mod command;
mod narrator;
mod silent;

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::SpeechError;
use crate::wakeup::WakeupSender;

pub use command::{CommandEngine, DEFAULT_PROGRAM};
pub use narrator::Narrator;
pub use silent::SilentEngine;

/// Narration language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Hi,
    As,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::En, Lang::Hi, Lang::As];

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Hi => "hi",
            Lang::As => "as",
        }
    }

    /// The next language in `ALL`, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Lang::En => Lang::Hi,
            Lang::Hi => Lang::As,
            Lang::As => Lang::En,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Lang::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown language '{s}' (expected en, hi or as)"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtteranceId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub lang: Lang,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Started,
    Ended,
    Failed(String),
}

/// Reports progress of one utterance.
#[derive(Debug, Clone)]
pub struct SpeechEvents {
    id: UtteranceId,
    tx: mpsc::UnboundedSender<(UtteranceId, SpeechEvent)>,
    wakeup: Option<WakeupSender>,
}

impl SpeechEvents {
    pub(crate) fn new(
        id: UtteranceId,
        tx: mpsc::UnboundedSender<(UtteranceId, SpeechEvent)>,
        wakeup: Option<WakeupSender>,
    ) -> Self {
        Self { id, tx, wakeup }
    }

    pub fn id(&self) -> UtteranceId {
        self.id
    }

    pub fn started(&self) {
        self.send(SpeechEvent::Started);
    }

    pub fn ended(&self) {
        self.send(SpeechEvent::Ended);
    }

    pub fn failed(&self, reason: impl Into<String>) {
        self.send(SpeechEvent::Failed(reason.into()));
    }

    fn send(&self, event: SpeechEvent) {
        // Receiver gone means the narrator was dropped; nobody is listening.
        let _ = self.tx.send((self.id, event));
        if let Some(wakeup) = &self.wakeup {
            wakeup.send();
        }
    }
}

pub trait SpeechEngine: Send + Sync {
    fn name(&self) -> &str;

    /// Start speaking, replacing whatever is playing.
    fn speak(&self, utterance: Utterance, events: SpeechEvents) -> Result<(), SpeechError>;

    /// Stop playback. A no-op when nothing is playing.
    fn stop(&self);
}
