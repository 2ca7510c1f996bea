use std::collections::HashMap;
use std::process::Stdio;
use std::sync::{Mutex, MutexGuard};

use log::{debug, info, warn};
use tokio::process::Command;
use tokio::sync::oneshot;

use super::{Lang, SpeechEngine, SpeechEvents, Utterance, UtteranceId};
use crate::error::SpeechError;

pub const DEFAULT_PROGRAM: &str = "espeak-ng";

/// Speaks by running an external program as `<program> -v <voice> <text>`.
///
/// One child process at a time: a new utterance kills the previous one.
pub struct CommandEngine {
    program: String,
    voices: HashMap<Lang, String>,
    current: Mutex<Option<Playback>>,
}

struct Playback {
    id: UtteranceId,
    cancel: oneshot::Sender<()>,
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl CommandEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            voices: HashMap::new(),
            current: Mutex::new(None),
        }
    }

    /// Override the voice passed for `lang`. Defaults to the language code.
    pub fn voice(mut self, lang: Lang, voice: impl Into<String>) -> Self {
        self.voices.insert(lang, voice.into());
        self
    }

    pub fn voices(mut self, voices: impl IntoIterator<Item = (Lang, String)>) -> Self {
        self.voices.extend(voices);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn voice_for(&self, lang: Lang) -> &str {
        self.voices.get(&lang).map_or(lang.code(), String::as_str)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Playback>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SpeechEngine for CommandEngine {
    fn name(&self) -> &str {
        &self.program
    }

    fn speak(&self, utterance: Utterance, events: SpeechEvents) -> Result<(), SpeechError> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| SpeechError::Unavailable(e.to_string()))?;

        self.stop();

        let voice = self.voice_for(utterance.lang);
        let mut child = Command::new(&self.program)
            .arg("-v")
            .arg(voice)
            .arg(&utterance.text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        info!(
            "Speaking utterance {:?} with {} (voice {})",
            utterance.id, self.program, voice
        );

        let (cancel, cancelled) = oneshot::channel();
        *self.lock() = Some(Playback {
            id: utterance.id,
            cancel,
        });
        events.started();

        handle.spawn(async move {
            let finished = tokio::select! {
                status = child.wait() => Some(status),
                // Fires on an explicit stop and when a newer utterance replaces this one.
                _ = cancelled => None,
            };
            match finished {
                Some(Ok(status)) if status.success() => events.ended(),
                Some(Ok(status)) => events.failed(format!("speech program exited with {status}")),
                Some(Err(e)) => events.failed(e.to_string()),
                None => {
                    if let Err(e) = child.kill().await {
                        warn!("Failed to kill speech process: {}", e);
                    }
                    debug!("Utterance {:?} cancelled", events.id());
                    events.ended();
                }
            }
        });
        Ok(())
    }

    fn stop(&self) {
        if let Some(playback) = self.lock().take() {
            debug!("Stopping utterance {:?}", playback.id);
            // Already finished if the task is gone.
            let _ = playback.cancel.send(());
        }
    }
}
