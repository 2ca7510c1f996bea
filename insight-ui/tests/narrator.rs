use std::sync::{Arc, Mutex};
use std::time::Duration;

use insight_ui::wakeup::{self, WakeupReceiver};
use insight_ui::{
    CommandEngine, Lang, Narrator, SilentEngine, SpeechEngine, SpeechError, SpeechEvents,
    Utterance, UtteranceId,
};

/// Engine that keeps every utterance's reporter so tests decide when
/// playback starts and ends.
#[derive(Default)]
struct ScriptedEngine {
    spoken: Mutex<Vec<(Utterance, SpeechEvents)>>,
    stops: Mutex<usize>,
}

impl ScriptedEngine {
    fn events(&self, index: usize) -> SpeechEvents {
        self.spoken.lock().unwrap()[index].1.clone()
    }

    fn utterance(&self, index: usize) -> Utterance {
        self.spoken.lock().unwrap()[index].0.clone()
    }

    fn stops(&self) -> usize {
        *self.stops.lock().unwrap()
    }
}

impl SpeechEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    fn speak(&self, utterance: Utterance, events: SpeechEvents) -> Result<(), SpeechError> {
        self.spoken.lock().unwrap().push((utterance, events));
        Ok(())
    }

    fn stop(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

fn scripted() -> (Arc<ScriptedEngine>, Narrator) {
    let engine = Arc::new(ScriptedEngine::default());
    let narrator = Narrator::new(engine.clone());
    (engine, narrator)
}

/// Poll until the narrator goes idle or the deadline passes.
async fn wait_idle(narrator: &mut Narrator, wakeups: &mut WakeupReceiver) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while narrator.is_active() {
        narrator.poll();
        if !narrator.is_active() {
            break;
        }
        let _ = tokio::time::timeout_at(deadline, wakeups.recv()).await;
        if tokio::time::Instant::now() >= deadline {
            break;
        }
    }
}

// ============================================================================
// Toggle
// ============================================================================

#[test]
fn test_speaking_follows_engine_reports() {
    let (engine, mut narrator) = scripted();

    narrator.toggle("hello", Lang::Hi).unwrap();
    assert!(narrator.is_active());
    assert!(!narrator.is_speaking());

    let utterance = engine.utterance(0);
    assert_eq!(utterance.text, "hello");
    assert_eq!(utterance.lang, Lang::Hi);

    engine.events(0).started();
    assert!(narrator.poll());
    assert!(narrator.is_speaking());

    engine.events(0).ended();
    assert!(narrator.poll());
    assert!(!narrator.is_speaking());
    assert!(!narrator.is_active());
}

#[test]
fn test_toggle_while_speaking_stops() {
    let (engine, mut narrator) = scripted();

    narrator.toggle("hello", Lang::En).unwrap();
    engine.events(0).started();
    narrator.poll();

    narrator.toggle("hello", Lang::En).unwrap();

    assert_eq!(engine.stops(), 1);
    assert!(!narrator.is_speaking());
    assert!(!narrator.is_active());
    assert_eq!(engine.spoken.lock().unwrap().len(), 1);
}

#[test]
fn test_toggle_before_start_stops() {
    let (engine, mut narrator) = scripted();

    narrator.toggle("hello", Lang::En).unwrap();
    narrator.toggle("hello", Lang::En).unwrap();

    assert_eq!(engine.stops(), 1);
    assert!(!narrator.is_active());
}

#[test]
fn test_stale_end_does_not_clear_newer_utterance() {
    let (engine, mut narrator) = scripted();

    narrator.toggle("first", Lang::En).unwrap();
    engine.events(0).started();
    narrator.poll();
    narrator.toggle("first", Lang::En).unwrap();

    narrator.toggle("second", Lang::En).unwrap();
    engine.events(1).started();

    // The stopped utterance reports its end after the new one started.
    engine.events(0).ended();
    narrator.poll();

    assert!(narrator.is_speaking());
    assert_eq!(narrator.active(), Some(UtteranceId(1)));
}

#[test]
fn test_failure_is_recorded() {
    let (engine, mut narrator) = scripted();

    narrator.toggle("hello", Lang::En).unwrap();
    engine.events(0).started();
    engine.events(0).failed("no audio device");
    narrator.poll();

    assert!(!narrator.is_speaking());
    assert!(!narrator.is_active());
    assert_eq!(narrator.last_error(), Some("no audio device"));
}

#[test]
fn test_stop_when_idle_does_not_touch_engine() {
    let (engine, mut narrator) = scripted();
    narrator.stop();
    assert_eq!(engine.stops(), 0);
}

#[test]
fn test_drop_stops_active_utterance() {
    let (engine, mut narrator) = scripted();
    narrator.toggle("hello", Lang::En).unwrap();

    drop(narrator);

    assert_eq!(engine.stops(), 1);
}

#[test]
fn test_reports_wake_the_loop() {
    let engine = Arc::new(ScriptedEngine::default());
    let (tx, mut rx) = wakeup::channel();
    let mut narrator = Narrator::new(engine.clone()).with_wakeup(tx);

    narrator.toggle("hello", Lang::En).unwrap();
    engine.events(0).started();

    assert_eq!(rx.drain(), 1);
}

// ============================================================================
// Engines
// ============================================================================

#[test]
fn test_silent_engine_starts_and_ends() {
    let mut narrator = Narrator::new(Arc::new(SilentEngine));

    narrator.toggle("hello", Lang::As).unwrap();
    assert!(narrator.poll());

    assert!(!narrator.is_active());
    assert!(!narrator.is_speaking());
    assert_eq!(narrator.last_error(), None);
}

#[test]
fn test_command_engine_needs_runtime() {
    let mut narrator = Narrator::new(Arc::new(CommandEngine::new("true")));

    let result = narrator.toggle("hello", Lang::En);

    assert!(matches!(result, Err(SpeechError::Unavailable(_))));
    assert!(!narrator.is_active());
    assert!(narrator.last_error().is_some());
}

#[test]
fn test_command_engine_voices() {
    let engine = CommandEngine::default().voice(Lang::Hi, "hi+f3");
    assert_eq!(engine.program(), "espeak-ng");
    assert_eq!(engine.voice_for(Lang::Hi), "hi+f3");
    assert_eq!(engine.voice_for(Lang::As), "as");
}

#[tokio::test]
async fn test_command_engine_missing_program() {
    let mut narrator = Narrator::new(Arc::new(CommandEngine::new(
        "insight-no-such-speech-program",
    )));

    let result = narrator.toggle("hello", Lang::En);

    assert!(matches!(result, Err(SpeechError::Spawn { .. })));
    assert!(!narrator.is_active());
}

#[cfg(unix)]
#[tokio::test]
async fn test_command_engine_runs_to_completion() {
    let (tx, mut rx) = wakeup::channel();
    let mut narrator = Narrator::new(Arc::new(CommandEngine::new("true"))).with_wakeup(tx);

    narrator.toggle("hello", Lang::En).unwrap();
    wait_idle(&mut narrator, &mut rx).await;

    assert!(!narrator.is_active());
    assert_eq!(narrator.last_error(), None);
}

#[cfg(unix)]
#[tokio::test]
async fn test_command_engine_reports_exit_failure() {
    let (tx, mut rx) = wakeup::channel();
    let mut narrator = Narrator::new(Arc::new(CommandEngine::new("false"))).with_wakeup(tx);

    narrator.toggle("hello", Lang::En).unwrap();
    wait_idle(&mut narrator, &mut rx).await;

    assert!(!narrator.is_active());
    assert!(narrator.last_error().is_some());
}

#[cfg(unix)]
#[tokio::test]
async fn test_command_engine_replaces_running_utterance() {
    use std::os::unix::fs::PermissionsExt;

    let script = std::env::temp_dir().join(format!("insight-slow-tts-{}", std::process::id()));
    std::fs::write(&script, "#!/bin/sh\nsleep 5\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let engine = CommandEngine::new(script.to_string_lossy());
    let mut narrator = Narrator::new(Arc::new(engine));

    // A freshly written script can briefly be busy for exec.
    let mut started = narrator.toggle("first", Lang::En);
    for _ in 0..10 {
        if !matches!(started, Err(SpeechError::Spawn { .. })) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        started = narrator.toggle("first", Lang::En);
    }
    started.unwrap();
    narrator.poll();
    assert!(narrator.is_speaking());

    narrator.toggle("first", Lang::En).unwrap();
    assert!(!narrator.is_speaking());

    narrator.toggle("second", Lang::En).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    narrator.poll();

    // The killed first process ends, but only the second counts.
    assert!(narrator.is_speaking());
    assert_eq!(narrator.active(), Some(UtteranceId(1)));

    narrator.stop();
    let _ = std::fs::remove_file(&script);
}
