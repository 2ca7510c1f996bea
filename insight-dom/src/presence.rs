//! Mount/unmount lifecycle with enter and exit animations.
//!
//! A [`Presence`] keeps a subtree mounted while its exit animation plays.
//! Each track animates one scalar between a hidden and a shown value. The
//! owner calls [`Presence::tick`] every frame and learns when an enter or
//! exit has finished.

use std::time::Instant;

use log::debug;

use crate::motion::Motion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresencePhase {
    Unmounted,
    Entering,
    Present,
    Exiting,
}

/// Reported by [`Presence::tick`] when a phase change completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceChange {
    Entered,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackId(usize);

/// One animated value.
#[derive(Debug, Clone)]
struct Track {
    hidden: f32,
    shown: f32,
    motion: Motion,
    from: f32,
    to: f32,
    /// None when the track is at rest on `to`.
    started: Option<Instant>,
}

impl Track {
    fn value(&self, now: Instant) -> f32 {
        match self.started {
            None => self.to,
            Some(start) => {
                let progress = self.motion.sample(now.saturating_duration_since(start));
                self.from + (self.to - self.from) * progress
            }
        }
    }

    fn is_settled(&self, now: Instant) -> bool {
        self.started
            .map_or(true, |start| self.motion.is_settled(now.saturating_duration_since(start)))
    }

    /// Retarget from wherever the value is right now.
    fn retarget(&mut self, to: f32, now: Instant, instant: bool) {
        self.from = if instant { to } else { self.value(now) };
        self.to = to;
        self.started = (!instant && self.from != to).then_some(now);
    }
}

#[derive(Debug, Clone)]
pub struct Presence {
    phase: PresencePhase,
    tracks: Vec<Track>,
    reduced_motion: bool,
    /// Completed change not yet reported by `tick` (reduced motion).
    pending: Option<PresenceChange>,
}

impl Default for Presence {
    fn default() -> Self {
        Self::new()
    }
}

impl Presence {
    pub fn new() -> Self {
        Self {
            phase: PresencePhase::Unmounted,
            tracks: Vec::new(),
            reduced_motion: false,
            pending: None,
        }
    }

    /// Add a track that rests at `hidden` while unmounted and at `shown` once present.
    pub fn add_track(&mut self, hidden: f32, shown: f32, motion: Motion) -> TrackId {
        self.tracks.push(Track {
            hidden,
            shown,
            motion,
            from: hidden,
            to: hidden,
            started: None,
        });
        TrackId(self.tracks.len() - 1)
    }

    /// When enabled, show and hide complete instantly.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn phase(&self) -> PresencePhase {
        self.phase
    }

    /// True while the subtree should be in the element tree.
    pub fn is_mounted(&self) -> bool {
        self.phase != PresencePhase::Unmounted
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, PresencePhase::Entering | PresencePhase::Exiting)
    }

    /// Start entering. While exiting, reverses from the current values.
    pub fn show(&mut self, now: Instant) {
        match self.phase {
            PresencePhase::Entering | PresencePhase::Present => return,
            PresencePhase::Unmounted | PresencePhase::Exiting => {}
        }
        debug!("Presence {:?} -> Entering", self.phase);
        let instant = self.reduced_motion;
        for track in &mut self.tracks {
            track.retarget(track.shown, now, instant);
        }
        if instant {
            self.phase = PresencePhase::Present;
            self.pending = Some(PresenceChange::Entered);
        } else {
            self.phase = PresencePhase::Entering;
            self.pending = None;
        }
    }

    /// Start exiting. While entering, reverses from the current values.
    pub fn hide(&mut self, now: Instant) {
        match self.phase {
            PresencePhase::Unmounted | PresencePhase::Exiting => return,
            PresencePhase::Entering | PresencePhase::Present => {}
        }
        debug!("Presence {:?} -> Exiting", self.phase);
        let instant = self.reduced_motion;
        for track in &mut self.tracks {
            track.retarget(track.hidden, now, instant);
        }
        if instant {
            self.phase = PresencePhase::Unmounted;
            self.pending = Some(PresenceChange::Exited);
        } else {
            self.phase = PresencePhase::Exiting;
            self.pending = None;
        }
    }

    /// Advance to `now`. Returns the change that completed, if any.
    pub fn tick(&mut self, now: Instant) -> Option<PresenceChange> {
        if let Some(change) = self.pending.take() {
            return Some(change);
        }
        if !self.is_animating() || !self.tracks.iter().all(|t| t.is_settled(now)) {
            return None;
        }
        for track in &mut self.tracks {
            track.from = track.to;
            track.started = None;
        }
        let (phase, change) = match self.phase {
            PresencePhase::Entering => (PresencePhase::Present, PresenceChange::Entered),
            _ => (PresencePhase::Unmounted, PresenceChange::Exited),
        };
        debug!("Presence {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        Some(change)
    }

    /// Current value of a track.
    pub fn value(&self, track: TrackId, now: Instant) -> f32 {
        self.tracks.get(track.0).map_or(0.0, |t| t.value(now))
    }
}
