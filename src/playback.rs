//! Audio backend seam
//!
//! Navigation only ever talks to `dyn Playback`. The binary and the tests use
//! `SimulatedPlayback`, which logs every call and fakes a running clock.

use anyhow::Result;
use log::{debug, info};
use parking_lot::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::nav::state::{self, StateObject};

/// One entry of the current track list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub title: String,
    pub duration: Option<Duration>,
}

/// Playback position reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackPosition {
    pub elapsed: Duration,
    pub duration: Option<Duration>,
}

impl TrackPosition {
    /// `m:ss` or `m:ss / m:ss`
    pub fn display(&self) -> String {
        fn mmss(d: Duration) -> String {
            let secs = d.as_secs();
            format!("{}:{:02}", secs / 60, secs % 60)
        }
        match self.duration {
            Some(total) => format!("{} / {}", mmss(self.elapsed), mmss(total)),
            None => mmss(self.elapsed),
        }
    }
}

pub trait Playback: Send + Sync {
    /// Start whatever `state` describes (a `url` or `file_name`)
    fn play(&self, state: &StateObject) -> Result<()>;

    fn play_pause(&self) -> Result<()>;

    fn stop(&self) -> Result<()>;

    fn set_volume(&self, level: u8) -> Result<()>;

    fn mute(&self, muted: bool) -> Result<()>;

    fn position(&self) -> Result<TrackPosition>;

    fn track_list(&self) -> Result<Vec<TrackInfo>> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Default)]
struct SimState {
    source: Option<String>,
    started: Option<Instant>,
    paused_at: Option<Duration>,
    volume: u8,
    muted: bool,
}

/// In-process backend that only logs
#[derive(Debug, Default)]
pub struct SimulatedPlayback {
    state: Mutex<SimState>,
}

impl SimulatedPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock()
    }

    pub fn source(&self) -> Option<String> {
        self.lock().source.clone()
    }

    pub fn volume(&self) -> u8 {
        self.lock().volume
    }

    pub fn is_muted(&self) -> bool {
        self.lock().muted
    }

    pub fn is_playing(&self) -> bool {
        let sim = self.lock();
        sim.started.is_some() && sim.paused_at.is_none()
    }
}

impl Playback for SimulatedPlayback {
    fn play(&self, state: &StateObject) -> Result<()> {
        let source = state
            .get_str(state::URL)
            .or_else(|| state.get_str(state::FILE_NAME))
            .or_else(|| state.get_str(state::NAME))
            .map(str::to_string);
        let Some(source) = source else {
            anyhow::bail!("Nothing to play in {}", state);
        };

        info!("Playing {}", source);
        let mut sim = self.lock();
        sim.source = Some(source);
        sim.started = Some(Instant::now());
        sim.paused_at = None;
        Ok(())
    }

    fn play_pause(&self) -> Result<()> {
        let mut sim = self.lock();
        let Some(started) = sim.started else {
            debug!("Play/pause with nothing loaded");
            return Ok(());
        };
        match sim.paused_at.take() {
            Some(elapsed) => {
                sim.started = Instant::now().checked_sub(elapsed).or(Some(started));
                info!("Resumed at {:?}", elapsed);
            }
            None => {
                let elapsed = started.elapsed();
                sim.paused_at = Some(elapsed);
                info!("Paused at {:?}", elapsed);
            }
        }
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        let mut sim = self.lock();
        if let Some(source) = sim.source.take() {
            info!("Stopped {}", source);
        }
        sim.started = None;
        sim.paused_at = None;
        Ok(())
    }

    fn set_volume(&self, level: u8) -> Result<()> {
        debug!("Volume {}", level);
        self.lock().volume = level.min(100);
        Ok(())
    }

    fn mute(&self, muted: bool) -> Result<()> {
        debug!("Mute {}", muted);
        self.lock().muted = muted;
        Ok(())
    }

    fn position(&self) -> Result<TrackPosition> {
        let sim = self.lock();
        let elapsed = match (sim.paused_at, sim.started) {
            (Some(paused), _) => paused,
            (None, Some(started)) => started.elapsed(),
            (None, None) => Duration::ZERO,
        };
        Ok(TrackPosition { elapsed, duration: None })
    }

    fn track_list(&self) -> Result<Vec<TrackInfo>> {
        Ok(self
            .lock()
            .source
            .iter()
            .map(|s| TrackInfo { title: s.clone(), duration: None })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_needs_a_source() {
        let playback = SimulatedPlayback::new();
        assert!(playback.play(&StateObject::new()).is_err());

        playback.play(&StateObject::new().with(state::URL, "http://radio.example")).unwrap();
        assert_eq!(playback.source().as_deref(), Some("http://radio.example"));
        assert!(playback.is_playing());
        assert_eq!(playback.track_list().unwrap().len(), 1);
    }

    #[test]
    fn test_pause_freezes_position() {
        let playback = SimulatedPlayback::new();
        playback.play(&StateObject::new().with(state::FILE_NAME, "a.mp3")).unwrap();
        playback.play_pause().unwrap();
        assert!(!playback.is_playing());
        let first = playback.position().unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(playback.position().unwrap(), first);

        playback.stop().unwrap();
        assert_eq!(playback.position().unwrap().elapsed, Duration::ZERO);
    }

    #[test]
    fn test_position_display() {
        let pos = TrackPosition {
            elapsed: Duration::from_secs(75),
            duration: Some(Duration::from_secs(600)),
        };
        assert_eq!(pos.display(), "1:15 / 10:00");
    }
}
