//! Background position polling for the active player screen

use log::{debug, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::nav::widgets::RedrawSignal;
use crate::playback::{Playback, TrackPosition};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Polls `Playback::position` on a worker thread until stopped or dropped
#[derive(Debug)]
pub struct PositionPoller {
    running: Arc<AtomicBool>,
    latest: Arc<Mutex<Option<TrackPosition>>>,
    handle: Option<JoinHandle<()>>,
}

impl PositionPoller {
    pub fn start(playback: Arc<dyn Playback>, interval: Duration, signal: RedrawSignal) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let latest = Arc::new(Mutex::new(None));

        let thread_running = running.clone();
        let thread_latest = latest.clone();
        let handle = thread::spawn(move || {
            debug!("Position poller started");
            while thread_running.load(Ordering::SeqCst) {
                match playback.position() {
                    Ok(position) => {
                        let changed = thread_latest.lock().replace(position) != Some(position);
                        if changed {
                            signal.request();
                        }
                    }
                    Err(e) => warn!("Failed to poll playback position: {:#}", e),
                }
                // Woken early by `stop`
                thread::park_timeout(interval);
            }
            debug!("Position poller stopped");
        });

        Self {
            running,
            latest,
            handle: Some(handle),
        }
    }

    pub fn latest(&self) -> Option<TrackPosition> {
        *self.latest.lock()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Idempotent
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                warn!("Position poller thread panicked");
            }
        }
    }
}

impl Drop for PositionPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
