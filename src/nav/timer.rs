//! Sleep, wake-up and power-off schedule
//!
//! A worker thread checks the schedule every tick and queues the matching
//! command for the event loop. It never navigates by itself.

use anyhow::Result;
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::TimerSettings;
use crate::nav::command::{Command, CommandQueue};
use crate::nav::session::{PlayerState, Session};

pub const TICK: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerAction {
    Sleep,
    WakeUp,
    PowerOff,
}

impl TimerAction {
    pub fn command(self) -> Command {
        match self {
            TimerAction::Sleep => Command::Sleep,
            TimerAction::WakeUp => Command::WakeUp,
            TimerAction::PowerOff => Command::Shutdown,
        }
    }
}

fn same_minute(a: NaiveTime, b: NaiveTime) -> bool {
    a.hour() == b.hour() && a.minute() == b.minute()
}

fn minute_of(now: NaiveDateTime) -> NaiveDateTime {
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

/// Decides which actions are due. Remembers the minute each action last
/// fired so a 2 s tick does not repeat it.
#[derive(Debug, Default)]
pub struct Schedule {
    last_fired: HashMap<TimerAction, NaiveDateTime>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn due(&mut self, settings: &TimerSettings, state: PlayerState, now: NaiveDateTime) -> Result<Vec<TimerAction>> {
        let time = now.time();
        let mut due = Vec::new();

        if let Some(at) = settings.sleep_at()? {
            if state == PlayerState::Running && same_minute(at, time) {
                due.push(TimerAction::Sleep);
            }
        }
        if let Some(at) = settings.wake_up_at()? {
            if state == PlayerState::Sleeping && same_minute(at, time) {
                due.push(TimerAction::WakeUp);
            }
        }
        if let Some(at) = settings.poweroff_at()? {
            if same_minute(at, time) {
                due.push(TimerAction::PowerOff);
            }
        }

        let minute = minute_of(now);
        due.retain(|action| self.last_fired.get(action) != Some(&minute));
        for action in &due {
            self.last_fired.insert(*action, minute);
        }
        Ok(due)
    }
}

/// Worker thread driving `Schedule` off the session's timer settings
#[derive(Debug)]
pub struct SleepTimer {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SleepTimer {
    pub fn start(session: Session, queue: CommandQueue, tick: Duration) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = running.clone();

        let handle = thread::spawn(move || {
            info!("Sleep timer started");
            let mut schedule = Schedule::new();
            while thread_running.load(Ordering::SeqCst) {
                let (settings, state) = {
                    let guard = session.lock();
                    let snapshot = guard.borrow();
                    (snapshot.timer.clone(), snapshot.player_state)
                };

                match schedule.due(&settings, state, Local::now().naive_local()) {
                    Ok(actions) => {
                        for action in actions {
                            info!("Timer fired {:?}", action);
                            queue.push(action.command());
                        }
                    }
                    Err(e) => warn!("Sleep timer tick failed: {:#}", e),
                }

                thread::park_timeout(tick);
            }
            debug!("Sleep timer stopped");
        });

        Self {
            running,
            handle: Some(handle),
        }
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
                warn!("Sleep timer thread panicked");
            }
        }
    }
}

impl Drop for SleepTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
