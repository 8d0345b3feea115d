use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::kill_switch::KillSwitch;
use crate::status_led::StatusIndicator;

struct SwitchState {
    activated: bool,
    flip_after_checks: Option<u32>,
    checks: u32,
}

/// Scriptable safety interlock. `flip_after_checks` toggles the reported
/// state once after the given number of polls, which is how tests arm the
/// craft or yank the switch mid-flight without a second thread.
#[derive(Clone)]
pub struct SimKillSwitch {
    state: Arc<Mutex<SwitchState>>,
}

impl SimKillSwitch {
    pub fn new(activated: bool) -> Self {
        SimKillSwitch {
            state: Arc::new(Mutex::new(SwitchState {
                activated,
                flip_after_checks: None,
                checks: 0,
            })),
        }
    }

    pub fn set_activated(&self, activated: bool) {
        self.state.lock().unwrap().activated = activated;
    }

    pub fn flip_after_checks(&self, checks: u32) {
        self.state.lock().unwrap().flip_after_checks = Some(checks);
    }

    pub fn checks(&self) -> u32 {
        self.state.lock().unwrap().checks
    }
}

impl KillSwitch for SimKillSwitch {
    fn is_activated(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        state.checks += 1;
        if let Some(after) = state.flip_after_checks {
            if state.checks > after {
                state.activated = !state.activated;
                state.flip_after_checks = None;
            }
        }
        state.activated
    }
}

/// LED stand-in tracking on/off state and toggle count.
#[derive(Clone)]
pub struct SimStatusLed {
    on: Arc<AtomicBool>,
    toggles: Arc<AtomicU32>,
}

impl SimStatusLed {
    pub fn new() -> Self {
        SimStatusLed {
            on: Arc::new(AtomicBool::new(false)),
            toggles: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::Relaxed)
    }

    pub fn toggle_count(&self) -> u32 {
        self.toggles.load(Ordering::Relaxed)
    }
}

impl Default for SimStatusLed {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusIndicator for SimStatusLed {
    fn set_on(&self, on: bool) {
        self.on.store(on, Ordering::Relaxed);
    }

    fn toggle(&self) {
        self.on.fetch_xor(true, Ordering::Relaxed);
        self.toggles.fetch_add(1, Ordering::Relaxed);
    }
}
