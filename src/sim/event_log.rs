use std::sync::{Arc, Mutex};

use crate::flight_logger::FlightEventLog;

/// In-memory event log, records payloads without timestamps so tests can
/// assert on what the sequencer reported.
#[derive(Clone)]
pub struct SimEventLog {
    lines: Arc<Mutex<Vec<String>>>,
    started: Arc<Mutex<bool>>,
}

impl SimEventLog {
    pub fn new() -> Self {
        SimEventLog {
            lines: Arc::new(Mutex::new(Vec::new())),
            started: Arc::new(Mutex::new(false)),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .any(|line| line.contains(needle))
    }
}

impl Default for SimEventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightEventLog for SimEventLog {
    fn start(&mut self) {
        *self.started.lock().unwrap() = true;
    }

    fn log(&mut self, event: &str) {
        if *self.started.lock().unwrap() {
            self.lines.lock().unwrap().push(event.to_string());
        }
    }

    fn flush(&mut self) {}

    fn stop(&mut self) {
        *self.started.lock().unwrap() = false;
    }
}
