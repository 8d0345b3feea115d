//! Simulated flight hardware: register-level IMU bus, motor outputs, kill
//! switch, status LED and clock. Used by the integration tests and by the
//! bench binary; no real peripheral is touched anywhere in this tree.

pub mod clock;
pub mod event_log;
pub mod imu_bus;
pub mod motors;
pub mod switches;

use std::sync::{Arc, Mutex};

/// Cross-device event trace, for asserting ordering between sensor reads and
/// motor commands in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    SensorRead,
    ThrottleCommand,
    StopAll,
}

pub type SimTrace = Arc<Mutex<Vec<SimEvent>>>;

pub fn new_trace() -> SimTrace {
    Arc::new(Mutex::new(Vec::new()))
}
