use std::sync::atomic::{AtomicI16, AtomicI32, Ordering};

use crate::control::flight_controller::PidAxisOutputs;
use crate::util::math::vectors::Orientation;

/// Attitude angles in centidegrees, safe to share with the telemetry thread.
pub struct AtomicOrientation {
    pitch: AtomicI16,
    roll: AtomicI16,
    yaw: AtomicI16,
}

impl AtomicOrientation {
    pub const fn new() -> Self {
        Self {
            pitch: AtomicI16::new(0),
            roll: AtomicI16::new(0),
            yaw: AtomicI16::new(0),
        }
    }

    pub fn store(&self, angles: &Orientation) {
        self.pitch
            .store((angles.pitch * 100.0) as i16, Ordering::Release);
        self.roll
            .store((angles.roll * 100.0) as i16, Ordering::Release);
        self.yaw
            .store((angles.yaw * 100.0) as i16, Ordering::Release);
    }

    pub fn read(&self) -> Orientation {
        Orientation {
            pitch: self.pitch.load(Ordering::Relaxed) as f32 / 100.0,
            roll: self.roll.load(Ordering::Relaxed) as f32 / 100.0,
            yaw: self.yaw.load(Ordering::Relaxed) as f32 / 100.0,
        }
    }
}

/// Raw per-axis controller outputs in centiunits.
pub struct AtomicPidOutputs {
    roll: AtomicI32,
    pitch: AtomicI32,
    yaw: AtomicI32,
}

impl AtomicPidOutputs {
    pub const fn new() -> Self {
        Self {
            roll: AtomicI32::new(0),
            pitch: AtomicI32::new(0),
            yaw: AtomicI32::new(0),
        }
    }

    pub fn store(&self, outputs: &PidAxisOutputs) {
        self.roll
            .store((outputs.roll * 100.0) as i32, Ordering::Release);
        self.pitch
            .store((outputs.pitch * 100.0) as i32, Ordering::Release);
        self.yaw
            .store((outputs.yaw * 100.0) as i32, Ordering::Release);
    }

    pub fn read(&self) -> PidAxisOutputs {
        PidAxisOutputs {
            roll: self.roll.load(Ordering::Relaxed) as f32 / 100.0,
            pitch: self.pitch.load(Ordering::Relaxed) as f32 / 100.0,
            yaw: self.yaw.load(Ordering::Relaxed) as f32 / 100.0,
        }
    }
}

pub struct AtomicTelemetry {
    pub loop_exec_time_us: AtomicI32,
    pub orientation: AtomicOrientation,
    pub pid_outputs: AtomicPidOutputs,
    pub front_right_throttle: AtomicI32,
    pub rear_right_throttle: AtomicI32,
    pub front_left_throttle: AtomicI32,
    pub rear_left_throttle: AtomicI32,
    pub base_throttle: AtomicI32,
}

impl AtomicTelemetry {
    pub const fn new() -> Self {
        AtomicTelemetry {
            loop_exec_time_us: AtomicI32::new(0),
            orientation: AtomicOrientation::new(),
            pid_outputs: AtomicPidOutputs::new(),
            front_right_throttle: AtomicI32::new(0),
            rear_right_throttle: AtomicI32::new(0),
            front_left_throttle: AtomicI32::new(0),
            rear_left_throttle: AtomicI32::new(0),
            base_throttle: AtomicI32::new(0),
        }
    }
}

pub static TELEMETRY_SHARED: AtomicTelemetry = AtomicTelemetry::new();

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_utils::value_close_to;

    #[test]
    fn orientation_round_trips_at_centidegree_resolution() {
        let shared = AtomicOrientation::new();
        shared.store(&Orientation {
            pitch: 12.34,
            roll: -45.67,
            yaw: 179.99,
        });
        let angles = shared.read();
        assert!(value_close_to(12.34, angles.pitch, 0.01));
        assert!(value_close_to(-45.67, angles.roll, 0.01));
        assert!(value_close_to(179.99, angles.yaw, 0.01));
    }

    #[test]
    fn pid_outputs_round_trip_at_the_output_limit() {
        let shared = AtomicPidOutputs::new();
        shared.store(&PidAxisOutputs {
            roll: -5_000.0,
            pitch: 5_000.0,
            yaw: 1_234.56,
        });
        let outputs = shared.read();
        assert!(value_close_to(-5_000.0, outputs.roll, 0.01));
        assert!(value_close_to(5_000.0, outputs.pitch, 0.01));
        assert!(value_close_to(1_234.56, outputs.yaw, 0.01));
    }
}
