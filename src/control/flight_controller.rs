use crate::config::constants::{
    FRONT_LEFT_TRIM, FRONT_RIGHT_TRIM, PID_OUTPUT_LIMIT, REAR_LEFT_TRIM, REAR_RIGHT_TRIM,
    ROLL_PITCH_KP, YAW_KP,
};
use crate::util::math::vectors::Orientation;

use super::pid::PID;

/// Raw per-axis PID outputs from the last mixing pass, kept for telemetry.
#[derive(Debug, Default, Clone, Copy)]
pub struct PidAxisOutputs {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

/// Throttle for each motor of the X frame. Not clamped here, the motor
/// actuator saturates to its own operating range.
#[derive(Debug, Default, Clone, Copy)]
pub struct MotorThrottles {
    pub front_right: f32,
    pub rear_right: f32,
    pub front_left: f32,
    pub rear_left: f32,
}

pub struct FlightController {
    roll_pid: PID,
    pitch_pid: PID,
    yaw_pid: PID,
    pid_outputs: PidAxisOutputs,
}

impl FlightController {
    pub fn new() -> Self {
        FlightController {
            roll_pid: PID::with_output_limits(
                ROLL_PITCH_KP,
                0.0,
                0.0,
                -PID_OUTPUT_LIMIT,
                PID_OUTPUT_LIMIT,
            ),
            pitch_pid: PID::with_output_limits(
                ROLL_PITCH_KP,
                0.0,
                0.0,
                -PID_OUTPUT_LIMIT,
                PID_OUTPUT_LIMIT,
            ),
            yaw_pid: PID::with_output_limits(
                YAW_KP,
                0.0,
                0.0,
                -PID_OUTPUT_LIMIT,
                PID_OUTPUT_LIMIT,
            ),
            pid_outputs: PidAxisOutputs::default(),
        }
    }

    /// Runs the three axis controllers on the attitude error and mixes their
    /// outputs with the base throttle into the four motor commands.
    pub fn compute_motor_throttles(
        &mut self,
        measured_angles: &Orientation,
        target_angles: &Orientation,
        dt: f32,
        base_throttle: f32,
    ) -> MotorThrottles {
        let error = measured_angles.clone() - target_angles.clone();

        let pid_roll = self.roll_pid.compute(error.roll, dt);
        let pid_pitch = self.pitch_pid.compute(error.pitch, dt);
        let pid_yaw = self.yaw_pid.compute(error.yaw, dt);

        self.pid_outputs = PidAxisOutputs {
            roll: pid_roll,
            pitch: pid_pitch,
            yaw: pid_yaw,
        };

        MotorThrottles {
            front_right: FRONT_RIGHT_TRIM * (base_throttle - pid_roll - pid_pitch + pid_yaw),
            rear_right: REAR_RIGHT_TRIM * (base_throttle - pid_roll + pid_pitch - pid_yaw),
            front_left: FRONT_LEFT_TRIM * (base_throttle + pid_roll - pid_pitch - pid_yaw),
            rear_left: REAR_LEFT_TRIM * (base_throttle + pid_roll + pid_pitch + pid_yaw),
        }
    }

    pub fn pid_outputs(&self) -> PidAxisOutputs {
        self.pid_outputs
    }
}

impl Default for FlightController {
    fn default() -> Self {
        Self::new()
    }
}
