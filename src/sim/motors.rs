use std::sync::{Arc, Mutex};

use crate::config::constants::MAX_THROTTLE;
use crate::output::motor_outputs::{Motor, MotorOutputs};

use super::{SimEvent, SimTrace};

struct MotorState {
    throttles: [i32; 4],
    stop_all_count: u32,
    trace: Option<SimTrace>,
}

/// Records every throttle command; saturates to [0, MAX_THROTTLE] the way
/// the PWM stage would. Clones share the same simulated ESC bank.
#[derive(Clone)]
pub struct SimMotorOutputs {
    state: Arc<Mutex<MotorState>>,
}

impl SimMotorOutputs {
    pub fn new() -> Self {
        SimMotorOutputs {
            state: Arc::new(Mutex::new(MotorState {
                throttles: [0; 4],
                stop_all_count: 0,
                trace: None,
            })),
        }
    }

    pub fn attach_trace(&self, trace: SimTrace) {
        self.state.lock().unwrap().trace = Some(trace);
    }

    pub fn throttles(&self) -> [i32; 4] {
        self.state.lock().unwrap().throttles
    }

    pub fn throttle(&self, motor: Motor) -> i32 {
        self.state.lock().unwrap().throttles[motor.index()]
    }

    pub fn stop_all_count(&self) -> u32 {
        self.state.lock().unwrap().stop_all_count
    }
}

impl Default for SimMotorOutputs {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorOutputs for SimMotorOutputs {
    fn set_throttle(&mut self, motor: Motor, throttle: i32) {
        let mut state = self.state.lock().unwrap();
        state.throttles[motor.index()] = throttle.clamp(0, MAX_THROTTLE);
        if let Some(trace) = &state.trace {
            trace.lock().unwrap().push(SimEvent::ThrottleCommand);
        }
    }

    fn stop_all(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.throttles = [0; 4];
        state.stop_all_count += 1;
        if let Some(trace) = &state.trace {
            trace.lock().unwrap().push(SimEvent::StopAll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_saturates_silently() {
        let mut motors = SimMotorOutputs::new();
        motors.set_throttle(Motor::FrontLeft, -500);
        motors.set_throttle(Motor::FrontRight, 1_000_000);
        assert_eq!(motors.throttle(Motor::FrontLeft), 0);
        assert_eq!(motors.throttle(Motor::FrontRight), MAX_THROTTLE);
    }

    #[test]
    fn stop_all_zeroes_every_motor() {
        let mut motors = SimMotorOutputs::new();
        for motor in Motor::ALL {
            motors.set_throttle(motor, 30_000);
        }
        motors.stop_all();
        assert_eq!(motors.throttles(), [0; 4]);
        assert_eq!(motors.stop_all_count(), 1);
    }
}
