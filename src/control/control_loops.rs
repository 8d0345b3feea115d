use crate::config::constants::{
    ARM_POLL_INTERVAL_MS, ARM_WAIT_BLINK_PERIOD_MS, CALIBRATION_SAMPLES, CRASH_BLINK_PERIOD_MS,
    CRASH_SIGNAL_DURATION_MS, HOVER_DURATION_MS, LANDING_DURATION_MS, LIFT_OFF_DURATION_MS,
    LOG_FLUSH_INTERVAL_MS, LOOP_INTERVAL_MS, MAX_BASE_THROTTLE,
};
use crate::drivers::imu_sensors::ImuSensor;
use crate::flight_logger::FlightEventLog;
use crate::kill_switch::KillSwitch;
use crate::output::motor_outputs::{Motor, MotorOutputs};
use crate::shared_core_values::AtomicTelemetry;
use crate::status_led::StatusIndicator;
use crate::threads::Blinker;
use crate::util::error::FlightError;
use crate::util::math::vectors::Orientation;
use crate::util::time::{ticks_diff, TickSource};

use super::crash_detector::CrashDetector;
use super::flight_controller::{FlightController, MotorThrottles};
use super::orientation_estimator::OrientationEstimator;

use std::sync::atomic::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    AwaitingArm,
    Calibrating,
    LiftOff,
    Hover,
    Landing,
    Aborted,
    Complete,
}

/// Durations and throttle ceiling of the scripted flight timeline.
#[derive(Debug, Clone, Copy)]
pub struct FlightPlan {
    pub lift_off_ms: u32,
    pub hover_ms: u32,
    pub landing_ms: u32,
    pub max_base_throttle: f32,
}

impl Default for FlightPlan {
    fn default() -> Self {
        FlightPlan {
            lift_off_ms: LIFT_OFF_DURATION_MS,
            hover_ms: HOVER_DURATION_MS,
            landing_ms: LANDING_DURATION_MS,
            max_base_throttle: MAX_BASE_THROTTLE,
        }
    }
}

#[derive(Clone, Copy)]
enum ThrottleProfile {
    RampUp,
    Hold,
    RampDown,
}

impl ThrottleProfile {
    fn base_throttle(&self, elapsed_ms: u32, duration_ms: u32, max: f32) -> f32 {
        let progress = elapsed_ms as f32 / duration_ms as f32;
        match self {
            ThrottleProfile::RampUp => progress * max,
            ThrottleProfile::Hold => max,
            ThrottleProfile::RampDown => (1.0 - progress) * max,
        }
    }
}

enum PhaseExit {
    Elapsed,
    Aborted,
}

/// Top-level state machine driving one scripted flight: arm-wait,
/// calibration, lift-off, hover, landing. Every exit path, clean or not,
/// zeroes the motors before control is yielded.
pub struct FlightSequencer<I, M, K, S, L, T>
where
    I: ImuSensor,
    M: MotorOutputs,
    K: KillSwitch,
    S: StatusIndicator + Clone + 'static,
    L: FlightEventLog,
    T: TickSource,
{
    imu: I,
    motors: M,
    kill_switch: K,
    status_led: S,
    logger: L,
    ticks: T,
    telemetry: &'static AtomicTelemetry,
    plan: FlightPlan,
    estimator: OrientationEstimator,
    controller: FlightController,
    crash_detector: CrashDetector,
    target_angles: Orientation,
    phase: FlightPhase,
    last_tick_ms: u32,
}

impl<I, M, K, S, L, T> FlightSequencer<I, M, K, S, L, T>
where
    I: ImuSensor,
    M: MotorOutputs,
    K: KillSwitch,
    S: StatusIndicator + Clone + 'static,
    L: FlightEventLog,
    T: TickSource,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        imu: I,
        motors: M,
        kill_switch: K,
        status_led: S,
        logger: L,
        ticks: T,
        telemetry: &'static AtomicTelemetry,
        plan: FlightPlan,
    ) -> Self {
        FlightSequencer {
            imu,
            motors,
            kill_switch,
            status_led,
            logger,
            ticks,
            telemetry,
            plan,
            estimator: OrientationEstimator::new(),
            controller: FlightController::new(),
            crash_detector: CrashDetector,
            // Pure stabilization, hold level attitude through the timeline.
            target_angles: Orientation::default(),
            phase: FlightPhase::AwaitingArm,
            last_tick_ms: 0,
        }
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    /// Runs the whole timeline to a terminal phase. `Ok` carries the phase
    /// the flight ended in, `Err` a hardware fault; motors are already
    /// stopped in both cases.
    pub fn run(&mut self) -> Result<FlightPhase, FlightError> {
        log::info!("Waiting for kill switch to be deactivated...");
        let blinker = Blinker::start(&self.status_led, ARM_WAIT_BLINK_PERIOD_MS);
        while self.kill_switch.is_activated() {
            self.ticks.delay_ms(ARM_POLL_INTERVAL_MS);
        }
        blinker.stop();
        self.status_led.set_on(true);
        log::info!("Kill switch deactivated");

        self.logger.start();
        self.logger.log("Flight controller program started");
        self.logger.log("Kill switch deactivated");

        self.phase = FlightPhase::Calibrating;
        if let Err(err) = self.imu.power_on() {
            return self.fatal(err);
        }
        self.logger.log("IMU powered on");
        log::info!("IMU powered on, starting calibration...");

        match self.imu.calibrate(CALIBRATION_SAMPLES) {
            Ok(offsets) => self.logger.log(&format!(
                "Calibration completed: accel_offset={:?}, gyro_offset={:?}",
                offsets.accel, offsets.gyro
            )),
            Err(err) => return self.fatal(err),
        }

        self.logger.log("Starting flight sequence");
        self.last_tick_ms = self.ticks.ticks_ms();

        let timeline = [
            (
                FlightPhase::LiftOff,
                self.plan.lift_off_ms,
                ThrottleProfile::RampUp,
                "Starting lift-off",
            ),
            (
                FlightPhase::Hover,
                self.plan.hover_ms,
                ThrottleProfile::Hold,
                "Starting hover",
            ),
            (
                FlightPhase::Landing,
                self.plan.landing_ms,
                ThrottleProfile::RampDown,
                "Starting landing",
            ),
        ];

        for (phase, duration_ms, profile, banner) in timeline {
            self.phase = phase;
            log::info!("{banner}");
            self.logger.log(banner);

            match self.fly_phase(duration_ms, profile) {
                Ok(PhaseExit::Elapsed) => {}
                Ok(PhaseExit::Aborted) => {
                    self.phase = FlightPhase::Aborted;
                    self.logger.stop();
                    return Ok(FlightPhase::Aborted);
                }
                Err(err) => return self.fatal(err),
            }
        }

        self.motors.stop_all();
        self.phase = FlightPhase::Complete;
        log::info!("Landing complete. Motors stopped.");
        self.logger.log("Landing complete");
        self.logger.stop();
        self.status_led.set_on(false);
        Ok(FlightPhase::Complete)
    }

    /// One timed phase of the flight timeline: the full per-tick pipeline
    /// until the phase timer elapses or the flight aborts.
    fn fly_phase(
        &mut self,
        duration_ms: u32,
        profile: ThrottleProfile,
    ) -> Result<PhaseExit, FlightError> {
        let phase_start = self.ticks.ticks_ms();
        let mut last_flush = phase_start;

        loop {
            let now = self.ticks.ticks_ms();
            let elapsed_ms = ticks_diff(now, phase_start);
            if elapsed_ms >= duration_ms {
                return Ok(PhaseExit::Elapsed);
            }

            let dt = ticks_diff(now, self.last_tick_ms) as f32 / 1_000.0;
            self.last_tick_ms = now;

            if self.kill_switch.is_activated() {
                self.abort("Kill switch re-activated mid-flight");
                return Ok(PhaseExit::Aborted);
            }

            let sample = self.imu.read()?;
            let measured_angles = self.estimator.update(&sample, dt);

            if self.crash_detector.is_crashed(&measured_angles) {
                self.abort(&format!(
                    "Crash detected at angles: pitch={:.2}, roll={:.2}",
                    measured_angles.pitch, measured_angles.roll
                ));
                return Ok(PhaseExit::Aborted);
            }

            let base_throttle =
                profile.base_throttle(elapsed_ms, duration_ms, self.plan.max_base_throttle);
            let throttles = self.controller.compute_motor_throttles(
                &measured_angles,
                &self.target_angles,
                dt,
                base_throttle,
            );

            self.motors
                .set_throttle(Motor::FrontRight, throttles.front_right as i32);
            self.motors
                .set_throttle(Motor::RearRight, throttles.rear_right as i32);
            self.motors
                .set_throttle(Motor::FrontLeft, throttles.front_left as i32);
            self.motors
                .set_throttle(Motor::RearLeft, throttles.rear_left as i32);

            self.publish_telemetry(dt, &measured_angles, &throttles, base_throttle);
            self.log_flight_data(&measured_angles, &throttles);

            if ticks_diff(now, last_flush) >= LOG_FLUSH_INTERVAL_MS {
                last_flush = now;
                self.logger.flush();
            }

            self.ticks.delay_ms(LOOP_INTERVAL_MS);
        }
    }

    /// Terminal exit for crash and interlock events. Motors first, nothing
    /// may run before they are stopped.
    fn abort(&mut self, reason: &str) {
        self.motors.stop_all();
        log::warn!("{reason}");
        self.logger.log(reason);
        self.logger.flush();

        // Rapid blinking signals the abort to the operator.
        let blinker = Blinker::start(&self.status_led, CRASH_BLINK_PERIOD_MS);
        self.ticks.delay_ms(CRASH_SIGNAL_DURATION_MS);
        blinker.stop();
    }

    /// Terminal exit for hardware faults. A stale attitude must never drive
    /// the motors, so there is no retry.
    fn fatal(&mut self, err: FlightError) -> Result<FlightPhase, FlightError> {
        self.motors.stop_all();
        self.phase = FlightPhase::Aborted;
        log::error!("{err}");
        self.logger.log(&err.to_string());
        self.logger.stop();
        self.status_led.set_on(false);
        Err(err)
    }

    fn publish_telemetry(
        &self,
        dt: f32,
        measured_angles: &Orientation,
        throttles: &MotorThrottles,
        base_throttle: f32,
    ) {
        let telemetry = self.telemetry;
        telemetry
            .loop_exec_time_us
            .store((dt * 1_000_000.0) as i32, Ordering::Relaxed);
        telemetry.orientation.store(measured_angles);
        telemetry.pid_outputs.store(&self.controller.pid_outputs());
        telemetry
            .front_right_throttle
            .store(throttles.front_right as i32, Ordering::Relaxed);
        telemetry
            .rear_right_throttle
            .store(throttles.rear_right as i32, Ordering::Relaxed);
        telemetry
            .front_left_throttle
            .store(throttles.front_left as i32, Ordering::Relaxed);
        telemetry
            .rear_left_throttle
            .store(throttles.rear_left as i32, Ordering::Relaxed);
        telemetry
            .base_throttle
            .store(base_throttle as i32, Ordering::Relaxed);
    }

    fn log_flight_data(&mut self, measured_angles: &Orientation, throttles: &MotorThrottles) {
        let pid_outputs = self.controller.pid_outputs();
        self.logger.log(&format!(
            "{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{},{},{},{}",
            measured_angles.pitch,
            measured_angles.roll,
            measured_angles.yaw,
            pid_outputs.pitch,
            pid_outputs.roll,
            pid_outputs.yaw,
            throttles.front_left as i32,
            throttles.rear_left as i32,
            throttles.front_right as i32,
            throttles.rear_right as i32,
        ));
    }
}
