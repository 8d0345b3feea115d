// Flight timeline
pub const LIFT_OFF_DURATION_MS: u32 = 5_000;
pub const HOVER_DURATION_MS: u32 = 5_000;
pub const LANDING_DURATION_MS: u32 = 5_000;
pub const MAX_BASE_THROTTLE: f32 = 50_000.0;

// Control loop timing
pub const LOOP_INTERVAL_MS: u32 = 10;
pub const ARM_POLL_INTERVAL_MS: u32 = 100;
pub const LOG_FLUSH_INTERVAL_MS: u32 = 1_000;

// Attitude PID gains, one set per axis
pub const ROLL_PITCH_KP: f32 = 64.0;
pub const YAW_KP: f32 = 128.0;
pub const PID_OUTPUT_LIMIT: f32 = 5_000.0;

// Complementary filter blend weight, gyro side
pub const COMPLEMENTARY_FILTER_ALPHA: f32 = 0.9;

// Drone limits
pub const MAX_INCLINATION: f32 = 45.0;
pub const MAX_THROTTLE: i32 = 65_535;

// Per-motor trim multipliers, compensate motor/propeller efficiency asymmetry
pub const FRONT_RIGHT_TRIM: f32 = 1.15;
pub const REAR_RIGHT_TRIM: f32 = 1.10;
pub const FRONT_LEFT_TRIM: f32 = 1.0;
pub const REAR_LEFT_TRIM: f32 = 1.0;

// IMU calibration
pub const CALIBRATION_SAMPLES: u32 = 100;

// Status LED blink periods
pub const ARM_WAIT_BLINK_PERIOD_MS: u64 = 500;
pub const CRASH_BLINK_PERIOD_MS: u64 = 100;
pub const CRASH_SIGNAL_DURATION_MS: u32 = 5_000;
