use libm::{atan2f, sqrtf};

use crate::config::constants::COMPLEMENTARY_FILTER_ALPHA;
use crate::drivers::imu_sensors::ImuSample;
use crate::util::math::vectors::Orientation;

/// Complementary filter fusing gyroscope integration with accelerometer
/// leveling. Yaw has no accelerometer reference and drifts with the gyro,
/// correcting it would take a magnetometer.
pub struct OrientationEstimator {
    angles: Orientation,
}

impl OrientationEstimator {
    pub fn new() -> Self {
        OrientationEstimator {
            angles: Orientation::default(),
        }
    }

    /// Normalize a yaw angle into [-180, 180).
    pub fn normalize_yaw(mut yaw: f32) -> f32 {
        while yaw >= 180.0 {
            yaw -= 360.0;
        }
        while yaw < -180.0 {
            yaw += 360.0;
        }
        yaw
    }

    /// Advances the filter by one sample and returns the updated angles.
    /// `dt` is the elapsed time in seconds since the previous update; a
    /// non-positive dt still integrates and is the caller's responsibility
    /// to prevent.
    pub fn update(&mut self, sample: &ImuSample, dt: f32) -> Orientation {
        // Rates arrive in body axes: y is the pitch axis, x the roll axis.
        self.angles.pitch += sample.gyro.y * dt;
        self.angles.roll += sample.gyro.x * dt;
        self.angles.yaw += sample.gyro.z * dt;

        self.angles.yaw = Self::normalize_yaw(self.angles.yaw);

        let accel_angle_pitch = atan2f(
            sample.accel.x,
            sqrtf(sample.accel.y.powf(2.0) + sample.accel.z.powf(2.0)),
        )
        .to_degrees();
        let accel_angle_roll = atan2f(sample.accel.y, sample.accel.z).to_degrees();

        let alpha = COMPLEMENTARY_FILTER_ALPHA;
        self.angles.pitch = alpha * self.angles.pitch + (1.0 - alpha) * accel_angle_pitch;
        self.angles.roll = alpha * self.angles.roll + (1.0 - alpha) * accel_angle_roll;

        self.angles.clone()
    }
}

impl Default for OrientationEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::math::vectors::{AccelerationVector3D, RotationRateVector3D};
    use crate::util::test_utils::{value_close, value_close_to};

    fn level_sample() -> ImuSample {
        ImuSample {
            accel: AccelerationVector3D {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            },
            gyro: RotationRateVector3D::default(),
        }
    }

    #[test]
    fn level_rest_sample_leaves_orientation_unchanged() {
        let mut estimator = OrientationEstimator::new();
        let angles = estimator.update(&level_sample(), 0.01);
        assert!(value_close(0.0, angles.pitch));
        assert!(value_close(0.0, angles.roll));
        assert!(value_close(0.0, angles.yaw));
    }

    #[test]
    fn yaw_integrates_gyro_rate_only() {
        let mut estimator = OrientationEstimator::new();
        let mut sample = level_sample();
        sample.gyro.z = 10.0;

        for _ in 0..100 {
            estimator.update(&sample, 0.01);
        }
        let angles = estimator.update(&level_sample(), 0.01);

        assert!(value_close_to(10.0, angles.yaw, 1e-3));
        assert!(value_close(0.0, angles.pitch));
        assert!(value_close(0.0, angles.roll));
    }

    #[test]
    fn accelerometer_tilt_pulls_pitch_toward_measured_angle() {
        let mut estimator = OrientationEstimator::new();
        // 1g entirely along body x reads as a 90 degree pitch.
        let tilted = ImuSample {
            accel: AccelerationVector3D {
                x: 1.0,
                y: 0.0,
                z: 0.0,
            },
            gyro: RotationRateVector3D::default(),
        };

        let first = estimator.update(&tilted, 0.01);
        assert!(value_close_to(9.0, first.pitch, 1e-3));

        let mut last = first;
        for _ in 0..200 {
            last = estimator.update(&tilted, 0.01);
        }
        assert!(value_close_to(90.0, last.pitch, 0.1));
    }

    #[test]
    fn roll_follows_accelerometer_sign() {
        let mut estimator = OrientationEstimator::new();
        let banked = ImuSample {
            accel: AccelerationVector3D {
                x: 0.0,
                y: -0.5,
                z: 0.866,
            },
            gyro: RotationRateVector3D::default(),
        };
        let angles = estimator.update(&banked, 0.01);
        assert!(angles.roll < 0.0);
    }

    #[test]
    fn state_persists_across_updates() {
        let mut estimator = OrientationEstimator::new();
        let mut sample = level_sample();
        sample.gyro.y = 100.0;

        let first = estimator.update(&sample, 0.01);
        let second = estimator.update(&sample, 0.01);
        assert!(second.pitch > first.pitch);
    }

    #[test]
    fn normalize_yaw_stays_in_half_open_range() {
        for raw in [-720.0, -540.0, -180.0, -179.9, 0.0, 179.9, 180.0, 360.0, 540.0, 1234.5] {
            let normalized = OrientationEstimator::normalize_yaw(raw);
            assert!(
                (-180.0..180.0).contains(&normalized),
                "{raw} normalized to {normalized}"
            );
        }
    }

    #[test]
    fn normalize_yaw_preserves_angle_mod_360() {
        for raw in [-1000.0_f32, -360.0, -200.0, 0.0, 45.0, 200.0, 359.0, 1000.0] {
            let normalized = OrientationEstimator::normalize_yaw(raw);
            let remainder = (raw - normalized) % 360.0;
            assert!(value_close_to(0.0, remainder, 1e-3), "{raw} -> {normalized}");
        }
    }

    #[test]
    fn normalize_yaw_maps_exactly_180_to_negative_180() {
        assert!(value_close(-180.0, OrientationEstimator::normalize_yaw(180.0)));
    }
}
