use std::ops::{AddAssign, Div, Sub};

/// Acceleration in g, one component per body axis.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccelerationVector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Sub<AccelerationVector3D> for AccelerationVector3D {
    type Output = AccelerationVector3D;

    fn sub(self, rhs: AccelerationVector3D) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl AddAssign<AccelerationVector3D> for AccelerationVector3D {
    fn add_assign(&mut self, rhs: AccelerationVector3D) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Div<f32> for AccelerationVector3D {
    type Output = AccelerationVector3D;

    fn div(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

/// Angular rate in deg/s, one component per body axis.
#[derive(Debug, Default, Clone, Copy)]
pub struct RotationRateVector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Sub<RotationRateVector3D> for RotationRateVector3D {
    type Output = RotationRateVector3D;

    fn sub(self, rhs: RotationRateVector3D) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl AddAssign<RotationRateVector3D> for RotationRateVector3D {
    fn add_assign(&mut self, rhs: RotationRateVector3D) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Div<f32> for RotationRateVector3D {
    type Output = RotationRateVector3D;

    fn div(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

/// Attitude angles in degrees. Doubles as the commanded-attitude type, the
/// hover target being all zeros.
#[derive(Debug, Default, Copy)]
pub struct Orientation {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

impl Sub<Orientation> for Orientation {
    type Output = Orientation;

    fn sub(self, rhs: Orientation) -> Self::Output {
        Self {
            pitch: self.pitch - rhs.pitch,
            roll: self.roll - rhs.roll,
            yaw: self.yaw - rhs.yaw,
        }
    }
}

impl Clone for Orientation {
    fn clone(&self) -> Self {
        Self {
            roll: self.roll,
            pitch: self.pitch,
            yaw: self.yaw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_utils::value_close;

    #[test]
    fn acceleration_accumulate_and_average() {
        let mut sum = AccelerationVector3D::default();
        for _ in 0..4 {
            sum += AccelerationVector3D {
                x: 0.1,
                y: -0.2,
                z: 1.0,
            };
        }
        let mean = sum / 4.0;
        assert!(value_close(0.1, mean.x));
        assert!(value_close(-0.2, mean.y));
        assert!(value_close(1.0, mean.z));
    }

    #[test]
    fn rotation_rate_offset_subtraction() {
        let raw = RotationRateVector3D {
            x: 1.5,
            y: -0.5,
            z: 0.25,
        };
        let offset = RotationRateVector3D {
            x: 0.5,
            y: -0.5,
            z: 0.25,
        };
        let calibrated = raw - offset;
        assert!(value_close(1.0, calibrated.x));
        assert!(value_close(0.0, calibrated.y));
        assert!(value_close(0.0, calibrated.z));
    }

    #[test]
    fn orientation_error_per_axis() {
        let measured = Orientation {
            pitch: 3.0,
            roll: -2.0,
            yaw: 10.0,
        };
        let target = Orientation::default();
        let error = measured - target;
        assert!(value_close(3.0, error.pitch));
        assert!(value_close(-2.0, error.roll));
        assert!(value_close(10.0, error.yaw));
    }
}
