use crate::util::error::FlightError;
use crate::util::math::vectors::{AccelerationVector3D, RotationRateVector3D};

/// One decoded IMU reading, acceleration in g and angular rate in deg/s.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImuSample {
    pub accel: AccelerationVector3D,
    pub gyro: RotationRateVector3D,
}

/// Per-axis sensor bias, recomputed once per power cycle. The accelerometer
/// offset has the expected 1 g of gravity on the vertical axis removed, so
/// it holds bias only.
#[derive(Debug, Default, Clone, Copy)]
pub struct CalibrationOffsets {
    pub accel: AccelerationVector3D,
    pub gyro: RotationRateVector3D,
}

pub trait ImuSensor {
    /// Enables the sensor bus and configures continuous sampling. Clears any
    /// previous calibration, offsets are never reused across power cycles.
    fn power_on(&mut self) -> Result<(), FlightError>;

    /// One decoded sample with scaling and axis remap applied, before offset
    /// subtraction.
    fn read_raw(&mut self) -> Result<ImuSample, FlightError>;

    /// One calibrated sample.
    fn read(&mut self) -> Result<ImuSample, FlightError>;

    fn set_calibration_offsets(&mut self, offsets: CalibrationOffsets);

    ///To run this the craft must sit level and completely still.
    fn calibrate(&mut self, samples: u32) -> Result<CalibrationOffsets, FlightError> {
        let mut accel_sum = AccelerationVector3D::default();
        let mut gyro_sum = RotationRateVector3D::default();

        for _ in 0..samples {
            let sample = self.read_raw()?;
            accel_sum += sample.accel;
            gyro_sum += sample.gyro;
            // The vertical axis is expected to read 1g at rest.
            accel_sum.z -= 1.0;
        }

        let offsets = CalibrationOffsets {
            accel: accel_sum / samples as f32,
            gyro: gyro_sum / samples as f32,
        };
        self.set_calibration_offsets(offsets);
        Ok(offsets)
    }
}
