use embedded_hal::i2c::I2c;

use crate::drivers::imu_sensors::{CalibrationOffsets, ImuSample, ImuSensor};
use crate::util::error::FlightError;
use crate::util::math::vectors::{AccelerationVector3D, RotationRateVector3D};

use super::registers::{
    Ctrl1XlRegister, Ctrl2GRegister, LsmAccelSensitivityRanges, LsmGyroSensitivityRanges,
    LsmRegisters, BW_XL_100_HZ, DEFAULT_SLAVE_ADDR, ODR_208_HZ, WHO_AM_I_VALUE,
};

pub struct Lsm6ds33Sensor<I>
where
    I: I2c,
{
    i2c_driver: I,
    device_addr: u8,
    accel_sensitivity: LsmAccelSensitivityRanges,
    gyro_sensitivity: LsmGyroSensitivityRanges,
    calibration_offsets: CalibrationOffsets,
}

impl<I> Lsm6ds33Sensor<I>
where
    I: I2c,
{
    pub fn new(i2c_driver: I) -> Self {
        Lsm6ds33Sensor {
            i2c_driver,
            device_addr: DEFAULT_SLAVE_ADDR,
            accel_sensitivity: LsmAccelSensitivityRanges::ACCEL_RANGE_2G,
            gyro_sensitivity: LsmGyroSensitivityRanges::GYRO_RANGE_245,
            calibration_offsets: CalibrationOffsets::default(),
        }
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), FlightError> {
        self.i2c_driver
            .write(self.device_addr, &[register, value])
            .map_err(|e| FlightError::bus("imu register write", e))
    }

    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), FlightError> {
        self.i2c_driver
            .write_read(self.device_addr, &[start], buf)
            .map_err(|e| FlightError::bus("imu register read", e))
    }

    /// Burst-reads one x/y/z output block. Output registers are
    /// little-endian two's-complement pairs, low byte first.
    fn read_axes(&mut self, start: u8) -> Result<(i16, i16, i16), FlightError> {
        let mut buf: [u8; 6] = [0; 6];
        self.read_registers(start, &mut buf)?;

        Ok((
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ))
    }
}

impl<I> ImuSensor for Lsm6ds33Sensor<I>
where
    I: I2c,
{
    fn power_on(&mut self) -> Result<(), FlightError> {
        let mut who_am_i: [u8; 1] = [0];
        self.read_registers(LsmRegisters::WHO_AM_I, &mut who_am_i)?;
        if who_am_i[0] != WHO_AM_I_VALUE {
            return Err(FlightError::HardwareFault(format!(
                "imu did not acknowledge configuration, who_am_i={:#04x}",
                who_am_i[0]
            )));
        }

        let accel_config = Ctrl1XlRegister::new()
            .with_odr_xl(ODR_208_HZ)
            .with_fs_xl(self.accel_sensitivity.fs_xl)
            .with_bw_xl(BW_XL_100_HZ)
            .into_bits();
        self.write_register(LsmRegisters::CTRL1_XL, accel_config)?;

        let gyro_config = Ctrl2GRegister::new()
            .with_odr_g(ODR_208_HZ)
            .with_fs_g(self.gyro_sensitivity.fs_g)
            .into_bits();
        self.write_register(LsmRegisters::CTRL2_G, gyro_config)?;

        // Offsets belong to the previous power cycle at best.
        self.calibration_offsets = CalibrationOffsets::default();
        Ok(())
    }

    fn read_raw(&mut self) -> Result<ImuSample, FlightError> {
        let (gyro_x, gyro_y, gyro_z) = self.read_axes(LsmRegisters::OUTX_L_G)?;
        let (accel_x, accel_y, accel_z) = self.read_axes(LsmRegisters::OUTX_L_XL)?;

        let accel_x = accel_x as f32 * self.accel_sensitivity.sensitivity;
        let accel_y = accel_y as f32 * self.accel_sensitivity.sensitivity;
        let accel_z = accel_z as f32 * self.accel_sensitivity.sensitivity;

        let gyro_x = gyro_x as f32 * self.gyro_sensitivity.sensitivity;
        let gyro_y = gyro_y as f32 * self.gyro_sensitivity.sensitivity;
        let gyro_z = gyro_z as f32 * self.gyro_sensitivity.sensitivity;

        // The package is mounted rotated 90 degrees around z, swap the
        // horizontal axes to get body coordinates.
        Ok(ImuSample {
            accel: AccelerationVector3D {
                x: -accel_y,
                y: -accel_x,
                z: accel_z,
            },
            gyro: RotationRateVector3D {
                x: gyro_y,
                y: -gyro_x,
                z: gyro_z,
            },
        })
    }

    fn read(&mut self) -> Result<ImuSample, FlightError> {
        let raw = self.read_raw()?;
        Ok(ImuSample {
            accel: raw.accel - self.calibration_offsets.accel,
            gyro: raw.gyro - self.calibration_offsets.gyro,
        })
    }

    fn set_calibration_offsets(&mut self, offsets: CalibrationOffsets) {
        self.calibration_offsets = offsets;
    }
}
