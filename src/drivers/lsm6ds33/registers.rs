use bitfield_struct::bitfield;

pub const DEFAULT_SLAVE_ADDR: u8 = 0x6B;
pub const WHO_AM_I_VALUE: u8 = 0x69;

pub struct LsmRegisters;
impl LsmRegisters {
    pub const WHO_AM_I: u8 = 0x0F;
    pub const CTRL1_XL: u8 = 0x10;
    pub const CTRL2_G: u8 = 0x11;
    pub const OUTX_L_G: u8 = 0x22;
    pub const OUTX_L_XL: u8 = 0x28;
}

/// 208Hz, shared by both sensors in the shipped configuration.
pub const ODR_208_HZ: u8 = 0b0101;
/// Accelerometer anti-aliasing filter bandwidth.
pub const BW_XL_100_HZ: u8 = 0b01;

pub struct LsmAccelSensitivityRanges {
    pub fs_xl: u8,
    pub range_g: u8,
    pub sensitivity: f32,
}

#[allow(dead_code)]
impl LsmAccelSensitivityRanges {
    //Accelerometer, g per LSB
    pub const ACCEL_RANGE_2G: LsmAccelSensitivityRanges = Self {
        fs_xl: 0x0,
        range_g: 2,
        sensitivity: 0.000061,
    };
    pub const ACCEL_RANGE_4G: LsmAccelSensitivityRanges = Self {
        fs_xl: 0x2,
        range_g: 4,
        sensitivity: 0.000122,
    };
    pub const ACCEL_RANGE_8G: LsmAccelSensitivityRanges = Self {
        fs_xl: 0x3,
        range_g: 8,
        sensitivity: 0.000244,
    };
    pub const ACCEL_RANGE_16G: LsmAccelSensitivityRanges = Self {
        fs_xl: 0x1,
        range_g: 16,
        sensitivity: 0.000488,
    };
}

pub struct LsmGyroSensitivityRanges {
    pub fs_g: u8,
    pub range_dps: u16,
    pub sensitivity: f32,
}

#[allow(dead_code)]
impl LsmGyroSensitivityRanges {
    //Gyro, deg/s per LSB
    pub const GYRO_RANGE_245: LsmGyroSensitivityRanges = Self {
        fs_g: 0x0,
        range_dps: 245,
        sensitivity: 0.00875,
    };
    pub const GYRO_RANGE_500: LsmGyroSensitivityRanges = Self {
        fs_g: 0x1,
        range_dps: 500,
        sensitivity: 0.0175,
    };
    pub const GYRO_RANGE_1000: LsmGyroSensitivityRanges = Self {
        fs_g: 0x2,
        range_dps: 1000,
        sensitivity: 0.035,
    };
    pub const GYRO_RANGE_2000: LsmGyroSensitivityRanges = Self {
        fs_g: 0x3,
        range_dps: 2000,
        sensitivity: 0.070,
    };
}

///See docs for register CTRL1_XL (10h)
#[bitfield(u8)]
pub struct Ctrl1XlRegister {
    #[bits(2)]
    pub bw_xl: u8,
    #[bits(2)]
    pub fs_xl: u8,
    #[bits(4)]
    pub odr_xl: u8,
}

///See docs for register CTRL2_G (11h)
#[bitfield(u8)]
pub struct Ctrl2GRegister {
    pub padding_bit: bool, // Set to zero
    pub fs_125: bool,
    #[bits(2)]
    pub fs_g: u8,
    #[bits(4)]
    pub odr_g: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl1_xl_shipped_configuration_bits() {
        let value = Ctrl1XlRegister::new()
            .with_odr_xl(ODR_208_HZ)
            .with_fs_xl(LsmAccelSensitivityRanges::ACCEL_RANGE_2G.fs_xl)
            .with_bw_xl(BW_XL_100_HZ)
            .into_bits();
        assert_eq!(value, 0b0101_00_01);
    }

    #[test]
    fn ctrl2_g_shipped_configuration_bits() {
        let value = Ctrl2GRegister::new()
            .with_odr_g(ODR_208_HZ)
            .with_fs_g(LsmGyroSensitivityRanges::GYRO_RANGE_245.fs_g)
            .into_bits();
        assert_eq!(value, 0b0101_00_00);
    }
}
