use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, Operation};

use crate::drivers::lsm6ds33::registers::{LsmRegisters, WHO_AM_I_VALUE};

use super::{SimEvent, SimTrace};

/// Raw accelerometer count for 1 g at the ±2g scale.
pub const GRAVITY_LSB: i16 = 16393;

/// One tick of raw sensor output, in register counts.
#[derive(Debug, Clone, Copy)]
pub struct ImuFrame {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
}

impl ImuFrame {
    /// Craft sitting level and still.
    pub fn level() -> Self {
        ImuFrame {
            accel: [0, 0, GRAVITY_LSB],
            gyro: [0, 0, 0],
        }
    }

    /// Attitude far past the crash threshold, gravity reads fully along a
    /// horizontal sensor axis.
    pub fn toppled() -> Self {
        ImuFrame {
            accel: [GRAVITY_LSB, 0, 0],
            gyro: [0, 0, 0],
        }
    }
}

/// Error type surfaced by injected bus failures.
#[derive(Debug, Clone, Copy)]
pub struct SimBusError;

impl i2c::Error for SimBusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

struct BusState {
    who_am_i: u8,
    pointer: u8,
    scripted_frames: VecDeque<ImuFrame>,
    resting_frame: ImuFrame,
    current_frame: ImuFrame,
    register_writes: Vec<(u8, u8)>,
    samples_served: u32,
    transactions_until_failure: Option<u32>,
    fail_at_sample: Option<u32>,
    trace: Option<SimTrace>,
}

impl BusState {
    fn serve_read(&mut self, buffer: &mut [u8]) -> Result<(), SimBusError> {
        match self.pointer {
            LsmRegisters::WHO_AM_I => {
                if let Some(first) = buffer.first_mut() {
                    *first = self.who_am_i;
                }
            }
            // A gyro burst starts a new sample.
            LsmRegisters::OUTX_L_G => {
                if let Some(at) = self.fail_at_sample {
                    if self.samples_served >= at {
                        return Err(SimBusError);
                    }
                }
                self.current_frame = self
                    .scripted_frames
                    .pop_front()
                    .unwrap_or(self.resting_frame);
                self.samples_served += 1;
                if let Some(trace) = &self.trace {
                    trace.lock().unwrap().push(SimEvent::SensorRead);
                }
                Self::fill_axes(buffer, &self.current_frame.gyro);
            }
            LsmRegisters::OUTX_L_XL => {
                Self::fill_axes(buffer, &self.current_frame.accel);
            }
            _ => buffer.fill(0),
        }
        Ok(())
    }

    fn fill_axes(buffer: &mut [u8], axes: &[i16; 3]) {
        for (index, value) in axes.iter().enumerate() {
            let bytes = value.to_le_bytes();
            if buffer.len() >= 2 * index + 2 {
                buffer[2 * index] = bytes[0];
                buffer[2 * index + 1] = bytes[1];
            }
        }
    }
}

/// Register-level stand-in for the IMU on its I2C bus. Clones share the same
/// simulated device, so tests can keep a handle while the driver owns the
/// bus.
#[derive(Clone)]
pub struct SimImuBus {
    state: Arc<Mutex<BusState>>,
}

impl SimImuBus {
    pub fn new() -> Self {
        SimImuBus {
            state: Arc::new(Mutex::new(BusState {
                who_am_i: WHO_AM_I_VALUE,
                pointer: 0,
                scripted_frames: VecDeque::new(),
                resting_frame: ImuFrame::level(),
                current_frame: ImuFrame::level(),
                register_writes: Vec::new(),
                samples_served: 0,
                transactions_until_failure: None,
                fail_at_sample: None,
                trace: None,
            })),
        }
    }

    pub fn set_who_am_i(&self, value: u8) {
        self.state.lock().unwrap().who_am_i = value;
    }

    /// Frame returned once the script runs out.
    pub fn set_resting_frame(&self, frame: ImuFrame) {
        self.state.lock().unwrap().resting_frame = frame;
    }

    /// Appends `count` copies of `frame` to the sample script.
    pub fn queue_frames(&self, count: usize, frame: ImuFrame) {
        let mut state = self.state.lock().unwrap();
        for _ in 0..count {
            state.scripted_frames.push_back(frame);
        }
    }

    /// Fails every bus transaction after `count` successful ones.
    pub fn fail_after_transactions(&self, count: u32) {
        self.state.lock().unwrap().transactions_until_failure = Some(count);
    }

    /// Fails the bus when the sensor is asked for sample number `sample`
    /// (zero-based).
    pub fn fail_at_sample(&self, sample: u32) {
        self.state.lock().unwrap().fail_at_sample = Some(sample);
    }

    pub fn register_writes(&self) -> Vec<(u8, u8)> {
        self.state.lock().unwrap().register_writes.clone()
    }

    pub fn samples_served(&self) -> u32 {
        self.state.lock().unwrap().samples_served
    }

    pub fn attach_trace(&self, trace: SimTrace) {
        self.state.lock().unwrap().trace = Some(trace);
    }
}

impl Default for SimImuBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for SimImuBus {
    type Error = SimBusError;
}

impl I2c for SimImuBus {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();

        if let Some(remaining) = state.transactions_until_failure.as_mut() {
            if *remaining == 0 {
                return Err(SimBusError);
            }
            *remaining -= 1;
        }

        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => match **bytes {
                    [register] => state.pointer = register,
                    [register, value] => {
                        state.pointer = register;
                        state.register_writes.push((register, value));
                    }
                    _ => {}
                },
                Operation::Read(buffer) => state.serve_read(buffer)?,
            }
        }
        Ok(())
    }
}
