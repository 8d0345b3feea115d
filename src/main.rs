use quad_flight_computer::control::control_loops::{FlightPlan, FlightSequencer};
use quad_flight_computer::drivers::lsm6ds33::device::Lsm6ds33Sensor;
use quad_flight_computer::flight_logger::FileFlightLogger;
use quad_flight_computer::shared_core_values::TELEMETRY_SHARED;
use quad_flight_computer::sim::imu_bus::SimImuBus;
use quad_flight_computer::sim::motors::SimMotorOutputs;
use quad_flight_computer::sim::switches::{SimKillSwitch, SimStatusLed};
use quad_flight_computer::threads::start_telemetry_thread;
use quad_flight_computer::util::time::MonotonicTicks;

fn main() {
    env_logger::init();
    log::info!("Running");

    // Bench rig: the simulated peripherals stand in for the flight hardware,
    // the control stack itself is exactly what would run on the craft.
    let bus = SimImuBus::new();
    let motors = SimMotorOutputs::new();
    let kill_switch = SimKillSwitch::new(false);
    let status_led = SimStatusLed::new();
    let logger = FileFlightLogger::new("flight_log.txt");
    let log_file = logger.file_name().to_string();

    start_telemetry_thread(&TELEMETRY_SHARED);

    let imu = Lsm6ds33Sensor::new(bus);
    let mut sequencer = FlightSequencer::new(
        imu,
        motors,
        kill_switch,
        status_led,
        logger,
        MonotonicTicks::new(),
        &TELEMETRY_SHARED,
        FlightPlan::default(),
    );

    match sequencer.run() {
        Ok(phase) => log::info!("Flight ended in phase {phase:?}"),
        Err(err) => log::error!("Flight ended on a fault: {err}"),
    }
    log::info!("Log saved to {log_file}");
}
