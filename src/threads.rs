use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::shared_core_values::AtomicTelemetry;
use crate::status_led::StatusIndicator;

/// Periodic status-LED toggle running on its own thread. It shares nothing
/// with the control loop beyond the indicator itself and must never block
/// it; `stop` leaves the LED off.
pub struct Blinker {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Blinker {
    pub fn start<S>(indicator: &S, period_ms: u64) -> Self
    where
        S: StatusIndicator + Clone + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let led = indicator.clone();
        let run_flag = running.clone();

        let handle = std::thread::Builder::new()
            .stack_size(4096)
            .spawn(move || {
                while run_flag.load(Ordering::Relaxed) {
                    led.toggle();
                    std::thread::sleep(Duration::from_millis(period_ms));
                }
                led.set_on(false);
            })
            .ok();

        Blinker { running, handle }
    }

    pub fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn start_telemetry_thread(telemetry_data: &'static AtomicTelemetry) {
    // Print telemetry values thread, for debugging/telemetry purposes.
    let _ = std::thread::Builder::new()
        .stack_size(4096)
        .spawn(move || loop {
            log::info!(
                "
                    Iteration Time: {:?}us
                    Orientation {:?}
                    PID outputs {:?}
                    Motors {:?}
                    Base throttle {:?}",
                telemetry_data.loop_exec_time_us.load(Ordering::Relaxed),
                telemetry_data.orientation.read(),
                telemetry_data.pid_outputs.read(),
                [
                    telemetry_data.front_right_throttle.load(Ordering::Relaxed),
                    telemetry_data.rear_right_throttle.load(Ordering::Relaxed),
                    telemetry_data.front_left_throttle.load(Ordering::Relaxed),
                    telemetry_data.rear_left_throttle.load(Ordering::Relaxed)
                ],
                telemetry_data.base_throttle.load(Ordering::Relaxed),
            );
            std::thread::sleep(Duration::from_millis(250));
        });
}
