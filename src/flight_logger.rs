use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

/// Append-only flight event log, a line-oriented `elapsed_ms,payload` text
/// stream. Best effort: implementations swallow their own I/O failures, the
/// control loop never blocks on telemetry persistence.
pub trait FlightEventLog {
    fn start(&mut self);
    fn log(&mut self, event: &str);
    fn flush(&mut self);
    fn stop(&mut self);
}

pub struct FileFlightLogger {
    file_name: String,
    file: Option<BufWriter<File>>,
    started: Option<Instant>,
}

impl FileFlightLogger {
    pub fn new(file_name: &str) -> Self {
        FileFlightLogger {
            file_name: file_name.to_string(),
            file: None,
            started: None,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl FlightEventLog for FileFlightLogger {
    fn start(&mut self) {
        match File::create(&self.file_name) {
            Ok(file) => {
                let mut writer = BufWriter::new(file);
                if let Err(err) = writeln!(writer, "Time_ms,Event") {
                    log::warn!("flight log header write failed: {err}");
                }
                self.file = Some(writer);
                self.started = Some(Instant::now());
            }
            Err(err) => log::warn!("flight log unavailable: {err}"),
        }
    }

    fn log(&mut self, event: &str) {
        if let Some(writer) = self.file.as_mut() {
            let elapsed_ms = self
                .started
                .map(|started| started.elapsed().as_millis())
                .unwrap_or(0);
            if let Err(err) = writeln!(writer, "{elapsed_ms},{event}") {
                log::warn!("flight log write failed: {err}");
            }
        }
    }

    fn flush(&mut self) {
        if let Some(writer) = self.file.as_mut() {
            if let Err(err) = writer.flush() {
                log::warn!("flight log flush failed: {err}");
            }
        }
    }

    fn stop(&mut self) {
        self.flush();
        self.file = None;
        self.started = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log_path(tag: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!("flight_log_test_{tag}_{}.txt", std::process::id()));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn writes_header_and_timestamped_events() {
        let path = temp_log_path("events");
        let mut logger = FileFlightLogger::new(&path);

        logger.start();
        logger.log("Flight controller program started");
        logger.log("0.00,0.00,0.00");
        logger.stop();

        let contents = std::fs::read_to_string(&path).expect("log file");
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Time_ms,Event"));
        let first = lines.next().expect("first event");
        assert!(first.ends_with(",Flight controller program started"));
        let second = lines.next().expect("second event");
        assert!(second.ends_with(",0.00,0.00,0.00"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn logging_before_start_is_a_no_op() {
        let path = temp_log_path("nostart");
        let mut logger = FileFlightLogger::new(&path);
        logger.log("dropped");
        logger.flush();
        logger.stop();
        assert!(!std::path::Path::new(&path).exists());
    }

    #[test]
    fn unwritable_path_is_swallowed() {
        let mut logger = FileFlightLogger::new("/nonexistent-dir/flight_log.txt");
        logger.start();
        logger.log("event");
        logger.flush();
        logger.stop();
    }
}
