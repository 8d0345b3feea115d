pub mod control_loops;
pub mod crash_detector;
pub mod flight_controller;
pub mod integrator;
pub mod orientation_estimator;
pub mod pid;
