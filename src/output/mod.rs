pub mod motor_outputs;
