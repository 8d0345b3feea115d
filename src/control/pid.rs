use super::integrator::Integrator;

pub struct PID {
    proportional_multiplier: f32,
    integral_multiplier: f32,
    derivative_multiplier: f32,
    output_limits: Option<(f32, f32)>,
    error_integrator: Integrator,
    previous_error: f32,
}

impl PID {
    pub fn new(
        proportional_multiplier: f32,
        integral_multiplier: f32,
        derivative_multiplier: f32,
    ) -> Self {
        PID {
            proportional_multiplier,
            integral_multiplier,
            derivative_multiplier,
            output_limits: None,
            error_integrator: Integrator::new(),
            previous_error: 0.0_f32,
        }
    }

    pub fn with_output_limits(
        proportional_multiplier: f32,
        integral_multiplier: f32,
        derivative_multiplier: f32,
        min_output: f32,
        max_output: f32,
    ) -> Self {
        let mut pid = Self::new(
            proportional_multiplier,
            integral_multiplier,
            derivative_multiplier,
        );
        pid.output_limits = Some((min_output, max_output));
        pid
    }

    /// One discrete controller step. Only the output is clamped, the error
    /// integral accumulates freely.
    pub fn compute(&mut self, error: f32, dt: f32) -> f32 {
        self.error_integrator.add_new_value(error, dt);

        // An irregular tick can hand us dt = 0, the derivative is skipped
        // rather than divided by it.
        let derivative = if dt > 0.0 {
            (error - self.previous_error) / dt
        } else {
            0.0
        };

        let proportional_output = error * self.proportional_multiplier;
        let integral_output =
            self.error_integrator.get_current_value() * self.integral_multiplier;
        let derivative_output = derivative * self.derivative_multiplier;

        let mut output = proportional_output + integral_output + derivative_output;
        if let Some((min_output, max_output)) = self.output_limits {
            output = output.clamp(min_output, max_output);
        }

        self.previous_error = error;
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_utils::value_close;

    #[test]
    fn proportional_only_follows_error() {
        let mut pid = PID::new(2.0, 0.0, 0.0);
        assert!(value_close(6.0, pid.compute(3.0, 0.01)));
        assert!(value_close(-6.0, pid.compute(-3.0, 0.01)));
    }

    #[test]
    fn integral_accumulates_across_steps() {
        let mut pid = PID::new(0.0, 1.0, 0.0);
        assert!(value_close(1.0, pid.compute(10.0, 0.1)));
        assert!(value_close(2.0, pid.compute(10.0, 0.1)));
        assert!(value_close(3.0, pid.compute(10.0, 0.1)));
    }

    #[test]
    fn derivative_tracks_error_change_rate() {
        let mut pid = PID::new(0.0, 0.0, 1.0);
        pid.compute(0.0, 0.1);
        assert!(value_close(50.0, pid.compute(5.0, 0.1)));
    }

    #[test]
    fn zero_dt_skips_derivative() {
        let mut pid = PID::new(0.0, 0.0, 1.0);
        pid.compute(1.0, 0.1);
        assert!(value_close(0.0, pid.compute(100.0, 0.0)));
    }

    #[test]
    fn negative_dt_skips_derivative() {
        let mut pid = PID::new(0.0, 0.0, 1.0);
        pid.compute(1.0, 0.1);
        assert!(value_close(0.0, pid.compute(100.0, -0.01)));
    }

    #[test]
    fn output_clamps_to_configured_limits() {
        let mut pid = PID::with_output_limits(64.0, 0.0, 0.0, -5_000.0, 5_000.0);
        assert!(value_close(5_000.0, pid.compute(1.0e6, 0.01)));
        assert!(value_close(-5_000.0, pid.compute(-1.0e6, 0.01)));
    }

    #[test]
    fn unbounded_controller_does_not_clamp() {
        let mut pid = PID::new(64.0, 0.0, 0.0);
        assert!(value_close(640_000.0, pid.compute(10_000.0, 0.01)));
    }

    #[test]
    fn replaying_a_sequence_is_deterministic() {
        let sequence = [
            (1.5_f32, 0.01_f32),
            (-2.0, 0.02),
            (0.25, 0.0),
            (10.0, 0.01),
            (-0.5, 0.05),
        ];

        let mut first = PID::with_output_limits(64.0, 0.5, 0.1, -5_000.0, 5_000.0);
        let mut second = PID::with_output_limits(64.0, 0.5, 0.1, -5_000.0, 5_000.0);

        for (error, dt) in sequence {
            let a = first.compute(error, dt);
            let b = second.compute(error, dt);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
