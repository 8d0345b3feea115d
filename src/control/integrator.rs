pub struct Integrator {
    current_value: f32,
}

impl Integrator {
    pub fn new() -> Self {
        Integrator {
            current_value: 0.0_f32,
        }
    }

    pub fn add_new_value(&mut self, value: f32, interval_seconds: f32) {
        self.current_value += value * interval_seconds;
    }

    pub fn get_current_value(&self) -> f32 {
        self.current_value
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_utils::value_close;

    #[test]
    fn accumulates_value_times_interval() {
        let mut integrator = Integrator::new();
        integrator.add_new_value(2.0, 0.5);
        integrator.add_new_value(-1.0, 1.0);
        assert!(value_close(0.0, integrator.get_current_value()));
    }

    #[test]
    fn negative_interval_integrates_backwards() {
        let mut integrator = Integrator::new();
        integrator.add_new_value(3.0, -0.1);
        assert!(value_close(-0.3, integrator.get_current_value()));
    }
}
