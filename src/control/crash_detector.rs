use crate::config::constants::MAX_INCLINATION;
use crate::util::math::vectors::Orientation;

/// Stateless attitude guard: past MAX_INCLINATION on pitch or roll the craft
/// is considered down. Exactly MAX_INCLINATION still counts as flyable.
pub struct CrashDetector;

impl CrashDetector {
    pub fn is_crashed(&self, angles: &Orientation) -> bool {
        angles.pitch.abs() > MAX_INCLINATION || angles.roll.abs() > MAX_INCLINATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angles(pitch: f32, roll: f32) -> Orientation {
        Orientation {
            pitch,
            roll,
            yaw: 0.0,
        }
    }

    #[test]
    fn level_attitude_is_not_a_crash() {
        let detector = CrashDetector;
        assert!(!detector.is_crashed(&angles(0.0, 0.0)));
        assert!(!detector.is_crashed(&angles(10.0, -20.0)));
        assert!(!detector.is_crashed(&angles(-44.9, 44.9)));
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        let detector = CrashDetector;
        assert!(!detector.is_crashed(&angles(45.0, 0.0)));
        assert!(!detector.is_crashed(&angles(0.0, -45.0)));
        assert!(detector.is_crashed(&angles(45.01, 0.0)));
        assert!(detector.is_crashed(&angles(0.0, -45.01)));
    }

    #[test]
    fn either_axis_triggers() {
        let detector = CrashDetector;
        assert!(detector.is_crashed(&angles(90.0, 0.0)));
        assert!(detector.is_crashed(&angles(0.0, 90.0)));
        assert!(detector.is_crashed(&angles(-60.0, -60.0)));
    }

    #[test]
    fn yaw_never_triggers() {
        let detector = CrashDetector;
        let attitude = Orientation {
            pitch: 0.0,
            roll: 0.0,
            yaw: 179.0,
        };
        assert!(!detector.is_crashed(&attitude));
    }
}
