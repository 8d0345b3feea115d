/// Tolerance within which floating-point values are considered equal.
pub const TEST_TOLERANCE: f32 = 1e-4;

/// Checks if two floating point numbers are close enough to be considered
/// equal.
pub fn value_close(target: f32, value: f32) -> bool {
    (target - value).abs() < TEST_TOLERANCE
}

/// Same check with an explicit tolerance, for quantities accumulated over
/// many samples.
pub fn value_close_to(target: f32, value: f32, tolerance: f32) -> bool {
    (target - value).abs() < tolerance
}
