/// Physical safety interlock. `true` means the switch is engaged and the
/// craft must not fly; arming happens when the operator releases it.
/// Re-activation mid-flight is handled like a crash.
pub trait KillSwitch {
    fn is_activated(&self) -> bool;
}
