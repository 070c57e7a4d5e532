/// Permission to confirm, recomputed from each tick's qualifying detections.
///
/// The flag carries no memory: a face seen on one tick says nothing about the
/// next. A tick whose frame could not be read leaves it untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gate {
    enabled: bool,
}

impl Gate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the flag with "at least one qualifying detection".
    pub fn update(&mut self, qualifying: usize) -> bool {
        self.enabled = qualifying > 0;
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn reset(&mut self) {
        self.enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_starts_disabled() {
        assert!(!Gate::new().is_enabled());
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(3, true)]
    fn test_update_reflects_count(#[case] count: usize, #[case] expected: bool) {
        let mut gate = Gate::new();
        assert_eq!(gate.update(count), expected);
        assert_eq!(gate.is_enabled(), expected);
    }

    #[test]
    fn test_no_memory_between_updates() {
        let mut gate = Gate::new();
        gate.update(2);
        gate.update(0);
        assert!(!gate.is_enabled());
    }

    #[test]
    fn test_reset_disables() {
        let mut gate = Gate::new();
        gate.update(1);
        gate.reset();
        assert!(!gate.is_enabled());
    }
}
