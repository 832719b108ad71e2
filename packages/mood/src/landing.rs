//! Landing screen state: the start action and the privacy notice overlay.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LandingPhase {
    #[default]
    Idle,
    Detecting,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LandingState {
    pub phase: LandingPhase,
    pub privacy_open: bool,
}

impl LandingState {
    /// The start button is disabled while detecting or while the notice is open.
    pub fn start_disabled(&self) -> bool {
        self.phase == LandingPhase::Detecting || self.privacy_open
    }

    /// Move to `Detecting`. Returns false when the action is disabled.
    pub fn start(&mut self) -> bool {
        if self.start_disabled() {
            return false;
        }
        self.phase = LandingPhase::Detecting;
        true
    }

    pub fn toggle_privacy(&mut self) {
        self.privacy_open = !self.privacy_open;
    }

    pub fn accept_privacy(&mut self) {
        self.privacy_open = false;
    }

    pub fn start_label(&self) -> &'static str {
        match self.phase {
            LandingPhase::Idle => "Let’s Start 🚀",
            LandingPhase::Detecting => "Scanning Mood...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_moves_to_detecting_once() {
        let mut state = LandingState::default();
        assert_eq!(state.start_label(), "Let’s Start 🚀");
        assert!(state.start());
        assert_eq!(state.phase, LandingPhase::Detecting);
        assert_eq!(state.start_label(), "Scanning Mood...");
        assert!(!state.start());
    }

    #[test]
    fn test_privacy_notice_blocks_start() {
        let mut state = LandingState::default();
        state.toggle_privacy();
        assert!(state.start_disabled());
        assert!(!state.start());
        assert_eq!(state.phase, LandingPhase::Idle);

        state.accept_privacy();
        assert!(!state.privacy_open);
        assert!(state.start());
    }

    #[test]
    fn test_toggle_flips_overlay() {
        let mut state = LandingState::default();
        state.toggle_privacy();
        state.toggle_privacy();
        assert!(!state.privacy_open);
    }
}
