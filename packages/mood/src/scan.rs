//! Scan screen state machine.
//!
//! ```text
//! CollectingIdentity --submit--> AwaitingScan --mood event--> MoodReceived
//!                                     ^                            |
//!                                     +----------rescan------------+
//! ```
//!
//! The machine never performs I/O. Transitions return a [`ScanEffect`] that
//! the view executes (emit `requestScan`, post the record, fire confetti), or
//! a [`ScanWarning`] that the view shows inline. A warning means no effect.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::models::{Identity, Mood, MoodRecord};

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanPhase {
    #[default]
    CollectingIdentity,
    AwaitingScan,
    MoodReceived(Mood),
}

/// Inline validation message on the scan screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanWarning {
    MissingIdentity,
    InvalidAge,
    IdentityMismatch,
    NotIdentified,
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScanWarning::MissingIdentity => "⚠️ Please enter both your name and age to start.",
            ScanWarning::InvalidAge => "⚠️ Please enter an age between 1 and 120.",
            ScanWarning::IdentityMismatch => {
                "⚠️ Please use the same name and age as before. Mood history depends on it."
            }
            ScanWarning::NotIdentified => "❌ Please enter your name and age before scanning.",
        })
    }
}

/// Side effect requested by a successful transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanEffect {
    /// Emit `requestScan` on the realtime channel.
    RequestScan,
    /// Post `record` to the backend; fire confetti first when `celebrate`.
    Persist { record: MoodRecord, celebrate: bool },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanMachine {
    phase: ScanPhase,
    baseline: Option<Identity>,
    warning: Option<ScanWarning>,
}

impl ScanMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn warning(&self) -> Option<ScanWarning> {
        self.warning
    }

    /// Identity captured at submission.
    pub fn identity(&self) -> Option<&Identity> {
        self.baseline.as_ref()
    }

    /// Whether the form has been accepted; the realtime subscription lives
    /// exactly while this is true.
    pub fn is_submitted(&self) -> bool {
        self.phase != ScanPhase::CollectingIdentity
    }

    /// The mood currently on screen.
    pub fn mood(&self) -> Option<Mood> {
        match self.phase {
            ScanPhase::MoodReceived(mood) => Some(mood),
            _ => None,
        }
    }

    /// Accept the identity form.
    pub fn submit(&mut self, name: &str, age: &str) -> Result<ScanEffect, ScanWarning> {
        let identity = self.check(validate_identity(name, age))?;
        self.baseline = Some(identity);
        self.phase = ScanPhase::AwaitingScan;
        Ok(ScanEffect::RequestScan)
    }

    /// Ask for another detection pass with the same identity.
    pub fn rescan(&mut self, name: &str, age: &str) -> Result<ScanEffect, ScanWarning> {
        if Identity::new(name, age).is_incomplete() {
            return self.check(Err(ScanWarning::MissingIdentity));
        }
        let matches = self
            .baseline
            .as_ref()
            .is_some_and(|baseline| baseline.matches(name, age));
        if !matches {
            return self.check(Err(ScanWarning::IdentityMismatch));
        }
        self.warning = None;
        self.phase = ScanPhase::AwaitingScan;
        Ok(ScanEffect::RequestScan)
    }

    /// Handle a mood delivered by the realtime channel.
    pub fn receive(&mut self, mood: Mood, at: DateTime<Utc>) -> Result<ScanEffect, ScanWarning> {
        let identity = match &self.baseline {
            Some(identity) if self.is_submitted() && !identity.is_incomplete() => identity.clone(),
            _ => return self.check(Err(ScanWarning::NotIdentified)),
        };
        self.phase = ScanPhase::MoodReceived(mood);
        Ok(ScanEffect::Persist {
            record: MoodRecord::new(&identity, mood, at),
            celebrate: mood.celebrates(),
        })
    }

    /// Record the outcome of a validation step as the visible warning.
    fn check<T>(&mut self, result: Result<T, ScanWarning>) -> Result<T, ScanWarning> {
        self.warning = result.as_ref().err().copied();
        result
    }
}

/// Trim both fields, require them non-empty and the age within range.
pub fn validate_identity(name: &str, age: &str) -> Result<Identity, ScanWarning> {
    let identity = Identity::new(name, age);
    if identity.is_incomplete() {
        return Err(ScanWarning::MissingIdentity);
    }
    match identity.age.parse::<u32>() {
        Ok(years) if (MIN_AGE..=MAX_AGE).contains(&years) => Ok(identity),
        _ => Err(ScanWarning::InvalidAge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn submitted() -> ScanMachine {
        let mut machine = ScanMachine::new();
        assert_eq!(machine.submit("Ada", "36"), Ok(ScanEffect::RequestScan));
        machine
    }

    #[test]
    fn test_blank_fields_never_request_a_scan() {
        for (name, age) in [("", ""), ("Ada", ""), ("", "36"), ("   ", "36"), ("Ada", " \t ")] {
            let mut machine = ScanMachine::new();
            assert_eq!(machine.submit(name, age), Err(ScanWarning::MissingIdentity));
            assert_eq!(machine.warning(), Some(ScanWarning::MissingIdentity));
            assert_eq!(machine.phase(), ScanPhase::CollectingIdentity);
            assert!(!machine.is_submitted());
        }
    }

    #[test]
    fn test_age_must_be_in_range() {
        for age in ["0", "121", "abc", "-3", "4.5"] {
            let mut machine = ScanMachine::new();
            assert_eq!(machine.submit("Ada", age), Err(ScanWarning::InvalidAge), "{age}");
        }
        let mut machine = ScanMachine::new();
        assert!(machine.submit("Ada", "120").is_ok());
    }

    #[test]
    fn test_submit_stores_trimmed_baseline_and_clears_warning() {
        let mut machine = ScanMachine::new();
        let _ = machine.submit("", "");
        assert!(machine.warning().is_some());

        assert_eq!(machine.submit("  Ada ", " 36 "), Ok(ScanEffect::RequestScan));
        assert_eq!(machine.warning(), None);
        assert_eq!(machine.phase(), ScanPhase::AwaitingScan);
        assert_eq!(machine.identity(), Some(&Identity::new("Ada", "36")));
    }

    #[test]
    fn test_rescan_rejects_changed_identity() {
        let mut machine = submitted();
        machine.receive(Mood::Sad, at()).unwrap();

        for (name, age) in [("Bob", "36"), ("Ada", "37"), ("ada", "36")] {
            assert_eq!(machine.rescan(name, age), Err(ScanWarning::IdentityMismatch));
            assert_eq!(machine.warning(), Some(ScanWarning::IdentityMismatch));
            assert_eq!(machine.mood(), Some(Mood::Sad));
        }
        assert_eq!(machine.rescan("", "36"), Err(ScanWarning::MissingIdentity));
    }

    #[test]
    fn test_rescan_with_same_identity_clears_mood() {
        let mut machine = submitted();
        machine.receive(Mood::Angry, at()).unwrap();
        let _ = machine.rescan("Bob", "36");

        assert_eq!(machine.rescan(" Ada", "36 "), Ok(ScanEffect::RequestScan));
        assert_eq!(machine.warning(), None);
        assert_eq!(machine.mood(), None);
        assert_eq!(machine.phase(), ScanPhase::AwaitingScan);
    }

    #[test]
    fn test_happy_mood_celebrates_and_persists_exact_mood() {
        let mut machine = submitted();
        let effect = machine.receive(Mood::Happy, at()).unwrap();
        assert_eq!(
            effect,
            ScanEffect::Persist {
                record: MoodRecord {
                    name: "Ada".to_string(),
                    age: "36".to_string(),
                    mood: Mood::Happy,
                    time: "2024-01-02T03:04:05.000Z".to_string(),
                },
                celebrate: true,
            }
        );
        assert_eq!(machine.phase(), ScanPhase::MoodReceived(Mood::Happy));
    }

    #[test]
    fn test_sad_mood_persists_without_confetti() {
        let mut machine = submitted();
        match machine.receive(Mood::Sad, at()) {
            Ok(ScanEffect::Persist { record, celebrate }) => {
                assert_eq!(record.mood, Mood::Sad);
                assert!(!celebrate);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_mood_before_submission_is_rejected() {
        let mut machine = ScanMachine::new();
        assert_eq!(machine.receive(Mood::Happy, at()), Err(ScanWarning::NotIdentified));
        assert_eq!(machine.mood(), None);
    }

    #[test]
    fn test_later_events_replace_displayed_mood() {
        let mut machine = submitted();
        machine.receive(Mood::Fear, at()).unwrap();
        machine.receive(Mood::Surprise, at()).unwrap();
        assert_eq!(machine.mood(), Some(Mood::Surprise));
    }
}
