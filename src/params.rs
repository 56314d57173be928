use crate::error::ConfigurationError;
use crate::serde::Serialize;

/// Upper bound on committed chords, whatever the caller asks for.
pub const CHORD_CAP: usize = 50_000;

/// Validated engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Params {
    /// Number of pins (`n`).
    pub pin_count: usize,
    /// Candidates sampled per round (`p`).
    pub candidates: usize,
    /// Candidates committed per round (`s`).
    pub selections: usize,
    pub max_chords: usize,
}

impl Params {
    /// Checks each constraint in turn so the caller sees the first one violated.
    pub fn new(
        pin_count: i64,
        candidates: i64,
        selections: i64,
        max_chords: i64,
    ) -> Result<Self, ConfigurationError> {
        if pin_count <= 0 {
            return Err(ConfigurationError::PinCount(pin_count));
        }
        if candidates <= 0 {
            return Err(ConfigurationError::Candidates(candidates));
        }
        if selections <= 0 {
            return Err(ConfigurationError::Selections(selections));
        }
        if selections > candidates {
            return Err(ConfigurationError::SelectionsExceedCandidates {
                selections,
                candidates,
            });
        }
        if max_chords <= 0 {
            return Err(ConfigurationError::MaxChords(max_chords));
        }

        Ok(Self {
            pin_count: pin_count as usize,
            candidates: candidates as usize,
            selections: selections as usize,
            max_chords: usize::min(CHORD_CAP, max_chords as usize),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_valid_params() {
        let params = Params::new(200, 1000, 10, 500).unwrap();
        assert_eq!(200, params.pin_count);
        assert_eq!(1000, params.candidates);
        assert_eq!(10, params.selections);
        assert_eq!(500, params.max_chords);
    }

    #[test]
    fn test_selections_equal_to_candidates_is_accepted() {
        assert!(Params::new(10, 7, 7, 1).is_ok());
    }

    #[test]
    fn test_selections_above_candidates_is_rejected() {
        assert_eq!(
            Err(ConfigurationError::SelectionsExceedCandidates {
                selections: 8,
                candidates: 7
            }),
            Params::new(10, 7, 8, 1)
        );
    }

    #[test]
    fn test_each_non_positive_value_gets_its_own_error() {
        assert_eq!(Err(ConfigurationError::PinCount(0)), Params::new(0, 1, 1, 1));
        assert_eq!(
            Err(ConfigurationError::Candidates(-2)),
            Params::new(1, -2, 1, 1)
        );
        assert_eq!(
            Err(ConfigurationError::Selections(0)),
            Params::new(1, 1, 0, 1)
        );
        assert_eq!(
            Err(ConfigurationError::MaxChords(-1)),
            Params::new(1, 1, 1, -1)
        );
    }

    #[test]
    fn test_max_chords_is_capped() {
        let params = Params::new(10, 10, 1, 1_000_000).unwrap();
        assert_eq!(CHORD_CAP, params.max_chords);
    }
}
