use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Self-reported emotional state of an entry.
///
/// Variant order is the display order used by statistics and listings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    AsRefStr,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Tired,
    Excited,
}

/// Highest value [`Mood::score`] returns.
pub const MAX_SCORE: u8 = 5;

/// Labels of the older index-encoded mood table, kept for error messages.
pub const LEGACY_MOOD_LABELS: [&str; 5] = ["Amazing", "Good", "Okay", "Meh", "Bad"];

impl Mood {
    /// Fixed score used by the daily trend series.
    pub fn score(self) -> u8 {
        match self {
            Mood::Happy | Mood::Excited => 5,
            Mood::Tired => 3,
            Mood::Sad => 2,
            Mood::Angry => 1,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Angry => "😡",
            Mood::Tired => "😴",
            Mood::Excited => "😃",
        }
    }

    /// Maps an index from the legacy `Amazing, Good, Okay, Meh, Bad` table
    /// onto the canonical moods, best to worst.
    pub fn from_legacy_index(index: u64) -> Option<Mood> {
        match index {
            0 => Some(Mood::Excited),
            1 => Some(Mood::Happy),
            2 => Some(Mood::Tired),
            3 => Some(Mood::Sad),
            4 => Some(Mood::Angry),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(Mood::from_str("happy").unwrap(), Mood::Happy);
        assert_eq!(Mood::from_str("EXCITED").unwrap(), Mood::Excited);
        assert!(Mood::from_str("calm").is_err());
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Mood::Tired.to_string(), "Tired");
        assert_eq!(Mood::Angry.as_ref(), "Angry");
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let all: Vec<Mood> = Mood::iter().collect();
        assert_eq!(
            all,
            vec![Mood::Happy, Mood::Sad, Mood::Angry, Mood::Tired, Mood::Excited]
        );
    }

    #[test]
    fn scores_rank_moods() {
        assert_eq!(Mood::Happy.score(), 5);
        assert_eq!(Mood::Excited.score(), 5);
        assert_eq!(Mood::Tired.score(), 3);
        assert_eq!(Mood::Sad.score(), 2);
        assert_eq!(Mood::Angry.score(), 1);
        assert_eq!(Mood::iter().map(Mood::score).max(), Some(MAX_SCORE));
    }

    #[test]
    fn legacy_indexes_map_best_to_worst() {
        assert_eq!(Mood::from_legacy_index(0), Some(Mood::Excited));
        assert_eq!(Mood::from_legacy_index(1), Some(Mood::Happy));
        assert_eq!(Mood::from_legacy_index(4), Some(Mood::Angry));
        assert_eq!(Mood::from_legacy_index(5), None);
        assert_eq!(LEGACY_MOOD_LABELS.len(), 5);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Mood::Sad).unwrap();
        assert_eq!(json, "\"Sad\"");
    }
}
