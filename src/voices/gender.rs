use std::fmt;

/// Gender class used to pick a voice pool for a new character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

/// Title prefixes and first names classified as male; every other key
/// falls back to the female pool. Compared case-insensitively against
/// the start of the normalized key.
const MALE_KEY_PREFIXES: [&str; 7] = ["mr.", "dr.", "david", "doug", "gary", "jeffrey", "keith"];

impl Gender {
    /// Classify a character key by its title or first name
    pub fn classify(key: &str) -> Self {
        let key = key.to_lowercase();
        if MALE_KEY_PREFIXES.iter().any(|p| key.starts_with(p)) {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    /// The fixed voice pool for this gender class
    pub fn pool(self) -> &'static [&'static str] {
        match self {
            Gender::Male => &MALE_VOICES,
            Gender::Female => &FEMALE_VOICES,
        }
    }

    /// Parse the 1-based pool index out of a voice identifier of this
    /// gender (e.g. "male_voice_3" -> 3)
    pub fn voice_index(self, voice: &str) -> Option<usize> {
        let prefix = match self {
            Gender::Male => "male_voice_",
            Gender::Female => "female_voice_",
        };
        voice.strip_prefix(prefix).and_then(|i| i.parse().ok())
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Fixed male voice pool, matched one-to-one against the synthesis
/// backend's voice table.
pub const MALE_VOICES: [&str; 27] = [
    "male_voice_1",
    "male_voice_2",
    "male_voice_3",
    "male_voice_4",
    "male_voice_5",
    "male_voice_6",
    "male_voice_7",
    "male_voice_8",
    "male_voice_9",
    "male_voice_10",
    "male_voice_11",
    "male_voice_12",
    "male_voice_13",
    "male_voice_14",
    "male_voice_15",
    "male_voice_16",
    "male_voice_17",
    "male_voice_18",
    "male_voice_19",
    "male_voice_20",
    "male_voice_21",
    "male_voice_22",
    "male_voice_23",
    "male_voice_24",
    "male_voice_25",
    "male_voice_26",
    "male_voice_27",
];

/// Fixed female voice pool.
pub const FEMALE_VOICES: [&str; 22] = [
    "female_voice_1",
    "female_voice_2",
    "female_voice_3",
    "female_voice_4",
    "female_voice_5",
    "female_voice_6",
    "female_voice_7",
    "female_voice_8",
    "female_voice_9",
    "female_voice_10",
    "female_voice_11",
    "female_voice_12",
    "female_voice_13",
    "female_voice_14",
    "female_voice_15",
    "female_voice_16",
    "female_voice_17",
    "female_voice_18",
    "female_voice_19",
    "female_voice_20",
    "female_voice_21",
    "female_voice_22",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Gender::classify("MR.STEINGLASS"), Gender::Male);
        assert_eq!(Gender::classify("DR.ROBERTS"), Gender::Male);
        assert_eq!(Gender::classify("David"), Gender::Male);
        assert_eq!(Gender::classify("Doug"), Gender::Male);
        assert_eq!(Gender::classify("Gary"), Gender::Male);
        assert_eq!(Gender::classify("Jeffrey"), Gender::Male);
        assert_eq!(Gender::classify("Keith"), Gender::Male);

        assert_eq!(Gender::classify("MS.NECHELES"), Gender::Female);
        assert_eq!(Gender::classify("MRS.DANIELS"), Gender::Female);
        assert_eq!(Gender::classify("THECOURT"), Gender::Female);
    }

    #[test]
    fn test_voice_index() {
        assert_eq!(Gender::Male.voice_index("male_voice_3"), Some(3));
        assert_eq!(Gender::Female.voice_index("female_voice_22"), Some(22));
        // a female id carries no male index
        assert_eq!(Gender::Male.voice_index("female_voice_3"), None);
        assert_eq!(Gender::Female.voice_index("narrator"), None);
    }

    #[test]
    fn test_pools_are_disjoint() {
        for voice in MALE_VOICES {
            assert!(!FEMALE_VOICES.contains(&voice));
        }
    }
}
