pub mod gender;

pub use gender::*;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Default similarity score a fuzzy match must exceed to be accepted.
/// Tuned on OCR'd legal transcripts; override with
/// [`VoiceRegistry::with_threshold`] for other corpora.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.65;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("voice store i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed voice store: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{gender} voice pool exhausted")]
    PoolExhausted { gender: Gender },
}

static KEY_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^BY |[:\s]+|\.$").expect("key noise pattern"));

/// Normalize a character label into a registry key: uppercase, drop a
/// leading "BY ", strip colons and whitespace and a trailing period.
/// "MR. STEINGLASS: " and "MR . STEINGLASS" both become "MR.STEINGLASS".
pub fn normalize_key(label: &str) -> String {
    let upper = label.to_uppercase();
    KEY_NOISE.replace_all(upper.trim(), "").into_owned()
}

/// Persisted, fuzzy-matched mapping from character key to synthetic
/// voice identifier.
///
/// Voices are allocated from the two fixed gender pools in order; role
/// keys ("Q", "THEWITNESS", "A") are aliased onto whichever real name
/// most recently filled that courtroom role. Every mutation is written
/// straight back to the store, so the file always matches memory.
#[derive(Debug)]
pub struct VoiceRegistry {
    path: PathBuf,
    voices: BTreeMap<String, String>,
    match_threshold: f64,
    /// next unused 1-based slot per pool
    next_male: usize,
    next_female: usize,
    /// keys whose fuzzy match has already been logged
    matched_keys: HashSet<String>,
}

impl VoiceRegistry {
    /// Empty registry persisting to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            voices: BTreeMap::new(),
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            next_male: 1,
            next_female: 1,
            matched_keys: HashSet::new(),
        }
    }

    /// Load the registry persisted at `path`; a missing file yields an
    /// empty registry. The per-gender counters resume one past the
    /// highest index already on file, so resumed runs never reassign a
    /// voice.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let mut registry = Self::new(path);
        if registry.path.exists() {
            let content = std::fs::read_to_string(&registry.path)?;
            registry.voices = serde_json::from_str(&content)?;

            let max_index = |gender: Gender| {
                registry
                    .voices
                    .values()
                    .filter_map(|v| gender.voice_index(v))
                    .max()
                    .unwrap_or(0)
            };
            registry.next_male = max_index(Gender::Male) + 1;
            registry.next_female = max_index(Gender::Female) + 1;
            info!(
                "loaded {} voices from {} (next male {}, next female {})",
                registry.voices.len(),
                registry.path.display(),
                registry.next_male,
                registry.next_female
            );
        }
        Ok(registry)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Resolve a character key to its voice, via fuzzy match against
    /// the known keys or by allocating the next voice from the pool of
    /// the key's gender class. Fresh assignments are persisted before
    /// returning.
    pub fn resolve(&mut self, key: &str) -> Result<String, RegistryError> {
        if let Some(voice) = self.best_match(key) {
            return Ok(voice);
        }

        let gender = Gender::classify(key);
        let next = match gender {
            Gender::Male => &mut self.next_male,
            Gender::Female => &mut self.next_female,
        };
        let voice = *gender
            .pool()
            .get(*next - 1)
            .ok_or(RegistryError::PoolExhausted { gender })?;
        *next += 1;

        self.voices.insert(key.to_string(), voice.to_string());
        self.save()?;
        Ok(voice.to_string())
    }

    /// Resolve `key` (creating a voice if needed) and point every alias
    /// at the same voice, overwriting prior mappings. Used for the role
    /// keys so "Q" always follows the current examiner and
    /// "THEWITNESS"/"A" the current witness.
    pub fn assign_alias(&mut self, key: &str, aliases: &[&str]) -> Result<String, RegistryError> {
        let voice = self.resolve(key)?;
        for alias in aliases {
            self.voices.insert((*alias).to_string(), voice.clone());
        }
        self.save()?;
        Ok(voice)
    }

    /// Write the store, sorted by voice id so re-saves of the same
    /// content are byte-identical.
    pub fn save(&self) -> Result<(), RegistryError> {
        let mut entries: Vec<(&String, &String)> = self.voices.iter().collect();
        entries.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));

        let mut object = serde_json::Map::new();
        for (key, voice) in entries {
            object.insert(key.clone(), Value::String(voice.clone()));
        }
        std::fs::write(&self.path, serde_json::to_string(&Value::Object(object))?)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best fuzzy match for `key` among the known keys, if it clears
    /// the threshold. Logged once per distinct key, except exact repeats.
    fn best_match(&mut self, key: &str) -> Option<String> {
        let (best_key, best_score) = self
            .voices
            .keys()
            .map(|existing| (existing, strsim::sorensen_dice(key, existing)))
            .max_by(|a, b| a.1.total_cmp(&b.1))?;

        if best_score <= self.match_threshold {
            return None;
        }

        let voice = self.voices.get(best_key.as_str()).cloned();
        if self.matched_keys.insert(key.to_string()) && best_score < 1.0 {
            info!("matched {} with {} (score {:.2})", key, best_key, best_score);
        }
        voice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn registry(dir: &tempfile::TempDir) -> VoiceRegistry {
        VoiceRegistry::new(dir.path().join("voices.json"))
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Q. "), "Q");
        assert_eq!(normalize_key("MR. STEINGLASS: "), "MR.STEINGLASS");
        assert_eq!(normalize_key("MS . NECHELES"), "MS.NECHELES");
        assert_eq!(normalize_key("BY MR. BOVE:"), "MR.BOVE");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut registry = registry(&dir);

        let first = registry.resolve("MR.STEINGLASS").unwrap();
        let second = registry.resolve("MR.STEINGLASS").unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_allocation_follows_gender_pools() {
        let dir = tempdir().unwrap();
        let mut registry = registry(&dir);

        assert_eq!(registry.resolve("MR.STEINGLASS").unwrap(), "male_voice_1");
        assert_eq!(registry.resolve("MS.NECHELES").unwrap(), "female_voice_1");
        assert_eq!(registry.resolve("THECOURT").unwrap(), "female_voice_2");
        assert_eq!(registry.resolve("DR.ROBERTS").unwrap(), "male_voice_2");
    }

    #[test]
    fn test_fuzzy_match_reuses_voice_for_ocr_typos() {
        let dir = tempdir().unwrap();
        let mut registry = registry(&dir);

        let original = registry.resolve("MR.STEINGLASS").unwrap();
        let typo = registry.resolve("MR.STEINGLAS").unwrap();
        assert_eq!(original, typo);
        // the typo never becomes a key of its own
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_dissimilar_keys_get_fresh_voices() {
        let dir = tempdir().unwrap();
        let mut registry = registry(&dir);

        let first = registry.resolve("MS.NECHELES").unwrap();
        let second = registry.resolve("MS.HOFFINGER").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_assign_alias_points_roles_at_same_voice() {
        let dir = tempdir().unwrap();
        let mut registry = registry(&dir);

        let voice = registry.assign_alias("MR.STEINGLASS", &["Q"]).unwrap();
        assert_eq!(registry.resolve("Q").unwrap(), voice);

        let witness = registry
            .assign_alias("DAVIDPECKER", &["THEWITNESS", "A"])
            .unwrap();
        assert_eq!(registry.resolve("THEWITNESS").unwrap(), witness);
        assert_eq!(registry.resolve("A").unwrap(), witness);
    }

    #[test]
    fn test_assign_alias_overwrites_previous_role_holder() {
        let dir = tempdir().unwrap();
        let mut registry = registry(&dir);

        let first = registry.assign_alias("DAVIDPECKER", &["THEWITNESS", "A"]).unwrap();
        let second = registry.assign_alias("MS.HOFFINGER", &["THEWITNESS", "A"]).unwrap();
        assert_ne!(first, second);
        assert_eq!(registry.resolve("A").unwrap(), second);
    }

    #[test]
    fn test_fresh_allocations_never_collide() {
        let dir = tempdir().unwrap();
        let mut registry = registry(&dir);

        let mut seen = HashSet::new();
        for key in ["MS.NECHELES", "MS.HOFFINGER", "THECOURT", "THECLERK"] {
            assert!(seen.insert(registry.resolve(key).unwrap()), "{key} collided");
        }
    }

    #[test]
    fn test_reload_resumes_counters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("voices.json");

        let mut registry = VoiceRegistry::new(&path);
        registry.resolve("MR.STEINGLASS").unwrap();
        registry.resolve("MS.NECHELES").unwrap();
        registry.resolve("MS.HOFFINGER").unwrap();

        let mut reloaded = VoiceRegistry::load(&path).unwrap();
        assert_eq!(reloaded.len(), 3);
        // a brand-new key must not collide with anything on file
        assert_eq!(reloaded.resolve("DR.ROBERTS").unwrap(), "male_voice_2");
        assert_eq!(reloaded.resolve("THECOURT").unwrap(), "female_voice_3");
    }

    #[test]
    fn test_load_missing_store_starts_empty() {
        let dir = tempdir().unwrap();
        let registry = VoiceRegistry::load(dir.path().join("absent.json")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_save_sorts_by_voice_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("voices.json");

        let mut registry = VoiceRegistry::new(&path);
        registry.resolve("MS.NECHELES").unwrap(); // female_voice_1
        registry.resolve("MR.STEINGLASS").unwrap(); // male_voice_1
        registry.resolve("MR.BLANCHE").unwrap(); // male_voice_2

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            on_disk,
            r#"{"MS.NECHELES":"female_voice_1","MR.STEINGLASS":"male_voice_1","MR.BLANCHE":"male_voice_2"}"#
        );
    }

    #[test]
    fn test_pool_exhaustion_is_an_error() {
        let dir = tempdir().unwrap();
        // a threshold no score can clear forces a fresh voice per key
        let mut registry = registry(&dir).with_threshold(2.0);

        for i in 0..MALE_VOICES.len() {
            registry.resolve(&format!("MR.KEY{i}")).unwrap();
        }
        let err = registry.resolve("MR.ONEMORE").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::PoolExhausted {
                gender: Gender::Male
            }
        ));
    }

    #[test]
    fn test_unwritable_store_is_fatal() {
        let mut registry = VoiceRegistry::new("/nonexistent-dir/voices.json");
        assert!(matches!(
            registry.resolve("MS.NECHELES"),
            Err(RegistryError::Io(_))
        ));
    }
}
