//! Word pools per difficulty

use std::collections::BTreeMap;

use rand::Rng;

use super::difficulty::Difficulty;
use super::error::ConfigError;

const EASY_WORDS: &[&str] = &[
    "fire", "wind", "rock", "tree", "moon", "star", "rain", "snow", "sand", "wave", "leaf",
    "bird", "fish", "lamp", "road", "game", "life", "light",
];

const MEDIUM_WORDS: &[&str] = &[
    "shadow", "shield", "planet", "garden", "rocket", "forest", "castle", "bridge", "silver",
    "winter", "magic", "thunder", "island", "dragon", "pencil", "window",
];

const HARD_WORDS: &[&str] = &[
    "labyrinth", "kaleidoscope", "rhythm", "phenomenon", "juxtapose", "quarantine",
    "silhouette", "mnemonic", "onomatopoeia", "bureaucracy", "conscientious", "hierarchy",
    "miscellaneous", "perseverance",
];

/// Per-difficulty word pools
#[derive(Debug, Clone, PartialEq)]
pub struct WordBank {
    pools: BTreeMap<Difficulty, Vec<String>>,
}

impl Default for WordBank {
    fn default() -> Self {
        let pool = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        let mut pools = BTreeMap::new();
        pools.insert(Difficulty::Easy, pool(EASY_WORDS));
        pools.insert(Difficulty::Medium, pool(MEDIUM_WORDS));
        pools.insert(Difficulty::Hard, pool(HARD_WORDS));
        Self { pools }
    }
}

impl WordBank {
    /// Build a bank from raw pools. Words are trimmed and lower-cased,
    /// blank entries are dropped. Pools are not validated here.
    pub fn new(pools: impl IntoIterator<Item = (Difficulty, Vec<String>)>) -> Self {
        let pools = pools
            .into_iter()
            .map(|(d, words)| {
                let words = words
                    .into_iter()
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect();
                (d, words)
            })
            .collect();
        Self { pools }
    }

    /// Parse `{"easy": [...], "medium": [...], "hard": [...]}` and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<Difficulty, Vec<String>> = serde_json::from_str(json)?;
        let bank = Self::new(raw);
        bank.validate()?;
        Ok(bank)
    }

    /// Check that every difficulty has at least one word
    pub fn validate(&self) -> Result<(), ConfigError> {
        for d in Difficulty::ALL {
            self.check_pool(d)?;
        }
        Ok(())
    }

    /// Check a single pool
    pub fn check_pool(&self, difficulty: Difficulty) -> Result<(), ConfigError> {
        match self.pools.get(&difficulty) {
            None => Err(ConfigError::MissingPool(difficulty)),
            Some(words) if words.is_empty() => Err(ConfigError::EmptyPool(difficulty)),
            Some(_) => Ok(()),
        }
    }

    pub fn words(&self, difficulty: Difficulty) -> &[String] {
        self.pools.get(&difficulty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pick a word uniformly at random. Repeats are allowed.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<&str, ConfigError> {
        self.check_pool(difficulty)?;
        let words = self.words(difficulty);
        let idx = rng.random_range(0..words.len());
        Ok(&words[idx])
    }
}
