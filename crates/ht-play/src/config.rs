//! Play configuration.

use std::path::PathBuf;

use ht_session::SessionStore;
use ht_session::store::DEFAULT_SAVES_DIR;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration for an interactive session.
#[derive(Debug, Clone)]
pub struct PlayConfig {
    /// Dice seed for reproducible play. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Directory holding save files.
    pub saves_dir: PathBuf,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            seed: None,
            saves_dir: PathBuf::from(DEFAULT_SAVES_DIR),
        }
    }
}

impl PlayConfig {
    /// Set the dice seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the saves directory.
    pub fn with_saves_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.saves_dir = dir.into();
        self
    }

    /// The dice source for this session.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// The session store for this session.
    pub fn store(&self) -> SessionStore {
        SessionStore::new(&self.saves_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn defaults() {
        let cfg = PlayConfig::default();
        assert!(cfg.seed.is_none());
        assert_eq!(cfg.saves_dir, PathBuf::from("saves"));
        assert_eq!(cfg.store().dir(), PathBuf::from("saves"));
    }

    #[test]
    fn seeded_rng_repeats() {
        let cfg = PlayConfig::default().with_seed(7).with_saves_dir("/tmp/x");
        let a: u32 = cfg.rng().random();
        let b: u32 = cfg.rng().random();
        assert_eq!(a, b);
        assert_eq!(cfg.saves_dir, PathBuf::from("/tmp/x"));
    }
}
