pub mod new;
pub mod ping;
pub mod resume;
pub mod roll;
pub mod sessions;
pub mod sheet;

use std::path::Path;

use ht_play::PlayConfig;
use ht_session::{SessionState, SessionStore};

/// Play configuration from the global flags.
fn play_config(saves: &Path, seed: Option<u64>) -> PlayConfig {
    let config = PlayConfig::default().with_saves_dir(saves);
    match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

/// Load a session by id, or by file path when the argument ends in `.json`.
fn load_session(saves: &Path, id: &str) -> Result<SessionState, String> {
    let as_path = Path::new(id);
    tracing::debug!(id, saves = %saves.display(), "loading session");
    let loaded = if as_path.extension().is_some_and(|ext| ext == "json") {
        SessionStore::load_path(as_path)
    } else {
        SessionStore::new(saves).load(id)
    };
    loaded.map_err(|e| format!("failed to load session: {e}"))
}
