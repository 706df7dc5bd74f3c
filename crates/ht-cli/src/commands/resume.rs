use std::io;
use std::path::Path;

use ht_narrator::{HttpNarrator, NarratorConfig};
use ht_play::{Console, TurnLoop};

pub fn run(
    saves: &Path,
    id: &str,
    seed: Option<u64>,
    narrator: NarratorConfig,
) -> Result<(), String> {
    let config = super::play_config(saves, seed);
    let state = super::load_session(saves, id)?;
    let example = narrator.example;
    let narrator =
        HttpNarrator::new(narrator).map_err(|e| format!("failed to set up narrator: {e}"))?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    let mut game =
        TurnLoop::new(state, narrator, config.store(), config.rng()).with_example(example);
    game.resume(&mut console).map_err(|e| e.to_string())
}
