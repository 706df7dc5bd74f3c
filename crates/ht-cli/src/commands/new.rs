use std::io;
use std::path::Path;

use colored::Colorize;

use ht_narrator::{HttpNarrator, NarratorConfig};
use ht_play::{Console, TurnLoop, create_character};
use ht_session::SessionState;

pub fn run(saves: &Path, seed: Option<u64>, narrator: NarratorConfig) -> Result<(), String> {
    let config = super::play_config(saves, seed);
    let example = narrator.example;
    let narrator =
        HttpNarrator::new(narrator).map_err(|e| format!("failed to set up narrator: {e}"))?;

    println!("  {} to Hearthtale!", "Welcome".bold());
    println!(
        "  Narrator: {} ({})",
        narrator.config().model,
        narrator.config().endpoint().dimmed()
    );

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    let mut rng = config.rng();

    let character = create_character(&mut console, &mut rng).map_err(|e| e.to_string())?;
    let state = SessionState::new(character);
    let mut game = TurnLoop::new(state, narrator, config.store(), rng).with_example(example);
    game.start(&mut console).map_err(|e| e.to_string())
}
