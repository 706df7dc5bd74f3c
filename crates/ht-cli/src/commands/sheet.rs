use std::path::Path;

use ht_play::render_sheet;

pub fn run(saves: &Path, id: &str) -> Result<(), String> {
    let state = super::load_session(saves, id)?;
    println!("{}", render_sheet(&state.player));
    Ok(())
}
