use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use ht_session::SessionStore;

pub fn run(saves: &Path) -> Result<(), String> {
    let store = SessionStore::new(saves);
    let sessions = store.list().map_err(|e| e.to_string())?;

    if sessions.is_empty() {
        println!("  No saved sessions in {}.", saves.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Session", "Character", "Description", "Location", "Events", "Saved",
    ]);

    for s in &sessions {
        let saved = s
            .last_saved
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            s.session_id.clone(),
            s.character_name.clone(),
            s.description.clone(),
            s.location.clone(),
            s.events.to_string(),
            saved,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} sessions", sessions.len());
    Ok(())
}
