use colored::Colorize;

use ht_mechanics::DiceExpression;
use ht_play::PlayConfig;

pub fn run(notation: &str, seed: Option<u64>) -> Result<(), String> {
    let expression = DiceExpression::parse(notation).map_err(|e| e.to_string())?;
    let config = match seed {
        Some(seed) => PlayConfig::default().with_seed(seed),
        None => PlayConfig::default(),
    };
    let result = expression.roll(&mut config.rng());

    println!("  {}: {}", expression.to_string().bold(), result);
    println!(
        "  {}",
        format!("range {} to {}", expression.min(), expression.max()).dimmed()
    );
    Ok(())
}
