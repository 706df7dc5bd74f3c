//! Character sheet rendering.

use comfy_table::{ContentArrangement, Table};
use ht_mechanics::{Ability, Character, Skill};

/// Render a character sheet as plain text with tables.
pub fn render_sheet(c: &Character) -> String {
    let mut out = format!("=== {} ===\n{}\n", c.name, c.summary());
    out.push_str(&format!(
        "Background: {} | Alignment: {} | Experience: {} XP\n\n",
        or_dash(&c.background),
        or_dash(&c.alignment),
        c.experience_points
    ));

    let mut abilities = Table::new();
    abilities.set_content_arrangement(ContentArrangement::Dynamic);
    abilities.set_header(vec!["Ability", "Score", "Modifier", "Save"]);
    for ability in Ability::ALL {
        let mark = if c.saving_throw_proficiencies.contains(&ability) {
            " *"
        } else {
            ""
        };
        abilities.add_row(vec![
            ability.title().to_string(),
            c.abilities.get(ability).to_string(),
            format!("{:+}", c.ability_modifier(ability)),
            format!("{:+}{mark}", c.saving_throw(ability)),
        ]);
    }
    out.push_str(&format!("{abilities}\n\n"));

    out.push_str(&format!(
        "Hit Points: {} | Armor Class: {} | Speed: {} ft | Proficiency: {:+}\n\n",
        c.hp_display(),
        c.armor_class,
        c.speed,
        c.proficiency_bonus
    ));

    let mut skills = Table::new();
    skills.set_content_arrangement(ContentArrangement::Dynamic);
    skills.set_header(vec!["Skill", "Ability", "Bonus"]);
    for skill in Skill::ALL {
        let mark = if c.skill_proficiencies.contains(&skill) {
            " *"
        } else {
            ""
        };
        skills.add_row(vec![
            skill.to_string(),
            skill.ability().abbreviation().to_uppercase(),
            format!("{:+}{mark}", c.skill_bonus(skill)),
        ]);
    }
    out.push_str(&format!("{skills}\n\n"));

    out.push_str(&format!(
        "Wealth: {} gp, {} sp, {} cp\n",
        c.purse.gold, c.purse.silver, c.purse.copper
    ));
    out.push_str(&format!("Inventory: {}\n", list_or_dash(&c.inventory)));

    let eq = &c.equipment;
    out.push_str(&format!(
        "Equipped: armor {}, weapons {}, shield {}\n",
        eq.armor.as_deref().unwrap_or("-"),
        list_or_dash(&eq.weapons),
        eq.shield.as_deref().unwrap_or("-")
    ));
    if !c.racial_traits.is_empty() {
        out.push_str(&format!("Traits: {}\n", c.racial_traits.join(", ")));
    }
    out
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ht_mechanics::{AbilityScores, CharacterBuilder, Coin};

    #[test]
    fn renders_core_sections() {
        let mut c = CharacterBuilder::new("Aria")
            .class("wizard")
            .background("Sage")
            .with_scores(AbilityScores::standard_array())
            .apply_race("elf")
            .finish();
        c.add_skill_proficiency(Skill::Perception);
        c.purse.credit(Coin::Gold, 12);
        c.add_item("Spellbook");

        let sheet = render_sheet(&c);
        assert!(sheet.starts_with("=== Aria ===\nLevel 1 elf wizard"));
        assert!(sheet.contains("Background: Sage | Alignment: -"));
        assert!(sheet.contains("Dexterity"));
        assert!(sheet.contains("Armor Class: 13"));
        assert!(sheet.contains("Perception"));
        assert!(sheet.contains("+2 *"));
        assert!(sheet.contains("Wealth: 12 gp, 0 sp, 0 cp"));
        assert!(sheet.contains("Inventory: Spellbook"));
        assert!(sheet.contains("Traits: "));
    }
}
