//! Player characters and their derived statistics.
//!
//! A `Character` owns its ability scores and proficiency sets; saving
//! throws, skill bonuses, and armor class are derived from those and
//! cached on the struct so they serialize alongside the raw scores.
//! Use [`crate::builder::CharacterBuilder`] to create one in the right
//! order.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ability::{Ability, AbilityScores};
use crate::class::hit_die_for;
use crate::error::{MechError, MechResult};
use crate::skill::Skill;

/// Base armor class before the dexterity modifier.
pub const BASE_ARMOR_CLASS: i32 = 10;

/// A player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    /// Character name.
    pub name: String,
    /// Character level.
    pub level: u32,
    /// Race name as entered.
    pub race: String,
    /// Class name as entered.
    pub character_class: String,
    /// Background.
    pub background: String,
    /// Alignment.
    pub alignment: String,
    /// Raw ability scores, racial bonuses included.
    pub abilities: AbilityScores,
    /// Current hit points.
    pub hit_points: i32,
    /// Maximum hit points.
    pub max_hit_points: i32,
    /// Armor class.
    pub armor_class: i32,
    /// Proficiency bonus.
    pub proficiency_bonus: i32,
    /// Walking speed in feet.
    pub speed: u32,
    /// Derived saving throw bonuses.
    pub saving_throws: BTreeMap<Ability, i32>,
    /// Derived skill bonuses.
    #[serde(deserialize_with = "known_skill_bonuses")]
    pub skills: BTreeMap<Skill, i32>,
    /// Skills the character is proficient in.
    #[serde(deserialize_with = "known_skill_proficiencies")]
    pub skill_proficiencies: BTreeSet<Skill>,
    /// Saving throws the character is proficient in.
    pub saving_throw_proficiencies: BTreeSet<Ability>,
    /// Racial traits.
    pub racial_traits: Vec<String>,
    /// Carried items.
    pub inventory: Vec<String>,
    /// Equipped items.
    pub equipment: Equipment,
    /// Coins.
    #[serde(flatten)]
    pub purse: Purse,
    /// Experience points.
    pub experience_points: u32,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: 1,
            race: String::new(),
            character_class: String::new(),
            background: String::new(),
            alignment: String::new(),
            abilities: AbilityScores::default(),
            hit_points: 0,
            max_hit_points: 0,
            armor_class: BASE_ARMOR_CLASS,
            proficiency_bonus: 2,
            speed: 30,
            saving_throws: BTreeMap::new(),
            skills: BTreeMap::new(),
            skill_proficiencies: BTreeSet::new(),
            saving_throw_proficiencies: BTreeSet::new(),
            racial_traits: Vec::new(),
            inventory: Vec::new(),
            equipment: Equipment::default(),
            purse: Purse::default(),
            experience_points: 0,
        }
    }
}

impl Character {
    /// Create an empty level-1 character.
    pub fn new(name: impl Into<String>) -> Self {
        let mut character = Self {
            name: name.into(),
            ..Self::default()
        };
        character.update_derived_stats();
        character
    }

    /// Modifier for an ability.
    pub fn ability_modifier(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    /// Saving throw bonus: modifier plus proficiency if proficient.
    pub fn saving_throw(&self, ability: Ability) -> i32 {
        let proficiency = if self.saving_throw_proficiencies.contains(&ability) {
            self.proficiency_bonus
        } else {
            0
        };
        self.ability_modifier(ability) + proficiency
    }

    /// Skill bonus: governing modifier plus proficiency if proficient.
    pub fn skill_bonus(&self, skill: Skill) -> i32 {
        let proficiency = if self.skill_proficiencies.contains(&skill) {
            self.proficiency_bonus
        } else {
            0
        };
        self.ability_modifier(skill.ability()) + proficiency
    }

    /// Recompute every saving throw, skill bonus, and armor class.
    pub fn update_derived_stats(&mut self) {
        self.saving_throws = Ability::ALL
            .into_iter()
            .map(|a| (a, self.saving_throw(a)))
            .collect();
        self.skills = Skill::ALL
            .into_iter()
            .map(|s| (s, self.skill_bonus(s)))
            .collect();
        self.armor_class = BASE_ARMOR_CLASS + self.ability_modifier(Ability::Dexterity);
    }

    /// Set maximum and current HP from the class hit die and CON modifier.
    ///
    /// Unrecognized classes use a d8. The result never drops below 1.
    pub fn calculate_hp(&mut self) -> i32 {
        let hit_die = hit_die_for(&self.character_class) as i32;
        self.max_hit_points = (hit_die + self.ability_modifier(Ability::Constitution)).max(1);
        self.hit_points = self.max_hit_points;
        self.max_hit_points
    }

    /// Add a skill proficiency, recomputing only that skill.
    ///
    /// Returns false if the character was already proficient.
    pub fn add_skill_proficiency(&mut self, skill: Skill) -> bool {
        if !self.skill_proficiencies.insert(skill) {
            return false;
        }
        self.skills.insert(skill, self.skill_bonus(skill));
        true
    }

    /// Add a saving throw proficiency, recomputing only that save.
    ///
    /// Returns false if the character was already proficient.
    pub fn add_saving_throw_proficiency(&mut self, ability: Ability) -> bool {
        if !self.saving_throw_proficiencies.insert(ability) {
            return false;
        }
        self.saving_throws.insert(ability, self.saving_throw(ability));
        true
    }

    /// Put an item in the inventory.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Remove one copy of an item from the inventory.
    pub fn remove_item(&mut self, item: &str) -> MechResult<()> {
        let index = self
            .inventory
            .iter()
            .position(|i| i == item)
            .ok_or_else(|| MechError::NotInInventory(item.to_string()))?;
        self.inventory.remove(index);
        Ok(())
    }

    /// Equip a carried item.
    pub fn equip(&mut self, item: &str, slot: EquipSlot) -> MechResult<()> {
        if !self.inventory.iter().any(|i| i == item) {
            return Err(MechError::NotInInventory(item.to_string()));
        }
        match slot {
            EquipSlot::Weapons => self.equipment.weapons.push(item.to_string()),
            EquipSlot::Armor => self.equipment.armor = Some(item.to_string()),
            EquipSlot::Shield => self.equipment.shield = Some(item.to_string()),
        }
        Ok(())
    }

    /// Unequip an item from a slot.
    pub fn unequip(&mut self, item: &str, slot: EquipSlot) -> MechResult<()> {
        let not_equipped = || MechError::NotEquipped {
            item: item.to_string(),
            slot: slot.to_string(),
        };
        match slot {
            EquipSlot::Weapons => {
                let index = self
                    .equipment
                    .weapons
                    .iter()
                    .position(|w| w == item)
                    .ok_or_else(not_equipped)?;
                self.equipment.weapons.remove(index);
            }
            EquipSlot::Armor => {
                if self.equipment.armor.as_deref() != Some(item) {
                    return Err(not_equipped());
                }
                self.equipment.armor = None;
            }
            EquipSlot::Shield => {
                if self.equipment.shield.as_deref() != Some(item) {
                    return Err(not_equipped());
                }
                self.equipment.shield = None;
            }
        }
        Ok(())
    }

    /// Add experience points.
    pub fn gain_experience(&mut self, amount: u32) {
        self.experience_points = self.experience_points.saturating_add(amount);
    }

    /// Lose hit points, stopping at 0. Returns the new current HP.
    pub fn take_damage(&mut self, amount: u32) -> i32 {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.hit_points = self.hit_points.saturating_sub(amount).max(0);
        self.hit_points
    }

    /// Regain hit points, stopping at the maximum. Returns the new current HP.
    pub fn heal(&mut self, amount: u32) -> i32 {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.hit_points = self.hit_points.saturating_add(amount).min(self.max_hit_points);
        self.hit_points
    }

    /// Short description, e.g. "Level 1 elf wizard".
    pub fn summary(&self) -> String {
        format!(
            "Level {} {} {}",
            self.level, self.race, self.character_class
        )
    }

    /// Current over maximum hit points, e.g. "9/9".
    pub fn hp_display(&self) -> String {
        format!("{}/{}", self.hit_points, self.max_hit_points)
    }
}

/// Equipped gear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    /// Worn armor.
    pub armor: Option<String>,
    /// Wielded weapons.
    pub weapons: Vec<String>,
    /// Carried shield.
    pub shield: Option<String>,
}

/// An equipment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipSlot {
    /// Body armor (one item).
    Armor,
    /// Weapons (any number).
    Weapons,
    /// Shield (one item).
    Shield,
}

impl FromStr for EquipSlot {
    type Err = MechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "armor" | "armour" => Ok(Self::Armor),
            "weapon" | "weapons" => Ok(Self::Weapons),
            "shield" => Ok(Self::Shield),
            other => Err(MechError::InvalidChoice(format!(
                "unknown equipment slot '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Armor => write!(f, "armor"),
            Self::Weapons => write!(f, "weapons"),
            Self::Shield => write!(f, "shield"),
        }
    }
}

/// A coin denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coin {
    /// Gold pieces.
    Gold,
    /// Silver pieces.
    Silver,
    /// Copper pieces.
    Copper,
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gold => write!(f, "gold"),
            Self::Silver => write!(f, "silver"),
            Self::Copper => write!(f, "copper"),
        }
    }
}

/// Coins carried by a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Purse {
    /// Gold pieces.
    pub gold: u32,
    /// Silver pieces.
    pub silver: u32,
    /// Copper pieces.
    pub copper: u32,
}

impl Purse {
    fn slot_mut(&mut self, coin: Coin) -> &mut u32 {
        match coin {
            Coin::Gold => &mut self.gold,
            Coin::Silver => &mut self.silver,
            Coin::Copper => &mut self.copper,
        }
    }

    /// Add coins.
    pub fn credit(&mut self, coin: Coin, amount: u32) {
        let slot = self.slot_mut(coin);
        *slot = slot.saturating_add(amount);
    }

    /// Remove coins, failing without change if there are not enough.
    pub fn debit(&mut self, coin: Coin, amount: u32) -> MechResult<()> {
        let slot = self.slot_mut(coin);
        if *slot < amount {
            return Err(MechError::InsufficientFunds {
                coin: coin.to_string(),
                needed: amount,
                available: *slot,
            });
        }
        *slot -= amount;
        Ok(())
    }

    /// Total value in copper pieces (1 gp = 10 sp = 100 cp).
    pub fn total_copper(&self) -> u64 {
        u64::from(self.gold) * 100 + u64::from(self.silver) * 10 + u64::from(self.copper)
    }
}

// Saves from other tools may name skills this rules set does not know.
fn known_skill_proficiencies<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeSet<Skill>, D::Error> {
    let names = Vec::<String>::deserialize(deserializer)?;
    Ok(names
        .iter()
        .filter_map(|name| match name.parse::<Skill>() {
            Ok(skill) => Some(skill),
            Err(_) => {
                tracing::warn!(skill = %name, "ignoring unknown skill proficiency");
                None
            }
        })
        .collect())
}

fn known_skill_bonuses<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<Skill, i32>, D::Error> {
    let entries = BTreeMap::<String, i32>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|(name, bonus)| name.parse::<Skill>().ok().map(|skill| (skill, bonus)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Character {
        let mut c = Character::new("Mira");
        c.abilities = AbilityScores::new([8, 16, 14, 12, 13, 10]);
        c.character_class = "Rogue".to_string();
        c.update_derived_stats();
        c
    }

    #[test]
    fn new_character_defaults() {
        let c = Character::new("Ash");
        assert_eq!(c.level, 1);
        assert_eq!(c.armor_class, 10);
        assert_eq!(c.proficiency_bonus, 2);
        assert_eq!(c.speed, 30);
        assert_eq!(c.saving_throws.len(), 6);
        assert_eq!(c.skills.len(), 12);
    }

    #[test]
    fn derived_stats() {
        let c = sample();
        assert_eq!(c.armor_class, 13);
        assert_eq!(c.saving_throws[&Ability::Strength], -1);
        assert_eq!(c.skills[&Skill::Stealth], 3);
        assert_eq!(c.skills[&Skill::Perception], 1);
    }

    #[test]
    fn proficiency_updates_only_that_entry() {
        let mut c = sample();
        assert!(c.add_skill_proficiency(Skill::Stealth));
        assert_eq!(c.skills[&Skill::Stealth], 5);
        assert_eq!(c.skills[&Skill::Acrobatics], 3);
        assert!(!c.add_skill_proficiency(Skill::Stealth));

        assert!(c.add_saving_throw_proficiency(Ability::Dexterity));
        assert_eq!(c.saving_throws[&Ability::Dexterity], 5);
        assert_eq!(c.saving_throw(Ability::Intelligence), 1);
    }

    #[test]
    fn hp_uses_class_hit_die() {
        let mut c = sample();
        assert_eq!(c.calculate_hp(), 10);
        assert_eq!(c.hit_points, 10);

        c.character_class = "barbarian".to_string();
        assert_eq!(c.calculate_hp(), 14);
    }

    #[test]
    fn hp_never_below_one() {
        let mut c = Character::new("Frail");
        c.character_class = "sorcerer".to_string();
        c.abilities.constitution = 1;
        assert_eq!(c.calculate_hp(), 1);
    }

    #[test]
    fn damage_and_healing_clamp() {
        let mut c = sample();
        c.calculate_hp();
        assert_eq!(c.take_damage(4), 6);
        assert_eq!(c.heal(100), 10);
        assert_eq!(c.take_damage(50), 0);
        assert_eq!(c.hp_display(), "0/10");
    }

    #[test]
    fn huge_damage_and_healing_stay_in_range() {
        let mut c = sample();
        c.calculate_hp();
        c.take_damage(5);
        assert_eq!(c.take_damage(u32::MAX), 0);
        assert_eq!(c.heal(i32::MAX as u32), 10);
        c.take_damage(5);
        assert_eq!(c.heal(u32::MAX), 10);
        assert_eq!(c.take_damage(i32::MAX as u32 + 1), 0);
    }

    #[test]
    fn inventory_and_equipment() {
        let mut c = sample();
        assert!(c.equip("Dagger", EquipSlot::Weapons).is_err());

        c.add_item("Dagger");
        c.add_item("Leather Armor");
        c.equip("Dagger", EquipSlot::Weapons).unwrap();
        c.equip("Leather Armor", EquipSlot::Armor).unwrap();
        assert_eq!(c.equipment.weapons, vec!["Dagger"]);
        assert_eq!(c.equipment.armor.as_deref(), Some("Leather Armor"));

        c.unequip("Leather Armor", EquipSlot::Armor).unwrap();
        assert!(c.equipment.armor.is_none());
        assert!(c.unequip("Leather Armor", EquipSlot::Armor).is_err());
        assert!(c.unequip("Sword", EquipSlot::Weapons).is_err());

        c.remove_item("Dagger").unwrap();
        assert!(c.remove_item("Dagger").is_err());
    }

    #[test]
    fn purse() {
        let mut p = Purse::default();
        p.credit(Coin::Gold, 3);
        p.credit(Coin::Copper, 7);
        assert_eq!(p.total_copper(), 307);
        assert!(p.debit(Coin::Gold, 5).is_err());
        assert_eq!(p.gold, 3);
        p.debit(Coin::Gold, 1).unwrap();
        assert_eq!(p.gold, 2);
    }

    #[test]
    fn slot_parse() {
        assert_eq!("Weapon".parse::<EquipSlot>().unwrap(), EquipSlot::Weapons);
        assert!("ring".parse::<EquipSlot>().is_err());
    }

    #[test]
    fn older_documents_get_defaults() {
        let c: Character = serde_json::from_str(r#"{"name": "Old", "gold": 5}"#).unwrap();
        assert_eq!(c.level, 1);
        assert_eq!(c.armor_class, 10);
        assert_eq!(c.proficiency_bonus, 2);
        assert_eq!(c.speed, 30);
        assert_eq!(c.purse.gold, 5);
        assert!(c.inventory.is_empty());
    }

    #[test]
    fn unknown_skills_in_older_documents_are_skipped() {
        let json = r#"{
            "name": "Old",
            "skill_proficiencies": ["perception", "basket weaving"],
            "skills": {"stealth": 1, "basket weaving": 4}
        }"#;
        let c: Character = serde_json::from_str(json).unwrap();
        assert_eq!(
            c.skill_proficiencies.iter().copied().collect::<Vec<_>>(),
            vec![Skill::Perception]
        );
        assert_eq!(c.skills.len(), 1);
        assert_eq!(c.skills[&Skill::Stealth], 1);
    }

    #[test]
    fn serde_roundtrip() {
        let mut c = sample();
        c.add_skill_proficiency(Skill::Perception);
        c.purse.credit(Coin::Silver, 12);
        let json = serde_json::to_string(&c).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
