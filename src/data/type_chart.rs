use std::collections::HashMap;

/// Defensive matchups per type: (type, weak to, resists, immune to).
const DEFENSIVE_TABLE: &[(&str, &[&str], &[&str], &[&str])] = &[
    ("normal", &["fighting"], &[], &["ghost"]),
    ("fire", &["water", "ground", "rock"], &["fire", "grass", "ice", "bug", "steel", "fairy"], &[]),
    ("water", &["electric", "grass"], &["fire", "water", "ice", "steel"], &[]),
    ("electric", &["ground"], &["electric", "flying", "steel"], &[]),
    ("grass", &["fire", "ice", "poison", "flying", "bug"], &["water", "electric", "grass", "ground"], &[]),
    ("ice", &["fire", "fighting", "rock", "steel"], &["ice"], &[]),
    ("fighting", &["flying", "psychic", "fairy"], &["bug", "rock", "dark"], &[]),
    ("poison", &["ground", "psychic"], &["grass", "fighting", "poison", "bug", "fairy"], &[]),
    ("ground", &["water", "grass", "ice"], &["poison", "rock"], &["electric"]),
    ("flying", &["electric", "ice", "rock"], &["grass", "fighting", "bug"], &["ground"]),
    ("psychic", &["bug", "ghost", "dark"], &["fighting", "psychic"], &[]),
    ("bug", &["fire", "flying", "rock"], &["grass", "fighting", "ground"], &[]),
    ("rock", &["water", "grass", "fighting", "ground", "steel"], &["normal", "fire", "poison", "flying"], &[]),
    ("ghost", &["ghost", "dark"], &["poison", "bug"], &["normal", "fighting"]),
    ("dragon", &["ice", "dragon", "fairy"], &["fire", "water", "electric", "grass"], &[]),
    ("dark", &["fighting", "bug", "fairy"], &["ghost", "dark"], &["psychic"]),
    (
        "steel",
        &["fire", "fighting", "ground"],
        &["normal", "grass", "ice", "flying", "psychic", "bug", "rock", "dragon", "steel", "fairy"],
        &["poison"],
    ),
    ("fairy", &["poison", "steel"], &["fighting", "bug", "dark"], &["dragon"]),
];

#[derive(Clone, Copy, Debug)]
struct Defense {
    weak_to: &'static [&'static str],
    resists: &'static [&'static str],
    immune_to: &'static [&'static str],
}

#[derive(Clone, Debug)]
pub struct TypeChart {
    defenses: HashMap<&'static str, Defense>,
}

impl TypeChart {
    pub fn new() -> Self {
        let defenses = DEFENSIVE_TABLE
            .iter()
            .map(|&(name, weak_to, resists, immune_to)| {
                (name, Defense { weak_to, resists, immune_to })
            })
            .collect();
        Self { defenses }
    }

    /// Multiplier of an attack of `move_type` against a unit with `target_types`.
    /// Always a power of two (or zero), so exact comparisons are safe.
    pub fn effectiveness(&self, move_type: &str, target_types: &[String]) -> f32 {
        if move_type.is_empty() {
            return 1.0;
        }
        let attack = move_type.to_lowercase();
        let attack = attack.as_str();
        let mut multiplier = 1.0;
        for target_type in target_types {
            let Some(defense) = self.defenses.get(target_type.to_lowercase().as_str()) else {
                continue;
            };
            if defense.immune_to.contains(&attack) {
                return 0.0;
            }
            if defense.weak_to.contains(&attack) {
                multiplier *= 2.0;
            }
            if defense.resists.contains(&attack) {
                multiplier *= 0.5;
            }
        }
        multiplier
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::new()
    }
}
