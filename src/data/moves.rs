use crate::core::error::ArenaError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    User,
    #[default]
    NearOther,
    NearEnemy,
    RandomNearEnemy,
    Ally,
    AllNearEnemies,
    AllNearOthers,
    AllOthers,
    AllEnemies,
    UserSide,
    EnemySide,
    BothSides,
    All,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveData {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub move_type: Option<String>,
    pub category: Option<MoveCategory>,
    pub power: Option<i32>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub target: MoveTarget,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MoveData {
    /// Moves without a category are treated as status moves.
    pub fn category(&self) -> MoveCategory {
        self.category.unwrap_or(MoveCategory::Status)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Clone, Debug)]
pub struct MoveDatabase {
    moves: HashMap<String, MoveData>,
}

fn entry(
    id: &str,
    name: &str,
    move_type: &str,
    category: MoveCategory,
    priority: i32,
    target: MoveTarget,
) -> MoveData {
    MoveData {
        id: id.to_string(),
        name: Some(name.to_string()),
        move_type: Some(move_type.to_string()),
        category: Some(category),
        power: None,
        priority,
        target,
        tags: Vec::new(),
    }
}

impl MoveDatabase {
    pub fn new() -> Self {
        Self {
            moves: HashMap::new(),
        }
    }

    pub fn minimal() -> Self {
        use MoveCategory::*;
        let mut db = Self::new();
        db.insert(entry("tackle", "Tackle", "normal", Physical, 0, MoveTarget::NearOther));
        db.insert(entry("ember", "Ember", "fire", Special, 0, MoveTarget::NearOther));
        db.insert(entry("quick_attack", "Quick Attack", "normal", Physical, 1, MoveTarget::NearOther));
        db.insert(entry("earthquake", "Earthquake", "ground", Physical, 0, MoveTarget::AllNearOthers));
        db.insert(entry("growl", "Growl", "normal", Status, 0, MoveTarget::AllNearEnemies));
        db.insert(entry("spikes", "Spikes", "ground", Status, 0, MoveTarget::EnemySide));
        db.insert(entry("future_sight", "Future Sight", "psychic", Special, 0, MoveTarget::NearOther));
        db
    }

    pub fn load_default() -> Result<Self, ArenaError> {
        const DEFAULT_MOVES_YAML: &str = include_str!("../../data/moves.yaml");
        Self::load_from_yaml_str(DEFAULT_MOVES_YAML)
    }

    pub fn insert(&mut self, move_data: MoveData) {
        self.moves.insert(move_data.id.clone(), move_data);
    }

    pub fn get(&self, move_id: &str) -> Option<&MoveData> {
        self.moves.get(move_id)
    }

    /// Accepts either a list of moves or a map keyed by move id.
    pub fn load_from_yaml_str(yaml: &str) -> Result<Self, ArenaError> {
        let moves: Vec<MoveData> = match serde_yaml::from_str::<HashMap<String, MoveData>>(yaml) {
            Ok(map) => map.into_values().collect(),
            Err(_) => serde_yaml::from_str(yaml)?,
        };
        let mut db = Self::new();
        for move_data in moves {
            db.insert(move_data);
        }
        Ok(db)
    }

    pub fn load_from_yaml_file(path: &Path) -> Result<Self, ArenaError> {
        let content = fs::read_to_string(path).map_err(|source| ArenaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_yaml_str(&content)
    }
}

impl Default for MoveDatabase {
    fn default() -> Self {
        Self::load_default().unwrap_or_else(|_| Self::minimal())
    }
}
