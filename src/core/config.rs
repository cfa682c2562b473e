use crate::core::error::ArenaError;
use crate::core::state::{create_battle_state, BattleFormat, BattleState, PlayerState};
use crate::core::tags::ArenaTagKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Battle-level settings the arena consults, loadable from YAML:
///
/// ```yaml
/// format: double
/// default_turns:
///   REFLECT: 8
///   TAILWIND: 4
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub format: BattleFormat,
    /// Duration used when a tag is added without an explicit one.
    pub default_turns: HashMap<ArenaTagKind, i32>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let default_turns = [
            (ArenaTagKind::Reflect, 5),
            (ArenaTagKind::LightScreen, 5),
            (ArenaTagKind::AuroraVeil, 5),
            (ArenaTagKind::Mist, 5),
            (ArenaTagKind::Safeguard, 5),
            (ArenaTagKind::NoCrit, 5),
            (ArenaTagKind::Tailwind, 4),
            (ArenaTagKind::TrickRoom, 5),
            (ArenaTagKind::Gravity, 5),
            (ArenaTagKind::MudSport, 5),
            (ArenaTagKind::WaterSport, 5),
            (ArenaTagKind::WaterFirePledge, 4),
            (ArenaTagKind::FireGrassPledge, 4),
            (ArenaTagKind::GrassWaterPledge, 4),
            (ArenaTagKind::FairyLock, 2),
            (ArenaTagKind::Wish, 2),
            (ArenaTagKind::IonDeluge, 1),
            (ArenaTagKind::HappyHour, 0),
        ]
        .into_iter()
        .collect();
        Self {
            format: BattleFormat::Single,
            default_turns,
        }
    }
}

impl ArenaConfig {
    /// Missing keys keep their defaults; listed durations replace them.
    pub fn load_from_yaml_str(yaml: &str) -> Result<Self, ArenaError> {
        #[derive(Deserialize)]
        struct Overrides {
            format: Option<BattleFormat>,
            #[serde(default)]
            default_turns: HashMap<ArenaTagKind, i32>,
        }
        let overrides: Overrides = serde_yaml::from_str(yaml)?;
        let mut config = Self::default();
        if let Some(format) = overrides.format {
            config.format = format;
        }
        config.default_turns.extend(overrides.default_turns);
        Ok(config)
    }

    pub fn load_from_yaml_file(path: &Path) -> Result<Self, ArenaError> {
        let text = std::fs::read_to_string(path).map_err(|source| ArenaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_yaml_str(&text)
    }

    /// Builds a battle in the configured format, which in turn picks the
    /// screen multiplier.
    pub fn create_battle_state(&self, players: Vec<PlayerState>) -> BattleState {
        create_battle_state(players, self.format)
    }

    pub fn turns_for(&self, kind: ArenaTagKind) -> i32 {
        self.default_turns.get(&kind).copied().unwrap_or(0)
    }
}
