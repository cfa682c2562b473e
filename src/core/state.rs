use crate::core::abilities::{has_capability, is_status_immune, Capability};
use serde::{Deserialize, Serialize};

/// Linked tag placed on every unit while Gravity is active.
pub const GRAVITY_GROUNDED_TAG: &str = "gravity_grounded";

const AIRBORNE_TAGS: [&str; 3] = ["magnet_rise", "telekinesis", "floating"];
const FORCED_GROUNDED_TAGS: [&str; 3] = [GRAVITY_GROUNDED_TAG, "ingrain", "smack_down"];

/// Which half of the field an arena tag governs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArenaTagSide {
    #[default]
    Both,
    Player,
    Enemy,
}

impl ArenaTagSide {
    /// Whether a tag on `self` is relevant to a query scoped to `other`.
    pub fn covers(self, other: ArenaTagSide) -> bool {
        self == ArenaTagSide::Both || other == ArenaTagSide::Both || self == other
    }

    /// Suffix appended to side-scoped message keys.
    pub fn message_suffix(self) -> &'static str {
        match self {
            ArenaTagSide::Player => "Player",
            ArenaTagSide::Enemy => "Enemy",
            ArenaTagSide::Both => "",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleFormat {
    #[default]
    Single,
    Double,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureState {
    pub id: String,
    pub name: String,
    pub types: Vec<String>,
    pub ability: Option<String>,
    #[serde(default)]
    pub passive_ability: Option<String>,
    #[serde(default)]
    pub ability_suppressed: bool,
    pub hp: i32,
    pub max_hp: i32,
    #[serde(default)]
    pub status: Option<String>,
    /// Per-unit linked tags (flight, levitation, interruption, ...).
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreatureState {
    pub fn is_of_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(type_name))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Adds a linked tag; returns false if it was already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn is_grounded(&self) -> bool {
        if FORCED_GROUNDED_TAGS.iter().any(|t| self.has_tag(t)) {
            return true;
        }
        if self.is_of_type("flying") || has_capability(self, Capability::Levitate) {
            return false;
        }
        !AIRBORNE_TAGS.iter().any(|t| self.has_tag(t))
    }

    pub fn is_fainted(&self) -> bool {
        self.hp <= 0
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }

    /// Removes up to `amount` HP and returns the HP actually lost.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        let dealt = amount.clamp(0, self.hp.max(0));
        self.hp -= dealt;
        dealt
    }

    pub fn can_set_status(&self, status_id: &str) -> bool {
        if self.status.is_some() || self.is_fainted() {
            return false;
        }
        let type_immune = match status_id {
            "poison" | "toxic" => self.is_of_type("poison") || self.is_of_type("steel"),
            "burn" => self.is_of_type("fire"),
            "paralysis" => self.is_of_type("electric"),
            "freeze" => self.is_of_type("ice"),
            _ => false,
        };
        !type_immune && !is_status_immune(self, status_id)
    }

    pub fn try_set_status(&mut self, status_id: &str) -> bool {
        if !self.can_set_status(status_id) {
            return false;
        }
        self.status = Some(status_id.to_string());
        true
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: String,
    pub name: String,
    pub side: ArenaTagSide,
    pub team: Vec<CreatureState>,
    /// Team indices currently on the field, in field-position order.
    pub active: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub players: Vec<PlayerState>,
    #[serde(default)]
    pub format: BattleFormat,
    #[serde(default)]
    pub turn: u32,
}

/// Field slots are numbered per side: player positions start at 0, enemy at 2.
fn slot_base(side: ArenaTagSide) -> usize {
    match side {
        ArenaTagSide::Enemy => 2,
        _ => 0,
    }
}

impl BattleState {
    pub fn is_double(&self) -> bool {
        self.format == BattleFormat::Double
    }

    pub fn creature(&self, id: &str) -> Option<&CreatureState> {
        self.players.iter().flat_map(|p| p.team.iter()).find(|c| c.id == id)
    }

    pub fn creature_mut(&mut self, id: &str) -> Option<&mut CreatureState> {
        self.players
            .iter_mut()
            .flat_map(|p| p.team.iter_mut())
            .find(|c| c.id == id)
    }

    fn owner(&self, id: &str) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.team.iter().any(|c| c.id == id))
    }

    pub fn side_of(&self, id: &str) -> Option<ArenaTagSide> {
        self.owner(id).map(|p| p.side)
    }

    pub fn is_player(&self, id: &str) -> bool {
        self.side_of(id) == Some(ArenaTagSide::Player)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.slot_of(id).is_some()
    }

    /// Ids of the non-fainted units on the field for the given side.
    pub fn field_ids(&self, side: ArenaTagSide) -> Vec<String> {
        self.players
            .iter()
            .filter(|p| side.covers(p.side))
            .flat_map(|p| p.active.iter().filter_map(|&idx| p.team.get(idx)))
            .filter(|c| !c.is_fainted())
            .map(|c| c.id.clone())
            .collect()
    }

    pub fn slot_of(&self, id: &str) -> Option<usize> {
        let player = self.owner(id)?;
        let position = player
            .active
            .iter()
            .position(|&idx| player.team.get(idx).map(|c| c.id.as_str()) == Some(id))?;
        Some(slot_base(player.side) + position)
    }

    pub fn creature_at_slot(&self, slot: usize) -> Option<&CreatureState> {
        let side = if slot >= 2 { ArenaTagSide::Enemy } else { ArenaTagSide::Player };
        let player = self.players.iter().find(|p| p.side == side)?;
        let idx = *player.active.get(slot - slot_base(side))?;
        player.team.get(idx)
    }

    /// All units of every team, active or benched.
    pub fn all_ids(&self) -> Vec<String> {
        self.players
            .iter()
            .flat_map(|p| p.team.iter().map(|c| c.id.clone()))
            .collect()
    }
}

pub fn create_battle_state(players: Vec<PlayerState>, format: BattleFormat) -> BattleState {
    let field_size = if format == BattleFormat::Double { 2 } else { 1 };
    BattleState {
        players: players
            .into_iter()
            .map(|mut player| {
                if player.active.is_empty() {
                    player.active = (0..player.team.len().min(field_size)).collect();
                }
                player
            })
            .collect(),
        format,
        turn: 0,
    }
}
