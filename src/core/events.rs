use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, VecDeque};

/// Animations the arena tags ask the presentation layer to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommonAnim {
    Protect,
    MagmaStorm,
}

/// Visible notifications. Messages carry a localization key plus params.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleEvent {
    Message {
        key: String,
        params: Map<String, Value>,
    },
    Animation {
        anim: CommonAnim,
        target_id: String,
    },
    AbilityDisplay {
        unit_id: String,
        ability: String,
    },
}

/// Deferred work handed back to the turn scheduler. This engine only
/// enqueues steps, it never executes them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResolutionStep {
    Heal {
        slot: usize,
        amount: i32,
    },
    MoveEffect {
        source_id: Option<String>,
        move_id: String,
        targets: Vec<usize>,
        /// False for follow-up strikes that must not count as a move use.
        record_in_history: bool,
    },
    StatStageChange {
        target_id: String,
        self_inflicted: bool,
        stages: HashMap<String, i32>,
    },
    AbilityTrigger {
        unit_id: String,
        ability: String,
    },
}

#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<BattleEvent>,
    steps: VecDeque<ResolutionStep>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&mut self, key: &str, params: Map<String, Value>) {
        self.events.push(BattleEvent::Message {
            key: key.to_string(),
            params,
        });
    }

    pub fn animate(&mut self, anim: CommonAnim, target_id: &str) {
        self.events.push(BattleEvent::Animation {
            anim,
            target_id: target_id.to_string(),
        });
    }

    pub fn ability_display(&mut self, unit_id: &str, ability: &str) {
        self.events.push(BattleEvent::AbilityDisplay {
            unit_id: unit_id.to_string(),
            ability: ability.to_string(),
        });
    }

    /// Schedules `step` to run before anything already queued (LIFO).
    pub fn insert_next(&mut self, step: ResolutionStep) {
        tracing::debug!(?step, "resolution step inserted next");
        self.steps.push_front(step);
    }

    /// Schedules `step` after everything already queued (FIFO).
    pub fn append(&mut self, step: ResolutionStep) {
        tracing::debug!(?step, "resolution step appended");
        self.steps.push_back(step);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn steps(&self) -> impl Iterator<Item = &ResolutionStep> {
        self.steps.iter()
    }

    pub fn pop_step(&mut self) -> Option<ResolutionStep> {
        self.steps.pop_front()
    }

    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn message_keys(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::Message { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

pub fn params_with_move_source(move_name: Option<&str>, unit_name: Option<&str>) -> Map<String, Value> {
    let mut params = Map::new();
    if let Some(move_name) = move_name {
        params.insert("moveName".to_string(), Value::String(move_name.to_string()));
    }
    if let Some(unit_name) = unit_name {
        params.insert("pokemonNameWithAffix".to_string(), Value::String(unit_name.to_string()));
    }
    params
}
