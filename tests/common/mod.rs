#![allow(dead_code)]

use arena_engine::core::state::{create_battle_state, ArenaTagSide, BattleFormat, BattleState, CreatureState, PlayerState};
use arena_engine::core::tags::ArenaContext;
use arena_engine::data::moves::MoveDatabase;
use arena_engine::data::type_chart::TypeChart;
use arena_engine::{CreateArenaTagOptions, EventQueue};

pub fn make_creature(id: &str, name: &str, types: &[&str]) -> CreatureState {
    CreatureState {
        id: id.to_string(),
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        ability: None,
        passive_ability: None,
        ability_suppressed: false,
        hp: 100,
        max_hp: 100,
        status: None,
        tags: Vec::new(),
    }
}

pub fn with_ability(mut creature: CreatureState, ability: &str) -> CreatureState {
    creature.ability = Some(ability.to_string());
    creature
}

pub fn with_hp(mut creature: CreatureState, hp: i32, max_hp: i32) -> CreatureState {
    creature.hp = hp;
    creature.max_hp = max_hp;
    creature
}

pub fn make_state(format: BattleFormat, player_team: Vec<CreatureState>, enemy_team: Vec<CreatureState>) -> BattleState {
    let p1 = PlayerState {
        id: "p1".to_string(),
        name: "P1".to_string(),
        side: ArenaTagSide::Player,
        team: player_team,
        active: Vec::new(),
    };
    let p2 = PlayerState {
        id: "p2".to_string(),
        name: "P2".to_string(),
        side: ArenaTagSide::Enemy,
        team: enemy_team,
        active: Vec::new(),
    };
    create_battle_state(vec![p1, p2], format)
}

/// Singles: `p1a` (Alpha) + benched `p1b` against `e1` (Beta) + benched `e2`.
pub fn default_state() -> BattleState {
    make_state(
        BattleFormat::Single,
        vec![make_creature("p1a", "Alpha", &["normal"]), make_creature("p1b", "Bravo", &["normal"])],
        vec![make_creature("e1", "Beta", &["normal"]), make_creature("e2", "Gamma", &["normal"])],
    )
}

pub struct Harness {
    pub state: BattleState,
    pub moves: MoveDatabase,
    pub chart: TypeChart,
    pub queue: EventQueue,
}

impl Harness {
    pub fn new(state: BattleState) -> Self {
        Self {
            state,
            moves: MoveDatabase::default(),
            chart: TypeChart::new(),
            queue: EventQueue::new(),
        }
    }

    pub fn ctx(&mut self) -> ArenaContext<'_> {
        ArenaContext::new(&mut self.state, &self.moves, &self.chart, &mut self.queue)
    }

    pub fn creature(&self, id: &str) -> &CreatureState {
        self.state.creature(id).expect("creature exists")
    }

    pub fn message_keys(&self) -> Vec<String> {
        self.queue.message_keys().into_iter().map(str::to_string).collect()
    }

    pub fn clear_events(&mut self) {
        self.queue.drain_events();
    }
}

pub fn options(source_id: &str, source_move: &str, side: ArenaTagSide, turn_count: i32) -> CreateArenaTagOptions {
    CreateArenaTagOptions {
        turn_count,
        source_move: Some(source_move.to_string()),
        source_id: Some(source_id.to_string()),
        target_slot: None,
        side,
    }
}
