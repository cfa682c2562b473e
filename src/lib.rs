pub mod core;
pub mod data;

pub use crate::core::{
    config::ArenaConfig,
    error::ArenaError,
    events::{BattleEvent, EventQueue, ResolutionStep},
    factory::{create_arena_tag, load_arena_tag, CreateArenaTagOptions},
    field::ArenaField,
    protection::ProtectionOutcome,
    snapshot::ArenaTagSnapshot,
    state::{create_battle_state, ArenaTagSide, BattleFormat, BattleState, CreatureState, PlayerState},
    tags::{ArenaContext, ArenaEffect, ArenaTag, ArenaTagKind, TagQuery},
};
pub use crate::data::{
    moves::{MoveCategory, MoveData, MoveDatabase, MoveTarget},
    type_chart::TypeChart,
};
