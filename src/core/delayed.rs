//! Effects that resolve on a later turn: Future Sight, Doom Desire and Wish.

use crate::core::events::{params_with_move_source, ResolutionStep};
use crate::core::tags::{ArenaContext, ArenaEffect, ArenaTag, ArenaTagKind};
use crate::core::utils::to_damage_value;
use serde::{Deserialize, Serialize};

/// Countdown for delayed attacks, counting the turn the move was used.
pub const DELAYED_ATTACK_TURNS: i32 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayedAttack {
    /// Field slot the strike lands on.
    pub target_index: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishState {
    pub target_index: Option<usize>,
    pub heal_hp: i32,
    pub source_name: Option<String>,
}

fn default_move_id(kind: ArenaTagKind) -> &'static str {
    match kind {
        ArenaTagKind::DoomDesire => "doom_desire",
        _ => "future_sight",
    }
}

/// Counts down and, on the final turn, schedules the strike as the next
/// resolution step. The strike is not recorded as a move use.
pub fn lapse_attack(tag: &mut ArenaTag, ctx: &mut ArenaContext<'_>) -> bool {
    let alive = tag.base_lapse();
    if alive {
        return true;
    }
    let target_index = match &tag.effect {
        ArenaEffect::FutureSight(attack) | ArenaEffect::DoomDesire(attack) => {
            attack.target_index
        }
        _ => None,
    };
    let Some(slot) = target_index else {
        tracing::warn!(kind = %tag.kind(), "delayed attack has no target slot; skipping strike");
        return false;
    };
    let move_id = tag
        .source_move
        .clone()
        .unwrap_or_else(|| default_move_id(tag.kind()).to_string());
    ctx.queue.insert_next(ResolutionStep::MoveEffect {
        source_id: tag.source_id.clone(),
        move_id,
        targets: vec![slot],
        record_in_history: false,
    });
    false
}

/// Remembers who made the wish and how much it will heal.
pub fn wish_on_add(tag: &mut ArenaTag, ctx: &mut ArenaContext<'_>) {
    let Some(source_id) = tag.source_id.clone() else {
        tracing::warn!("wish added without a source unit");
        return;
    };
    let Some(source) = ctx.state.creature(&source_id) else {
        tracing::warn!(source = %source_id, "wish source not found");
        return;
    };
    let heal_hp = to_damage_value(source.max_hp as f64 / 2.0);
    let source_name = source.name.clone();
    let slot = ctx.state.slot_of(&source_id);
    if let ArenaEffect::Wish(wish) = &mut tag.effect {
        wish.target_index = slot;
        wish.heal_hp = heal_hp;
        wish.source_name = Some(source_name);
    }
}

/// Heals whoever now stands in the wisher's slot.
pub fn wish_on_remove(tag: &ArenaTag, ctx: &mut ArenaContext<'_>) {
    let ArenaEffect::Wish(wish) = &tag.effect else {
        return;
    };
    let Some(slot) = wish.target_index else {
        return;
    };
    if !ctx.state.creature_at_slot(slot).is_some_and(|unit| !unit.is_fainted()) {
        tracing::debug!(slot, "wish slot empty or fainted; no heal");
        return;
    }
    ctx.queue.message(
        "arenaTag:wishTagOnAdd",
        params_with_move_source(None, wish.source_name.as_deref()),
    );
    ctx.queue.insert_next(ResolutionStep::Heal {
        slot,
        amount: wish.heal_hp,
    });
}
