//! Neutralizing Gas: a field that switches off every other unit's abilities
//! for as long as at least one source remains on the field.

use crate::core::abilities::{apply_on_gain_abilities, apply_on_lose_abilities, has_capability, Capability};
use crate::core::events::params_with_move_source;
use crate::core::state::ArenaTagSide;
use crate::core::tags::{ArenaContext, ArenaEffect, ArenaTag, ArenaTagKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuppressionState {
    pub source_count: u32,
    pub being_removed: bool,
}

impl Default for SuppressionState {
    fn default() -> Self {
        Self {
            source_count: 1,
            being_removed: false,
        }
    }
}

impl SuppressionState {
    /// A source is itself suppressed only when another source is also active.
    pub fn should_apply_to_self(&self) -> bool {
        self.source_count > 1
    }

    pub fn is_being_removed(&self) -> bool {
        self.being_removed
    }
}

fn state_mut(tag: &mut ArenaTag) -> Option<&mut SuppressionState> {
    match &mut tag.effect {
        ArenaEffect::NeutralizingGas(state) => Some(state),
        _ => None,
    }
}

fn announce(ctx: &mut ArenaContext<'_>, source_id: Option<&str>) {
    let Some(name) = source_id.and_then(|id| ctx.unit_name(id)) else {
        tracing::warn!(source = ?source_id, "suppression source not found");
        return;
    };
    ctx.queue.message(
        "arenaTag:neutralizingGasOnAdd",
        params_with_move_source(None, Some(&name)),
    );
}

pub fn on_add(tag: &ArenaTag, ctx: &mut ArenaContext<'_>) {
    let Some(source_id) = tag.source_id.clone() else {
        tracing::warn!("suppression field added without a source unit");
        return;
    };
    if ctx.state.creature(&source_id).is_none() {
        tracing::warn!(source = %source_id, "suppression source not found");
        return;
    }
    announce(ctx, Some(&source_id));
    for unit_id in ctx.state.field_ids(ArenaTagSide::Both) {
        if unit_id == source_id {
            continue;
        }
        if let Some(unit) = ctx.state.creature_mut(&unit_id) {
            apply_on_lose_abilities(unit, ctx.queue);
        }
    }
}

/// Another source arrived while the field is already up.
pub fn on_overlap(tag: &mut ArenaTag, ctx: &mut ArenaContext<'_>, source_id: Option<&str>) {
    if let Some(state) = state_mut(tag) {
        state.source_count += 1;
        tracing::debug!(count = state.source_count, "suppression source added");
    }
    announce(ctx, source_id);
}

/// A source left the field. At zero sources the field asks to be removed; at
/// exactly one, the remaining source gets its other ability slot back.
pub fn on_source_leave(tag: &mut ArenaTag, ctx: &mut ArenaContext<'_>, leaving_id: Option<&str>) {
    let leaving_unit = leaving_id.and_then(|id| ctx.state.creature(id));
    if leaving_unit.is_some_and(|unit| !has_capability(unit, Capability::SuppressionSource)) {
        return;
    }
    let side = tag.side;
    let Some(state) = state_mut(tag) else {
        return;
    };
    state.source_count = state.source_count.saturating_sub(1);
    let remaining = state.source_count;
    tracing::debug!(count = remaining, "suppression source left");
    if remaining == 0 {
        ctx.request_removal(ArenaTagKind::NeutralizingGas, side);
        return;
    }
    if remaining != 1 {
        return;
    }
    let setter = ctx
        .state
        .field_ids(ArenaTagSide::Both)
        .into_iter()
        .filter(|id| Some(id.as_str()) != leaving_id)
        .find(|id| {
            ctx.state
                .creature(id)
                .is_some_and(|unit| has_capability(unit, Capability::SuppressionSource))
        });
    let Some(setter_id) = setter else {
        return;
    };
    if let Some(unit) = ctx.state.creature_mut(&setter_id) {
        let passive = unit.ability.as_deref() == Some("neutralizing_gas");
        apply_on_gain_abilities(unit, ctx.queue, passive);
    }
}

pub fn on_remove(tag: &mut ArenaTag, ctx: &mut ArenaContext<'_>, quiet: bool) {
    if let Some(state) = state_mut(tag) {
        state.being_removed = true;
    }
    if !quiet {
        ctx.queue
            .message("arenaTag:neutralizingGasOnRemove", serde_json::Map::new());
    }
    for unit_id in ctx.state.field_ids(ArenaTagSide::Both) {
        let Some(unit) = ctx.state.creature_mut(&unit_id) else {
            continue;
        };
        if has_capability(unit, Capability::SuppressionSource) {
            continue;
        }
        apply_on_gain_abilities(unit, ctx.queue, false);
        apply_on_gain_abilities(unit, ctx.queue, true);
    }
}
