//! Layered entry hazards: Spikes, Toxic Spikes, Stealth Rock, Sticky Web.
//!
//! A hazard triggers when a unit arrives on the side that holds it. Repeated
//! use stacks layers up to the hazard's ceiling.

use crate::core::abilities::{has_capability, Capability};
use crate::core::events::{params_with_move_source, ResolutionStep};
use crate::core::state::{ArenaTagSide, CreatureState};
use crate::core::tags::{ArenaContext, ArenaEffect, ArenaTag, ArenaTagKind};
use crate::core::utils::{lerp, to_damage_value};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrapLayers {
    pub layers: u8,
    pub max_layers: u8,
}

impl TrapLayers {
    pub fn new(max_layers: u8) -> Self {
        Self { layers: 1, max_layers }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToxicSpikesState {
    #[serde(flatten)]
    pub trap: TrapLayers,
    /// Set when a Poison-type unit absorbed the spikes.
    pub neutralized: bool,
}

pub fn max_layers(kind: ArenaTagKind) -> u8 {
    match kind {
        ArenaTagKind::Spikes => 3,
        ArenaTagKind::ToxicSpikes => 2,
        _ => 1,
    }
}

fn affects_airborne(kind: ArenaTagKind) -> bool {
    kind == ArenaTagKind::StealthRock
}

/// 1/8, 1/6, 1/4 of max HP for one to three layers.
pub fn spikes_damage_ratio(layers: u8) -> f64 {
    1.0 / (10.0 - 2.0 * layers as f64)
}

/// Fraction of max HP Stealth Rock takes for a given Rock effectiveness.
pub fn stealth_rock_damage_ratio(effectiveness: f32) -> f64 {
    match (effectiveness * 4.0) as i32 {
        1 => 1.0 / 32.0,
        2 => 1.0 / 16.0,
        4 => 1.0 / 8.0,
        8 => 1.0 / 4.0,
        16 => 1.0 / 2.0,
        _ => 0.0,
    }
}

fn rock_effectiveness(ctx: &ArenaContext<'_>, unit: &CreatureState) -> f32 {
    ctx.type_chart.effectiveness("rock", &unit.types)
}

pub fn on_add(tag: &ArenaTag, ctx: &mut ArenaContext<'_>, quiet: bool) {
    if quiet || tag.source(ctx).is_none() {
        return;
    }
    let key = tag.kind().message_key("OnAdd", ArenaTagSide::Both);
    let move_name = tag.move_name(ctx);
    let mut params = params_with_move_source(move_name.as_deref(), None);
    params.insert("side".to_string(), serde_json::to_value(tag.side).unwrap_or(Value::Null));
    ctx.queue.message(&key, params);
}

pub fn on_overlap(tag: &mut ArenaTag, ctx: &mut ArenaContext<'_>) {
    let grew = match tag.effect.trap_mut() {
        Some(trap) if trap.layers < trap.max_layers => {
            trap.layers += 1;
            true
        }
        _ => false,
    };
    if grew {
        tag.on_add(ctx, false);
    }
}

pub fn apply_trap(tag: &mut ArenaTag, ctx: &mut ArenaContext<'_>, simulated: bool, unit_id: &str) -> bool {
    let kind = tag.kind();
    let Some(unit) = ctx.state.creature(unit_id) else {
        return false;
    };
    if tag.source_id.as_deref() == Some(unit_id)
        || (tag.side == ArenaTagSide::Player) != ctx.state.is_player(unit_id)
    {
        return false;
    }
    if !unit.is_grounded() && !affects_airborne(kind) {
        return false;
    }
    let layers = tag.layers().unwrap_or(1);
    match kind {
        ArenaTagKind::Spikes => {
            let ratio = spikes_damage_ratio(layers);
            deal_indirect_damage(ctx, simulated, unit_id, ratio, "arenaTag:spikesActivateTrap")
        }
        ArenaTagKind::StealthRock => {
            let ratio = stealth_rock_damage_ratio(rock_effectiveness(ctx, unit));
            deal_indirect_damage(ctx, simulated, unit_id, ratio, "arenaTag:stealthRockActivateTrap")
        }
        ArenaTagKind::ToxicSpikes => activate_toxic_spikes(tag, ctx, simulated, unit_id, layers),
        ArenaTagKind::StickyWeb => activate_sticky_web(ctx, simulated, unit_id),
        _ => false,
    }
}

fn deal_indirect_damage(
    ctx: &mut ArenaContext<'_>,
    simulated: bool,
    unit_id: &str,
    ratio: f64,
    message_key: &str,
) -> bool {
    let Some(unit) = ctx.state.creature(unit_id) else {
        return false;
    };
    if has_capability(unit, Capability::BlockIndirectDamage) || ratio <= 0.0 {
        return false;
    }
    if simulated {
        return true;
    }
    let damage = to_damage_value(unit.max_hp as f64 * ratio);
    let name = unit.name.clone();
    ctx.queue.message(message_key, params_with_move_source(None, Some(&name)));
    if let Some(unit) = ctx.state.creature_mut(unit_id) {
        let dealt = unit.apply_damage(damage);
        tracing::debug!(unit = unit_id, dealt, "hazard damage");
    }
    true
}

fn activate_toxic_spikes(
    tag: &mut ArenaTag,
    ctx: &mut ArenaContext<'_>,
    simulated: bool,
    unit_id: &str,
    layers: u8,
) -> bool {
    let Some(unit) = ctx.state.creature(unit_id) else {
        return false;
    };
    let status = if layers > 1 { "toxic" } else { "poison" };
    if simulated {
        return unit.is_of_type("poison") || unit.can_set_status(status);
    }
    if unit.is_of_type("poison") {
        let name = unit.name.clone();
        if let ArenaEffect::ToxicSpikes(state) = &mut tag.effect {
            state.neutralized = true;
        }
        ctx.request_removal(ArenaTagKind::ToxicSpikes, tag.side);
        let move_name = tag.move_name(ctx);
        ctx.queue.message(
            "arenaTag:toxicSpikesActivateTrapPoison",
            params_with_move_source(move_name.as_deref(), Some(&name)),
        );
        return true;
    }
    ctx.state
        .creature_mut(unit_id)
        .is_some_and(|unit| unit.try_set_status(status))
}

fn activate_sticky_web(ctx: &mut ArenaContext<'_>, simulated: bool, unit_id: &str) -> bool {
    let Some(unit) = ctx.state.creature(unit_id) else {
        return false;
    };
    let cancelled = has_capability(unit, Capability::ProtectStat);
    if simulated {
        return !cancelled;
    }
    if cancelled {
        return false;
    }
    let name = unit.name.clone();
    ctx.queue
        .message("arenaTag:stickyWebActivateTrap", params_with_move_source(None, Some(&name)));
    ctx.queue.insert_next(ResolutionStep::StatStageChange {
        target_id: unit_id.to_string(),
        self_inflicted: false,
        stages: HashMap::from([("spe".to_string(), -1)]),
    });
    true
}

/// How threatening the hazard is to `unit` switching in. Read-only.
pub fn matchup_score_multiplier(tag: &ArenaTag, ctx: &ArenaContext<'_>, unit: &CreatureState) -> Option<f64> {
    let trap = tag.effect.trap()?;
    let base = if unit.is_grounded() {
        1.0
    } else {
        let ceiling = 1.0 / 2f64.powi(trap.layers as i32);
        lerp(0.0, ceiling, unit.hp_ratio().min(0.5) * 2.0)
    };
    let score = match tag.kind() {
        ArenaTagKind::ToxicSpikes => {
            // Poison types absorb the spikes; checked first since they also
            // fail the poisonable test below.
            if unit.is_of_type("poison") {
                1.25
            } else if unit.is_grounded() || !unit.can_set_status("poison") {
                1.0
            } else {
                base
            }
        }
        ArenaTagKind::StealthRock => {
            let ratio = stealth_rock_damage_ratio(rock_effectiveness(ctx, unit));
            lerp(base, 1.0, 1.0 - ratio.powf(ratio))
        }
        _ => base,
    };
    Some(score)
}
