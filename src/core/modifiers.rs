//! Field-wide and side-wide modifiers: Mist, Safeguard, Lucky Chant, the
//! sports, Ion Deluge, Trick Room, Gravity, Tailwind, the pledges and
//! Fairy Lock.

use crate::core::abilities::{has_capability, Capability};
use crate::core::events::{params_with_move_source, CommonAnim, ResolutionStep};
use crate::core::state::{ArenaTagSide, GRAVITY_GROUNDED_TAG};
use crate::core::tags::{ArenaContext, ArenaTag, ArenaTagKind};
use crate::core::utils::to_damage_value;
use std::collections::HashMap;

const SPORT_POWER_MULTIPLIER: f64 = 0.33;
const SWAMP_SPEED_MULTIPLIER: f64 = 0.25;
const UNGROUNDING_TAGS: [&str; 3] = ["magnet_rise", "telekinesis", "floating"];

/// Shared by Mist and Safeguard: cancels the effect unless the attacker can
/// slip past side protections.
pub fn cancel_unless_bypassed(
    ctx: &mut ArenaContext<'_>,
    simulated: bool,
    attacker_id: Option<&str>,
    cancelled: &mut bool,
    message_key: &str,
) -> bool {
    if let Some(attacker) = attacker_id.and_then(|id| ctx.state.creature(id)) {
        if has_capability(attacker, Capability::BypassScreens) {
            if !simulated {
                if let Some(ability) = attacker.ability.clone() {
                    let unit_id = attacker.id.clone();
                    ctx.queue.ability_display(&unit_id, &ability);
                }
            }
            return false;
        }
    }
    *cancelled = true;
    if !simulated {
        ctx.queue.message(message_key, serde_json::Map::new());
    }
    true
}

pub fn weaken_move_type(kind: ArenaTagKind, move_type: &str, multiplier: &mut f64) -> bool {
    let weakened = match kind {
        ArenaTagKind::MudSport => "electric",
        ArenaTagKind::WaterSport => "fire",
        _ => return false,
    };
    if !move_type.eq_ignore_ascii_case(weakened) {
        return false;
    }
    *multiplier *= SPORT_POWER_MULTIPLIER;
    true
}

pub fn electrify_normal(move_type: &mut String) -> bool {
    if !move_type.eq_ignore_ascii_case("normal") {
        return false;
    }
    *move_type = "electric".to_string();
    true
}

pub fn modify_speed(kind: ArenaTagKind, multiplier: &mut f64) -> bool {
    match kind {
        ArenaTagKind::Tailwind => *multiplier *= 2.0,
        ArenaTagKind::GrassWaterPledge => *multiplier *= SWAMP_SPEED_MULTIPLIER,
        _ => return false,
    }
    true
}

/// Ghost types can always switch out.
pub fn lock_switch(ctx: &ArenaContext<'_>, unit_id: &str, locked: &mut bool) -> bool {
    let Some(unit) = ctx.state.creature(unit_id) else {
        return false;
    };
    if unit.is_of_type("ghost") {
        return false;
    }
    *locked = true;
    true
}

pub fn mist_on_add(tag: &ArenaTag, ctx: &mut ArenaContext<'_>, quiet: bool) {
    if quiet {
        return;
    }
    match tag.source(ctx).map(|source| source.name.clone()) {
        Some(name) => ctx
            .queue
            .message("arenaTag:mistOnAdd", params_with_move_source(None, Some(&name))),
        None => tracing::warn!(source = ?tag.source_id, "mist source not found"),
    }
}

pub fn no_crit_on_remove(tag: &ArenaTag, ctx: &mut ArenaContext<'_>, quiet: bool) {
    if quiet {
        return;
    }
    let Some(name) = tag.source(ctx).map(|source| source.name.clone()) else {
        return;
    };
    let move_name = tag.move_name(ctx);
    ctx.queue.message(
        "arenaTag:noCritOnRemove",
        params_with_move_source(move_name.as_deref(), Some(&name)),
    );
}

pub fn trick_room_on_add(tag: &ArenaTag, ctx: &mut ArenaContext<'_>) {
    if let Some(name) = tag.source(ctx).map(|source| source.name.clone()) {
        ctx.queue
            .message("arenaTag:trickRoomOnAdd", params_with_move_source(None, Some(&name)));
    }
}

/// Pulls every active unit to the ground and interrupts any mid-flight move.
pub fn gravity_on_add(tag: &ArenaTag, ctx: &mut ArenaContext<'_>) {
    tag.side_message(ctx, "OnAdd");
    for unit_id in ctx.state.field_ids(ArenaTagSide::Both) {
        let Some(unit) = ctx.state.creature_mut(&unit_id) else {
            continue;
        };
        for airborne in UNGROUNDING_TAGS {
            unit.remove_tag(airborne);
        }
        if unit.has_tag("flying") {
            unit.add_tag("interrupted");
        }
        unit.add_tag(GRAVITY_GROUNDED_TAG);
    }
}

/// Units switching in while Gravity holds are grounded as well.
pub fn gravity_on_arrival(ctx: &mut ArenaContext<'_>, simulated: bool, unit_id: &str) -> bool {
    let Some(unit) = ctx.state.creature_mut(unit_id) else {
        return false;
    };
    if simulated {
        return !unit.has_tag(GRAVITY_GROUNDED_TAG);
    }
    unit.add_tag(GRAVITY_GROUNDED_TAG)
}

pub fn gravity_on_remove(ctx: &mut ArenaContext<'_>) {
    for unit_id in ctx.state.all_ids() {
        if let Some(unit) = ctx.state.creature_mut(&unit_id) {
            unit.remove_tag(GRAVITY_GROUNDED_TAG);
        }
    }
}

/// Wind Power charges up and Wind Rider gets an Attack boost. These only
/// fire when the wind starts, not on later switch-ins.
pub fn tailwind_on_add(tag: &ArenaTag, ctx: &mut ArenaContext<'_>, quiet: bool) {
    if !quiet {
        tag.side_message(ctx, "OnAdd");
    }
    let move_name = tag.move_name(ctx);
    for unit_id in ctx.state.field_ids(tag.side) {
        let Some(unit) = ctx.state.creature_mut(&unit_id) else {
            continue;
        };
        if has_capability(unit, Capability::WindPower) {
            unit.add_tag("charged");
            let name = unit.name.clone();
            ctx.queue.message(
                "abilityTriggers:windPowerCharged",
                params_with_move_source(move_name.as_deref(), Some(&name)),
            );
        }
        let Some(unit) = ctx.state.creature(&unit_id) else {
            continue;
        };
        if has_capability(unit, Capability::WindRider) {
            if let Some(ability) = unit.ability.clone() {
                ctx.queue.ability_display(&unit_id, &ability);
            }
            ctx.queue.insert_next(ResolutionStep::StatStageChange {
                target_id: unit_id.clone(),
                self_inflicted: true,
                stages: HashMap::from([("atk".to_string(), 1)]),
            });
        }
    }
}

/// Sea of fire: burns every non-Fire unit on the side for 1/8 max HP, then
/// counts down like any other tag.
pub fn sea_of_fire_lapse(tag: &mut ArenaTag, ctx: &mut ArenaContext<'_>) -> bool {
    for unit_id in ctx.state.field_ids(tag.side) {
        let Some(unit) = ctx.state.creature_mut(&unit_id) else {
            continue;
        };
        if unit.is_of_type("fire") || has_capability(unit, Capability::BlockIndirectDamage) {
            continue;
        }
        let damage = to_damage_value(unit.max_hp as f64 / 8.0);
        unit.apply_damage(damage);
        let name = unit.name.clone();
        ctx.queue
            .message("arenaTag:fireGrassPledgeLapse", params_with_move_source(None, Some(&name)));
        ctx.queue.animate(CommonAnim::MagmaStorm, &unit_id);
    }
    tag.base_lapse()
}
