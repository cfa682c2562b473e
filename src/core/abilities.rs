use crate::core::events::{EventQueue, ResolutionStep};
use crate::core::state::CreatureState;
use crate::core::utils::is_status_move;
use crate::data::moves::MoveData;

/// Ability-granted exceptions the arena tags consult.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Ignores screens, Mist and Safeguard on the opposing side.
    BypassScreens,
    /// Immune to indirect damage such as entry hazards.
    BlockIndirectDamage,
    /// Prevents stat stages from being lowered by others.
    ProtectStat,
    Levitate,
    WindPower,
    WindRider,
    /// Source of an ability-suppression field; keeps its own abilities.
    SuppressionSource,
}

fn ability_has(ability: &str, capability: Capability) -> bool {
    matches!(
        (ability, capability),
        ("infiltrator", Capability::BypassScreens)
            | ("magic_guard", Capability::BlockIndirectDamage)
            | ("clear_body", Capability::ProtectStat)
            | ("white_smoke", Capability::ProtectStat)
            | ("full_metal_body", Capability::ProtectStat)
            | ("levitate", Capability::Levitate)
            | ("wind_power", Capability::WindPower)
            | ("wind_rider", Capability::WindRider)
            | ("neutralizing_gas", Capability::SuppressionSource)
    )
}

pub fn has_capability(creature: &CreatureState, capability: Capability) -> bool {
    if creature.ability_suppressed && capability != Capability::SuppressionSource {
        return false;
    }
    [creature.ability.as_deref(), creature.passive_ability.as_deref()]
        .into_iter()
        .flatten()
        .any(|ability| ability_has(ability, capability))
}

pub fn is_status_immune(creature: &CreatureState, status_id: &str) -> bool {
    if creature.ability_suppressed {
        return false;
    }
    match creature.ability.as_deref() {
        Some("immunity") => matches!(status_id, "poison" | "toxic"),
        Some("insomnia") | Some("vital_spirit") => status_id == "sleep",
        Some("limber") => status_id == "paralysis",
        Some("water_veil") => status_id == "burn",
        Some("magma_armor") => status_id == "freeze",
        Some("comatose") | Some("purifying_salt") => true,
        _ => false,
    }
}

/// Priority bonus the attacker's ability grants to `move_data`.
pub fn priority_modifier(creature: &CreatureState, move_data: &MoveData) -> i32 {
    if creature.ability_suppressed {
        return 0;
    }
    match creature.ability.as_deref() {
        Some("prankster") if is_status_move(move_data) => 1,
        Some("gale_wings")
            if move_data.move_type.as_deref() == Some("flying") && creature.hp >= creature.max_hp =>
        {
            1
        }
        Some("triage") if move_data.tags.iter().any(|t| t == "heal") => 3,
        _ => 0,
    }
}

fn triggers_on_gain(ability: &str) -> bool {
    matches!(
        ability,
        "intimidate"
            | "drizzle"
            | "drought"
            | "sand_stream"
            | "snow_warning"
            | "electric_surge"
            | "grassy_surge"
            | "misty_surge"
            | "psychic_surge"
            | "download"
            | "pressure"
            | "unnerve"
            | "frisk"
    )
}

/// Switches off the unit's abilities while a suppression field is active.
pub fn apply_on_lose_abilities(creature: &mut CreatureState, queue: &mut EventQueue) {
    if creature.ability_suppressed {
        return;
    }
    creature.ability_suppressed = true;
    if let Some(ability) = creature.ability.clone() {
        tracing::debug!(unit = %creature.id, %ability, "ability suppressed");
        queue.ability_display(&creature.id, &ability);
    }
}

/// Re-enables abilities and schedules their on-gain triggers.
///
/// `passive` selects the passive slot instead of the main ability.
pub fn apply_on_gain_abilities(creature: &mut CreatureState, queue: &mut EventQueue, passive: bool) {
    creature.ability_suppressed = false;
    let ability = if passive {
        creature.passive_ability.as_deref()
    } else {
        creature.ability.as_deref()
    };
    let Some(ability) = ability else {
        return;
    };
    if triggers_on_gain(ability) {
        queue.append(ResolutionStep::AbilityTrigger {
            unit_id: creature.id.clone(),
            ability: ability.to_string(),
        });
    }
}
