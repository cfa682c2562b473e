//! Damage-reducing screens (Reflect, Light Screen, Aurora Veil).

use crate::core::abilities::{has_capability, Capability};
use crate::core::tags::{ArenaContext, ArenaTagKind};
use crate::data::moves::MoveCategory;

/// Fixed-point two thirds used for screens in double battles. Kept as the
/// literal ratio so damage rolls stay bit-for-bit reproducible.
pub const DOUBLES_SCREEN_MULTIPLIER: f64 = 2732.0 / 4096.0;
pub const SINGLES_SCREEN_MULTIPLIER: f64 = 0.5;

pub fn weakened_categories(kind: ArenaTagKind) -> Option<&'static [MoveCategory]> {
    match kind {
        ArenaTagKind::Reflect => Some(&[MoveCategory::Physical]),
        ArenaTagKind::LightScreen => Some(&[MoveCategory::Special]),
        ArenaTagKind::AuroraVeil => Some(&[MoveCategory::Physical, MoveCategory::Special]),
        _ => None,
    }
}

/// Sets the damage multiplier when `category` is weakened by the screen.
/// An attacker able to bypass screens is checked first.
pub fn weaken(
    categories: &[MoveCategory],
    ctx: &ArenaContext<'_>,
    attacker_id: &str,
    category: MoveCategory,
    multiplier: &mut f64,
) -> bool {
    let bypassed = ctx
        .state
        .creature(attacker_id)
        .is_some_and(|attacker| has_capability(attacker, Capability::BypassScreens));
    if bypassed {
        return false;
    }
    if !categories.contains(&category) {
        return false;
    }
    *multiplier = if ctx.state.is_double() {
        DOUBLES_SCREEN_MULTIPLIER
    } else {
        SINGLES_SCREEN_MULTIPLIER
    };
    true
}
