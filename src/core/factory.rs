use crate::core::delayed::{DelayedAttack, WishState, DELAYED_ATTACK_TURNS};
use crate::core::hazards::{max_layers, ToxicSpikesState, TrapLayers};
use crate::core::snapshot::ArenaTagSnapshot;
use crate::core::state::ArenaTagSide;
use crate::core::suppression::SuppressionState;
use crate::core::tags::{ArenaEffect, ArenaTag, ArenaTagKind};

#[derive(Clone, Debug)]
pub struct CreateArenaTagOptions {
    pub turn_count: i32,
    pub source_move: Option<String>,
    pub source_id: Option<String>,
    /// Field slot a delayed attack lands on. Required for Future Sight and
    /// Doom Desire; ignored by everything else.
    pub target_slot: Option<usize>,
    pub side: ArenaTagSide,
}

impl Default for CreateArenaTagOptions {
    fn default() -> Self {
        Self {
            turn_count: 0,
            source_move: None,
            source_id: None,
            target_slot: None,
            side: ArenaTagSide::Both,
        }
    }
}

fn trap(kind: ArenaTagKind) -> TrapLayers {
    TrapLayers::new(max_layers(kind))
}

fn effect_for(kind: ArenaTagKind, target_slot: Option<usize>) -> Option<ArenaEffect> {
    let effect = match kind {
        ArenaTagKind::None => return None,
        ArenaTagKind::Mist => ArenaEffect::Mist,
        ArenaTagKind::Safeguard => ArenaEffect::Safeguard,
        ArenaTagKind::NoCrit => ArenaEffect::NoCrit,
        ArenaTagKind::Reflect => ArenaEffect::Reflect,
        ArenaTagKind::LightScreen => ArenaEffect::LightScreen,
        ArenaTagKind::AuroraVeil => ArenaEffect::AuroraVeil,
        ArenaTagKind::QuickGuard => ArenaEffect::QuickGuard,
        ArenaTagKind::WideGuard => ArenaEffect::WideGuard,
        ArenaTagKind::MatBlock => ArenaEffect::MatBlock,
        ArenaTagKind::CraftyShield => ArenaEffect::CraftyShield,
        ArenaTagKind::MudSport => ArenaEffect::MudSport,
        ArenaTagKind::WaterSport => ArenaEffect::WaterSport,
        ArenaTagKind::IonDeluge => ArenaEffect::IonDeluge,
        ArenaTagKind::Spikes => ArenaEffect::Spikes(trap(kind)),
        ArenaTagKind::ToxicSpikes => ArenaEffect::ToxicSpikes(ToxicSpikesState {
            trap: trap(kind),
            neutralized: false,
        }),
        ArenaTagKind::StealthRock => ArenaEffect::StealthRock(trap(kind)),
        ArenaTagKind::StickyWeb => ArenaEffect::StickyWeb(trap(kind)),
        ArenaTagKind::FutureSight => ArenaEffect::FutureSight(DelayedAttack {
            target_index: target_slot,
        }),
        ArenaTagKind::DoomDesire => ArenaEffect::DoomDesire(DelayedAttack {
            target_index: target_slot,
        }),
        ArenaTagKind::Wish => ArenaEffect::Wish(WishState::default()),
        ArenaTagKind::TrickRoom => ArenaEffect::TrickRoom,
        ArenaTagKind::Gravity => ArenaEffect::Gravity,
        ArenaTagKind::HappyHour => ArenaEffect::HappyHour,
        ArenaTagKind::Tailwind => ArenaEffect::Tailwind,
        ArenaTagKind::WaterFirePledge => ArenaEffect::WaterFirePledge,
        ArenaTagKind::FireGrassPledge => ArenaEffect::FireGrassPledge,
        ArenaTagKind::GrassWaterPledge => ArenaEffect::GrassWaterPledge,
        ArenaTagKind::FairyLock => ArenaEffect::FairyLock,
        ArenaTagKind::NeutralizingGas => ArenaEffect::NeutralizingGas(SuppressionState::default()),
    };
    Some(effect)
}

/// Kinds whose duration does not depend on the move that created them.
fn fixed_turn_count(kind: ArenaTagKind) -> Option<i32> {
    match kind {
        ArenaTagKind::QuickGuard
        | ArenaTagKind::WideGuard
        | ArenaTagKind::MatBlock
        | ArenaTagKind::CraftyShield
        | ArenaTagKind::IonDeluge => Some(1),
        ArenaTagKind::FutureSight | ArenaTagKind::DoomDesire => Some(DELAYED_ATTACK_TURNS),
        ArenaTagKind::Spikes
        | ArenaTagKind::ToxicSpikes
        | ArenaTagKind::StealthRock
        | ArenaTagKind::StickyWeb
        | ArenaTagKind::NeutralizingGas => Some(0),
        _ => None,
    }
}

fn is_field_wide(kind: ArenaTagKind) -> bool {
    matches!(
        kind,
        ArenaTagKind::Gravity
            | ArenaTagKind::TrickRoom
            | ArenaTagKind::MudSport
            | ArenaTagKind::WaterSport
            | ArenaTagKind::IonDeluge
            | ArenaTagKind::FairyLock
            | ArenaTagKind::NeutralizingGas
    )
}

/// Builds a fresh tag of `kind`. Returns `None` for [`ArenaTagKind::None`].
///
/// Passing a valid `target_slot` for delayed attacks is the caller's job; the
/// factory does not check it.
pub fn create_arena_tag(kind: ArenaTagKind, options: CreateArenaTagOptions) -> Option<ArenaTag> {
    let CreateArenaTagOptions {
        turn_count,
        source_move,
        source_id,
        target_slot,
        side,
    } = options;
    let effect = effect_for(kind, target_slot)?;
    let turn_count = fixed_turn_count(kind).unwrap_or(turn_count);
    let side = if is_field_wide(kind) { ArenaTagSide::Both } else { side };
    Some(ArenaTag::new(effect, turn_count, source_move, source_id, side))
}

/// Rebuilds a tag from its snapshot. Never fails: an unknown kind loads as an
/// inert tag that keeps the descriptor fields.
pub fn load_arena_tag(snapshot: &ArenaTagSnapshot) -> ArenaTag {
    let kind = ArenaTagKind::parse(&snapshot.tag_type).unwrap_or_else(|err| {
        tracing::warn!(%err, "loading arena tag as inert");
        ArenaTagKind::None
    });
    let options = CreateArenaTagOptions {
        turn_count: snapshot.turn_count,
        source_move: snapshot.source_move.clone(),
        source_id: snapshot.source_id.clone(),
        target_slot: None,
        side: snapshot.side,
    };
    let mut tag = create_arena_tag(kind, options)
        .unwrap_or_else(|| ArenaTag::new(ArenaEffect::None, 0, None, None, ArenaTagSide::Both));
    tag.load_base(snapshot);
    tag.effect.restore_extension(&snapshot.data);
    tag
}
