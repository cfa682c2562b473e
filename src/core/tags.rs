//! Arena tags: effects bound to one side of the field (or the whole field)
//! rather than to an individual unit.
//!
//! Every tag is an [`ArenaTag`]: a shared descriptor (duration, source move,
//! source unit, side) plus an [`ArenaEffect`] case holding only that kind's own
//! state. Lifecycle hooks dispatch on the case; the behavior itself lives in
//! the sibling modules (`screens`, `protection`, `hazards`, `delayed`,
//! `modifiers`, `suppression`).

use crate::core::delayed::{self, DelayedAttack, WishState};
use crate::core::error::ArenaError;
use crate::core::events::{params_with_move_source, EventQueue};
use crate::core::hazards::{self, ToxicSpikesState, TrapLayers};
use crate::core::modifiers;
use crate::core::protection::{self, ProtectionRule};
use crate::core::screens;
use crate::core::snapshot::{overlay_extension, write_extension, ArenaTagSnapshot};
use crate::core::state::{ArenaTagSide, BattleState, CreatureState};
use crate::core::suppression::{self, SuppressionState};
use crate::data::moves::{MoveCategory, MoveDatabase};
use crate::data::type_chart::TypeChart;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ArenaTagKind {
    None,
    Mist,
    Safeguard,
    NoCrit,
    Reflect,
    LightScreen,
    AuroraVeil,
    QuickGuard,
    WideGuard,
    MatBlock,
    CraftyShield,
    MudSport,
    WaterSport,
    IonDeluge,
    Spikes,
    ToxicSpikes,
    StealthRock,
    StickyWeb,
    FutureSight,
    DoomDesire,
    Wish,
    TrickRoom,
    Gravity,
    HappyHour,
    Tailwind,
    WaterFirePledge,
    FireGrassPledge,
    GrassWaterPledge,
    FairyLock,
    NeutralizingGas,
}

impl ArenaTagKind {
    pub fn parse(id: &str) -> Result<Self, ArenaError> {
        id.parse().map_err(|_| ArenaError::UnknownTagKind(id.to_string()))
    }

    pub fn is_trap(self) -> bool {
        matches!(
            self,
            ArenaTagKind::Spikes | ArenaTagKind::ToxicSpikes | ArenaTagKind::StealthRock | ArenaTagKind::StickyWeb
        )
    }

    /// `LIGHT_SCREEN` becomes `lightScreen`.
    fn camel_name(self) -> String {
        let mut out = String::new();
        for (idx, word) in self.as_ref().split('_').enumerate() {
            let lower = word.to_lowercase();
            if idx == 0 {
                out.push_str(&lower);
                continue;
            }
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
        out
    }

    /// Localization key such as `arenaTag:reflectOnAddPlayer`.
    pub fn message_key(self, event: &str, side: ArenaTagSide) -> String {
        format!("arenaTag:{}{}{}", self.camel_name(), event, side.message_suffix())
    }
}

/// One case per tag kind, each carrying only its own extension state.
#[derive(Clone, Debug, PartialEq)]
pub enum ArenaEffect {
    /// Inert placeholder for snapshots whose kind could not be resolved.
    None,
    Mist,
    Safeguard,
    NoCrit,
    Reflect,
    LightScreen,
    AuroraVeil,
    QuickGuard,
    WideGuard,
    MatBlock,
    CraftyShield,
    MudSport,
    WaterSport,
    IonDeluge,
    Spikes(TrapLayers),
    ToxicSpikes(ToxicSpikesState),
    StealthRock(TrapLayers),
    StickyWeb(TrapLayers),
    FutureSight(DelayedAttack),
    DoomDesire(DelayedAttack),
    Wish(WishState),
    TrickRoom,
    Gravity,
    HappyHour,
    Tailwind,
    WaterFirePledge,
    FireGrassPledge,
    GrassWaterPledge,
    FairyLock,
    NeutralizingGas(SuppressionState),
}

impl ArenaEffect {
    pub fn kind(&self) -> ArenaTagKind {
        match self {
            ArenaEffect::None => ArenaTagKind::None,
            ArenaEffect::Mist => ArenaTagKind::Mist,
            ArenaEffect::Safeguard => ArenaTagKind::Safeguard,
            ArenaEffect::NoCrit => ArenaTagKind::NoCrit,
            ArenaEffect::Reflect => ArenaTagKind::Reflect,
            ArenaEffect::LightScreen => ArenaTagKind::LightScreen,
            ArenaEffect::AuroraVeil => ArenaTagKind::AuroraVeil,
            ArenaEffect::QuickGuard => ArenaTagKind::QuickGuard,
            ArenaEffect::WideGuard => ArenaTagKind::WideGuard,
            ArenaEffect::MatBlock => ArenaTagKind::MatBlock,
            ArenaEffect::CraftyShield => ArenaTagKind::CraftyShield,
            ArenaEffect::MudSport => ArenaTagKind::MudSport,
            ArenaEffect::WaterSport => ArenaTagKind::WaterSport,
            ArenaEffect::IonDeluge => ArenaTagKind::IonDeluge,
            ArenaEffect::Spikes(_) => ArenaTagKind::Spikes,
            ArenaEffect::ToxicSpikes(_) => ArenaTagKind::ToxicSpikes,
            ArenaEffect::StealthRock(_) => ArenaTagKind::StealthRock,
            ArenaEffect::StickyWeb(_) => ArenaTagKind::StickyWeb,
            ArenaEffect::FutureSight(_) => ArenaTagKind::FutureSight,
            ArenaEffect::DoomDesire(_) => ArenaTagKind::DoomDesire,
            ArenaEffect::Wish(_) => ArenaTagKind::Wish,
            ArenaEffect::TrickRoom => ArenaTagKind::TrickRoom,
            ArenaEffect::Gravity => ArenaTagKind::Gravity,
            ArenaEffect::HappyHour => ArenaTagKind::HappyHour,
            ArenaEffect::Tailwind => ArenaTagKind::Tailwind,
            ArenaEffect::WaterFirePledge => ArenaTagKind::WaterFirePledge,
            ArenaEffect::FireGrassPledge => ArenaTagKind::FireGrassPledge,
            ArenaEffect::GrassWaterPledge => ArenaTagKind::GrassWaterPledge,
            ArenaEffect::FairyLock => ArenaTagKind::FairyLock,
            ArenaEffect::NeutralizingGas(_) => ArenaTagKind::NeutralizingGas,
        }
    }

    pub fn trap(&self) -> Option<&TrapLayers> {
        match self {
            ArenaEffect::Spikes(trap) | ArenaEffect::StealthRock(trap) | ArenaEffect::StickyWeb(trap) => Some(trap),
            ArenaEffect::ToxicSpikes(state) => Some(&state.trap),
            _ => None,
        }
    }

    pub fn trap_mut(&mut self) -> Option<&mut TrapLayers> {
        match self {
            ArenaEffect::Spikes(trap) | ArenaEffect::StealthRock(trap) | ArenaEffect::StickyWeb(trap) => Some(trap),
            ArenaEffect::ToxicSpikes(state) => Some(&mut state.trap),
            _ => None,
        }
    }

    /// Variant-specific fields for the snapshot's `data` object.
    pub fn extension(&self) -> Map<String, Value> {
        match self {
            ArenaEffect::Spikes(trap) | ArenaEffect::StealthRock(trap) | ArenaEffect::StickyWeb(trap) => {
                write_extension(trap)
            }
            ArenaEffect::ToxicSpikes(state) => write_extension(state),
            ArenaEffect::FutureSight(attack) | ArenaEffect::DoomDesire(attack) => write_extension(attack),
            ArenaEffect::Wish(wish) => write_extension(wish),
            ArenaEffect::NeutralizingGas(state) => write_extension(state),
            _ => Map::new(),
        }
    }

    /// Copies the fields present in `data` over this variant's state.
    pub fn restore_extension(&mut self, data: &Map<String, Value>) {
        match self {
            ArenaEffect::Spikes(trap) | ArenaEffect::StealthRock(trap) | ArenaEffect::StickyWeb(trap) => {
                overlay_extension(trap, data)
            }
            ArenaEffect::ToxicSpikes(state) => overlay_extension(state, data),
            ArenaEffect::FutureSight(attack) | ArenaEffect::DoomDesire(attack) => overlay_extension(attack, data),
            ArenaEffect::Wish(wish) => overlay_extension(wish, data),
            ArenaEffect::NeutralizingGas(state) => overlay_extension(state, data),
            _ => {}
        }
    }
}

/// Typed queries answered by [`ArenaTag::apply`]. Each tag answers only the
/// queries it understands and writes its answer through the `&mut` outputs.
#[derive(Debug)]
pub enum TagQuery<'q> {
    /// A unit has just arrived on the field.
    Arrival { unit_id: &'q str },
    ScreenDamage {
        attacker_id: &'q str,
        category: MoveCategory,
        multiplier: &'q mut f64,
    },
    Protection {
        attacker_id: &'q str,
        defender_id: &'q str,
        move_id: &'q str,
        is_protected: &'q mut bool,
        ignores_bypass: &'q mut bool,
    },
    StatDrop {
        attacker_id: Option<&'q str>,
        cancelled: &'q mut bool,
    },
    StatusInfliction {
        attacker_id: Option<&'q str>,
        cancelled: &'q mut bool,
    },
    CriticalHit { blocked: &'q mut bool },
    MovePower {
        move_type: &'q str,
        multiplier: &'q mut f64,
    },
    MoveType { move_type: &'q mut String },
    TurnOrder { speed_reversed: &'q mut bool },
    Speed {
        unit_id: &'q str,
        multiplier: &'q mut f64,
    },
    SecondaryChance { multiplier: &'q mut f64 },
    Reward { multiplier: &'q mut f64 },
    SwitchLock {
        unit_id: &'q str,
        locked: &'q mut bool,
    },
}

/// Everything a hook may touch, passed explicitly into every call.
pub struct ArenaContext<'a> {
    pub state: &'a mut BattleState,
    pub moves: &'a MoveDatabase,
    pub type_chart: &'a TypeChart,
    pub queue: &'a mut EventQueue,
    removals: Vec<(ArenaTagKind, ArenaTagSide)>,
}

impl<'a> ArenaContext<'a> {
    pub fn new(
        state: &'a mut BattleState,
        moves: &'a MoveDatabase,
        type_chart: &'a TypeChart,
        queue: &'a mut EventQueue,
    ) -> Self {
        Self {
            state,
            moves,
            type_chart,
            queue,
            removals: Vec::new(),
        }
    }

    /// Asks the registry to remove a tag once the current hook returns.
    pub fn request_removal(&mut self, kind: ArenaTagKind, side: ArenaTagSide) {
        self.removals.push((kind, side));
    }

    pub(crate) fn take_removals(&mut self) -> Vec<(ArenaTagKind, ArenaTagSide)> {
        std::mem::take(&mut self.removals)
    }

    pub fn unit_name(&self, unit_id: &str) -> Option<String> {
        self.state.creature(unit_id).map(|c| c.name.clone())
    }

    pub fn move_name(&self, move_id: Option<&str>) -> Option<String> {
        let move_id = move_id?;
        Some(
            self.moves
                .get(move_id)
                .map(|m| m.display_name().to_string())
                .unwrap_or_else(|| move_id.to_string()),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArenaTag {
    /// Turns left; zero or negative means the tag never lapses by count.
    pub turn_count: i32,
    pub source_move: Option<String>,
    pub source_id: Option<String>,
    pub side: ArenaTagSide,
    pub effect: ArenaEffect,
}

impl ArenaTag {
    pub fn new(
        effect: ArenaEffect,
        turn_count: i32,
        source_move: Option<String>,
        source_id: Option<String>,
        side: ArenaTagSide,
    ) -> Self {
        Self {
            turn_count,
            source_move,
            source_id,
            side,
            effect,
        }
    }

    pub fn kind(&self) -> ArenaTagKind {
        self.effect.kind()
    }

    pub fn source<'c>(&self, ctx: &'c ArenaContext<'_>) -> Option<&'c CreatureState> {
        ctx.state.creature(self.source_id.as_deref()?)
    }

    /// Whether the unit that created this tag is still on the field.
    pub fn is_source_still_present(&self, ctx: &ArenaContext<'_>) -> bool {
        self.source_id
            .as_deref()
            .map(|id| ctx.state.is_active(id) && ctx.state.creature(id).is_some_and(|c| !c.is_fainted()))
            .unwrap_or(false)
    }

    pub fn move_name(&self, ctx: &ArenaContext<'_>) -> Option<String> {
        ctx.move_name(self.source_move.as_deref())
    }

    pub fn layers(&self) -> Option<u8> {
        self.effect.trap().map(|trap| trap.layers)
    }

    pub(crate) fn side_message(&self, ctx: &mut ArenaContext<'_>, event: &str) {
        let key = self.kind().message_key(event, self.side);
        let move_name = self.move_name(ctx);
        ctx.queue.message(&key, params_with_move_source(move_name.as_deref(), None));
    }

    pub fn apply(&mut self, ctx: &mut ArenaContext<'_>, simulated: bool, query: &mut TagQuery<'_>) -> bool {
        let kind = self.kind();
        let applied = match query {
            TagQuery::Arrival { unit_id } => {
                if kind.is_trap() {
                    hazards::apply_trap(self, ctx, simulated, unit_id)
                } else if kind == ArenaTagKind::Gravity {
                    modifiers::gravity_on_arrival(ctx, simulated, unit_id)
                } else {
                    false
                }
            }
            TagQuery::ScreenDamage {
                attacker_id,
                category,
                multiplier,
            } => match screens::weakened_categories(kind) {
                Some(categories) => screens::weaken(categories, ctx, attacker_id, *category, multiplier),
                None => false,
            },
            TagQuery::Protection {
                attacker_id,
                defender_id,
                move_id,
                is_protected,
                ignores_bypass,
            } => match ProtectionRule::for_kind(kind) {
                Some(rule) => protection::resolve(
                    self,
                    rule,
                    ctx,
                    simulated,
                    protection::ProtectionRequest {
                        attacker_id,
                        defender_id,
                        move_id,
                    },
                    is_protected,
                    ignores_bypass,
                ),
                None => false,
            },
            TagQuery::StatDrop { attacker_id, cancelled } if kind == ArenaTagKind::Mist => {
                modifiers::cancel_unless_bypassed(ctx, simulated, *attacker_id, cancelled, "arenaTag:mistApply")
            }
            TagQuery::StatusInfliction { attacker_id, cancelled } if kind == ArenaTagKind::Safeguard => {
                modifiers::cancel_unless_bypassed(ctx, simulated, *attacker_id, cancelled, "arenaTag:safeguardApply")
            }
            TagQuery::CriticalHit { blocked } if kind == ArenaTagKind::NoCrit => {
                **blocked = true;
                true
            }
            TagQuery::MovePower { move_type, multiplier } => {
                modifiers::weaken_move_type(kind, move_type, multiplier)
            }
            TagQuery::MoveType { move_type } if kind == ArenaTagKind::IonDeluge => {
                modifiers::electrify_normal(move_type)
            }
            TagQuery::TurnOrder { speed_reversed } if kind == ArenaTagKind::TrickRoom => {
                **speed_reversed = !**speed_reversed;
                true
            }
            TagQuery::Speed { multiplier, .. } => modifiers::modify_speed(kind, multiplier),
            TagQuery::SecondaryChance { multiplier } if kind == ArenaTagKind::WaterFirePledge => {
                **multiplier *= 2.0;
                true
            }
            TagQuery::Reward { multiplier } if kind == ArenaTagKind::HappyHour => {
                **multiplier *= 2.0;
                true
            }
            TagQuery::SwitchLock { unit_id, locked } if kind == ArenaTagKind::FairyLock => {
                modifiers::lock_switch(ctx, unit_id, locked)
            }
            _ => false,
        };
        tracing::trace!(%kind, side = ?self.side, simulated, applied, "arena tag query");
        applied
    }

    pub fn on_add(&mut self, ctx: &mut ArenaContext<'_>, quiet: bool) {
        let kind = self.kind();
        tracing::debug!(%kind, side = ?self.side, turns = self.turn_count, quiet, "arena tag added");
        match kind {
            ArenaTagKind::None | ArenaTagKind::FutureSight | ArenaTagKind::DoomDesire => {}
            ArenaTagKind::Mist => modifiers::mist_on_add(self, ctx, quiet),
            ArenaTagKind::Safeguard
            | ArenaTagKind::NoCrit
            | ArenaTagKind::Reflect
            | ArenaTagKind::LightScreen
            | ArenaTagKind::AuroraVeil => {
                if !quiet {
                    self.side_message(ctx, "OnAdd");
                }
            }
            ArenaTagKind::QuickGuard | ArenaTagKind::WideGuard | ArenaTagKind::CraftyShield => {
                protection::on_add(self, ctx)
            }
            ArenaTagKind::MatBlock => protection::mat_block_on_add(self, ctx),
            ArenaTagKind::MudSport
            | ArenaTagKind::WaterSport
            | ArenaTagKind::IonDeluge
            | ArenaTagKind::HappyHour
            | ArenaTagKind::WaterFirePledge
            | ArenaTagKind::FireGrassPledge
            | ArenaTagKind::GrassWaterPledge
            | ArenaTagKind::FairyLock => self.side_message(ctx, "OnAdd"),
            ArenaTagKind::Spikes
            | ArenaTagKind::ToxicSpikes
            | ArenaTagKind::StealthRock
            | ArenaTagKind::StickyWeb => hazards::on_add(self, ctx, quiet),
            ArenaTagKind::Wish => delayed::wish_on_add(self, ctx),
            ArenaTagKind::TrickRoom => modifiers::trick_room_on_add(self, ctx),
            ArenaTagKind::Gravity => modifiers::gravity_on_add(self, ctx),
            ArenaTagKind::Tailwind => modifiers::tailwind_on_add(self, ctx, quiet),
            ArenaTagKind::NeutralizingGas => suppression::on_add(self, ctx),
        }
    }

    /// Default removal notification, scoped by side.
    pub(crate) fn announce_removal(&self, ctx: &mut ArenaContext<'_>, quiet: bool) {
        if quiet {
            return;
        }
        let key = self.kind().message_key("OnRemove", self.side);
        ctx.queue.message(&key, Map::new());
    }

    pub fn on_remove(&mut self, ctx: &mut ArenaContext<'_>, quiet: bool) {
        let kind = self.kind();
        tracing::debug!(%kind, side = ?self.side, quiet, "arena tag removed");
        match kind {
            ArenaTagKind::None
            | ArenaTagKind::QuickGuard
            | ArenaTagKind::WideGuard
            | ArenaTagKind::MatBlock
            | ArenaTagKind::CraftyShield
            | ArenaTagKind::FutureSight
            | ArenaTagKind::DoomDesire => {}
            ArenaTagKind::ToxicSpikes => {
                let neutralized = matches!(&self.effect, ArenaEffect::ToxicSpikes(state) if state.neutralized);
                if !neutralized {
                    self.announce_removal(ctx, quiet);
                }
            }
            ArenaTagKind::Wish => delayed::wish_on_remove(self, ctx),
            ArenaTagKind::NoCrit => modifiers::no_crit_on_remove(self, ctx, quiet),
            ArenaTagKind::Gravity => {
                self.announce_removal(ctx, quiet);
                modifiers::gravity_on_remove(ctx);
            }
            ArenaTagKind::NeutralizingGas => suppression::on_remove(self, ctx, quiet),
            _ => self.announce_removal(ctx, quiet),
        }
    }

    /// Runs when a same-kind tag is requested on a side that already has one.
    /// Returns `false` when the existing tag must be removed instead (toggle).
    pub fn on_overlap(&mut self, ctx: &mut ArenaContext<'_>, source_id: Option<&str>) -> bool {
        let kind = self.kind();
        tracing::debug!(%kind, side = ?self.side, ?source_id, "arena tag overlap");
        match kind {
            ArenaTagKind::Spikes
            | ArenaTagKind::ToxicSpikes
            | ArenaTagKind::StealthRock
            | ArenaTagKind::StickyWeb => {
                hazards::on_overlap(self, ctx);
                true
            }
            ArenaTagKind::TrickRoom => false,
            ArenaTagKind::NeutralizingGas => {
                suppression::on_overlap(self, ctx, source_id);
                true
            }
            _ => true,
        }
    }

    /// Base countdown: non-positive counts never expire; otherwise decrement
    /// and report whether any turns remain.
    pub(crate) fn base_lapse(&mut self) -> bool {
        if self.turn_count < 1 {
            return true;
        }
        self.turn_count -= 1;
        self.turn_count != 0
    }

    /// Once-per-turn tick. Returns `false` exactly when the tag must go.
    pub fn lapse(&mut self, ctx: &mut ArenaContext<'_>) -> bool {
        match self.kind() {
            ArenaTagKind::FutureSight | ArenaTagKind::DoomDesire => delayed::lapse_attack(self, ctx),
            ArenaTagKind::FireGrassPledge => modifiers::sea_of_fire_lapse(self, ctx),
            _ => self.base_lapse(),
        }
    }

    /// A unit contributing to this tag is leaving the field.
    pub fn on_source_leave(&mut self, ctx: &mut ArenaContext<'_>, leaving_id: Option<&str>) {
        if let ArenaEffect::NeutralizingGas(_) = self.effect {
            suppression::on_source_leave(self, ctx, leaving_id);
        }
    }

    /// Read-only heuristic for scoring collaborators; only traps have one.
    pub fn matchup_score_multiplier(&self, ctx: &ArenaContext<'_>, unit_id: &str) -> Option<f64> {
        let unit = ctx.state.creature(unit_id)?;
        hazards::matchup_score_multiplier(self, ctx, unit)
    }

    pub fn snapshot(&self) -> ArenaTagSnapshot {
        ArenaTagSnapshot {
            tag_type: self.kind().to_string(),
            turn_count: self.turn_count,
            source_move: self.source_move.clone(),
            source_id: self.source_id.clone(),
            side: self.side,
            data: self.effect.extension(),
        }
    }

    /// Copies the shared descriptor fields from a snapshot.
    pub fn load_base(&mut self, snapshot: &ArenaTagSnapshot) {
        self.turn_count = snapshot.turn_count;
        self.source_move = snapshot.source_move.clone();
        self.source_id = snapshot.source_id.clone();
        self.side = snapshot.side;
    }
}
