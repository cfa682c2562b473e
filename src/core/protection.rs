//! Conditional protection (Quick Guard, Wide Guard, Mat Block, Crafty Shield).
//!
//! Each tag shields the units of its side from incoming moves that satisfy its
//! predicate. When several apply to the same move, the first one to trigger
//! plays the block feedback and `ignores_bypass` accumulates as a sticky OR.

use crate::core::abilities::priority_modifier;
use crate::core::events::{params_with_move_source, CommonAnim};
use crate::core::state::ArenaTagSide;
use crate::core::tags::{ArenaContext, ArenaTag, ArenaTagKind};
use crate::core::utils::{is_field_target, is_multi_target, is_status_move};

/// The incoming move a protection tag is asked about.
#[derive(Clone, Copy, Debug)]
pub struct ProtectionRequest<'r> {
    pub attacker_id: &'r str,
    pub defender_id: &'r str,
    pub move_id: &'r str,
}

/// Combined answer of every protection tag on the defender's side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProtectionOutcome {
    pub is_protected: bool,
    /// Set when a triggered block also stops moves that ignore protection.
    pub ignores_bypass: bool,
}

pub type ProtectionPredicate = fn(&ArenaContext<'_>, &ProtectionRequest<'_>) -> bool;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtectionRule {
    PositivePriority,
    MultiTarget,
    Damaging,
    TargetedStatus,
}

impl ProtectionRule {
    pub fn for_kind(kind: ArenaTagKind) -> Option<Self> {
        match kind {
            ArenaTagKind::QuickGuard => Some(ProtectionRule::PositivePriority),
            ArenaTagKind::WideGuard => Some(ProtectionRule::MultiTarget),
            ArenaTagKind::MatBlock => Some(ProtectionRule::Damaging),
            ArenaTagKind::CraftyShield => Some(ProtectionRule::TargetedStatus),
            _ => None,
        }
    }

    pub fn predicate(self) -> ProtectionPredicate {
        match self {
            ProtectionRule::PositivePriority => has_positive_priority,
            ProtectionRule::MultiTarget => targets_multiple,
            ProtectionRule::Damaging => is_damaging,
            ProtectionRule::TargetedStatus => is_targeted_status,
        }
    }

    /// Whether this block also stops moves that normally ignore protection.
    pub fn overrides_other_protection(self) -> bool {
        self == ProtectionRule::TargetedStatus
    }
}

fn has_positive_priority(ctx: &ArenaContext<'_>, request: &ProtectionRequest<'_>) -> bool {
    let Some(move_data) = ctx.moves.get(request.move_id) else {
        return false;
    };
    let bonus = ctx
        .state
        .creature(request.attacker_id)
        .map(|attacker| priority_modifier(attacker, move_data))
        .unwrap_or(0);
    move_data.priority + bonus > 0
}

fn targets_multiple(ctx: &ArenaContext<'_>, request: &ProtectionRequest<'_>) -> bool {
    ctx.moves.get(request.move_id).is_some_and(is_multi_target)
}

fn is_damaging(ctx: &ArenaContext<'_>, request: &ProtectionRequest<'_>) -> bool {
    ctx.moves.get(request.move_id).is_some_and(|m| !is_status_move(m))
}

fn is_targeted_status(ctx: &ArenaContext<'_>, request: &ProtectionRequest<'_>) -> bool {
    ctx.moves
        .get(request.move_id)
        .is_some_and(|m| is_status_move(m) && !is_field_target(m))
}

pub fn resolve(
    tag: &ArenaTag,
    rule: ProtectionRule,
    ctx: &mut ArenaContext<'_>,
    simulated: bool,
    request: ProtectionRequest<'_>,
    is_protected: &mut bool,
    ignores_bypass: &mut bool,
) -> bool {
    let defender_is_player = ctx.state.is_player(request.defender_id);
    if (tag.side == ArenaTagSide::Player) != defender_is_player || !(rule.predicate())(ctx, &request) {
        return false;
    }
    if !*is_protected {
        *is_protected = true;
        if !simulated {
            let move_name = tag.move_name(ctx);
            let defender_name = ctx.unit_name(request.defender_id);
            ctx.queue.animate(CommonAnim::Protect, request.defender_id);
            ctx.queue.message(
                "arenaTag:conditionalProtectApply",
                params_with_move_source(move_name.as_deref(), defender_name.as_deref()),
            );
        }
    }
    *ignores_bypass = *ignores_bypass || rule.overrides_other_protection();
    true
}

/// Protection tags always announce themselves, even when added quietly.
pub fn on_add(tag: &ArenaTag, ctx: &mut ArenaContext<'_>) {
    tag.side_message(ctx, "OnAdd");
}

pub fn mat_block_on_add(tag: &ArenaTag, ctx: &mut ArenaContext<'_>) {
    match tag.source(ctx).map(|source| source.name.clone()) {
        Some(name) => ctx
            .queue
            .message("arenaTag:matBlockOnAdd", params_with_move_source(None, Some(&name))),
        None => tracing::warn!(source = ?tag.source_id, "mat block source not found"),
    }
}
