//! The arena tag registry: holds the active tags for both sides and drives
//! their lifecycle. Tags never touch this collection directly; removal
//! requests made through [`ArenaContext::request_removal`] are carried out
//! here once the running hook returns.

use crate::core::config::ArenaConfig;
use crate::core::factory::{create_arena_tag, load_arena_tag, CreateArenaTagOptions};
use crate::core::protection::ProtectionOutcome;
use crate::core::snapshot::ArenaTagSnapshot;
use crate::core::state::ArenaTagSide;
use crate::core::tags::{ArenaContext, ArenaTag, ArenaTagKind, TagQuery};
use crate::data::moves::MoveCategory;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArenaField {
    tags: Vec<ArenaTag>,
}

impl ArenaField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[ArenaTag] {
        &self.tags
    }

    pub fn get_tag(&self, kind: ArenaTagKind) -> Option<&ArenaTag> {
        self.tags.iter().find(|tag| tag.kind() == kind)
    }

    /// Finds a tag of `kind` relevant to `side`; field-wide tags match any side.
    pub fn get_tag_on_side(&self, kind: ArenaTagKind, side: ArenaTagSide) -> Option<&ArenaTag> {
        self.position_on_side(kind, side).map(|idx| &self.tags[idx])
    }

    pub fn has_tag(&self, kind: ArenaTagKind) -> bool {
        self.get_tag(kind).is_some()
    }

    pub fn has_tag_on_side(&self, kind: ArenaTagKind, side: ArenaTagSide) -> bool {
        self.position_on_side(kind, side).is_some()
    }

    fn position_on_side(&self, kind: ArenaTagKind, side: ArenaTagSide) -> Option<usize> {
        self.tags
            .iter()
            .position(|tag| tag.kind() == kind && tag.side.covers(side))
    }

    /// Adds a tag, or lets the one already on that side react to the repeat
    /// (stack a layer, count a source, toggle off). Returns `true` only when a
    /// new tag was created.
    pub fn add_tag(
        &mut self,
        ctx: &mut ArenaContext<'_>,
        kind: ArenaTagKind,
        options: CreateArenaTagOptions,
        quiet: bool,
    ) -> bool {
        let source_id = options.source_id.clone();
        let Some(mut tag) = create_arena_tag(kind, options) else {
            tracing::warn!(%kind, "arena tag kind cannot be created");
            return false;
        };
        if let Some(idx) = self.position_on_side(kind, tag.side) {
            let keep = self.tags[idx].on_overlap(ctx, source_id.as_deref());
            if !keep {
                let mut existing = self.tags.remove(idx);
                existing.on_remove(ctx, false);
            }
            self.flush_removals(ctx);
            return false;
        }
        tag.on_add(ctx, quiet);
        self.tags.push(tag);
        self.flush_removals(ctx);
        true
    }

    /// [`ArenaField::add_tag`] with the duration taken from `config`.
    pub fn add_tag_with_defaults(
        &mut self,
        ctx: &mut ArenaContext<'_>,
        config: &ArenaConfig,
        kind: ArenaTagKind,
        options: CreateArenaTagOptions,
        quiet: bool,
    ) -> bool {
        let options = CreateArenaTagOptions {
            turn_count: config.turns_for(kind),
            ..options
        };
        self.add_tag(ctx, kind, options, quiet)
    }

    /// Asks every tag relevant to `side` to answer `query`. Returns whether
    /// any of them acted.
    pub fn apply_tags(
        &mut self,
        ctx: &mut ArenaContext<'_>,
        side: ArenaTagSide,
        simulated: bool,
        query: &mut TagQuery<'_>,
    ) -> bool {
        let mut applied = false;
        for tag in self.tags.iter_mut().filter(|tag| tag.side.covers(side)) {
            applied |= tag.apply(ctx, simulated, query);
        }
        self.flush_removals(ctx);
        applied
    }

    /// Like [`ArenaField::apply_tags`], restricted to one kind.
    pub fn apply_tags_of_kind(
        &mut self,
        ctx: &mut ArenaContext<'_>,
        kind: ArenaTagKind,
        side: ArenaTagSide,
        simulated: bool,
        query: &mut TagQuery<'_>,
    ) -> bool {
        let mut applied = false;
        for tag in self
            .tags
            .iter_mut()
            .filter(|tag| tag.kind() == kind && tag.side.covers(side))
        {
            applied |= tag.apply(ctx, simulated, query);
        }
        self.flush_removals(ctx);
        applied
    }

    /// Runs switch-in effects for `unit_id`. Field-wide grounding runs before
    /// the hazards so a Gravity-grounded unit is hit by them.
    pub fn apply_arrival(&mut self, ctx: &mut ArenaContext<'_>, unit_id: &str, simulated: bool) -> bool {
        let Some(side) = ctx.state.side_of(unit_id) else {
            return false;
        };
        let mut applied = false;
        for traps in [false, true] {
            for tag in self
                .tags
                .iter_mut()
                .filter(|tag| tag.kind().is_trap() == traps && tag.side.covers(side))
            {
                applied |= tag.apply(ctx, simulated, &mut TagQuery::Arrival { unit_id });
            }
        }
        self.flush_removals(ctx);
        applied
    }

    /// End-of-turn countdown. Expired tags are detached first and then
    /// notified in the order they were added.
    pub fn lapse_tags(&mut self, ctx: &mut ArenaContext<'_>) {
        let mut expired = Vec::new();
        let mut kept = Vec::with_capacity(self.tags.len());
        for mut tag in std::mem::take(&mut self.tags) {
            if tag.lapse(ctx) {
                kept.push(tag);
            } else {
                expired.push(tag);
            }
        }
        self.tags = kept;
        for mut tag in expired {
            tracing::debug!(kind = %tag.kind(), side = ?tag.side, "arena tag expired");
            tag.on_remove(ctx, false);
        }
        self.flush_removals(ctx);
    }

    pub fn remove_tag(&mut self, ctx: &mut ArenaContext<'_>, kind: ArenaTagKind) -> bool {
        let Some(idx) = self.tags.iter().position(|tag| tag.kind() == kind) else {
            return false;
        };
        let mut tag = self.tags.remove(idx);
        tag.on_remove(ctx, false);
        self.flush_removals(ctx);
        true
    }

    pub fn remove_tag_on_side(
        &mut self,
        ctx: &mut ArenaContext<'_>,
        kind: ArenaTagKind,
        side: ArenaTagSide,
        quiet: bool,
    ) -> bool {
        let removed = self.detach(ctx, kind, side, quiet);
        self.flush_removals(ctx);
        removed
    }

    pub fn remove_all_tags(&mut self, ctx: &mut ArenaContext<'_>) {
        while !self.tags.is_empty() {
            let mut tag = self.tags.remove(0);
            tag.on_remove(ctx, false);
        }
        // Whatever the hooks asked for is already gone.
        ctx.take_removals();
    }

    /// Tells every tag that `unit_id` is leaving the field.
    pub fn notify_source_leave(&mut self, ctx: &mut ArenaContext<'_>, unit_id: &str) {
        for tag in self.tags.iter_mut() {
            tag.on_source_leave(ctx, Some(unit_id));
        }
        self.flush_removals(ctx);
    }

    pub fn snapshot(&self) -> Vec<ArenaTagSnapshot> {
        self.tags.iter().map(ArenaTag::snapshot).collect()
    }

    /// Replaces the current tags with loaded ones. No hooks run.
    pub fn restore(&mut self, snapshots: &[ArenaTagSnapshot]) {
        self.tags = snapshots.iter().map(load_arena_tag).collect();
    }

    /// Damage multiplier the screens on `defender_side` impose on an attack.
    pub fn screen_multiplier(
        &mut self,
        ctx: &mut ArenaContext<'_>,
        defender_side: ArenaTagSide,
        attacker_id: &str,
        category: MoveCategory,
    ) -> f64 {
        let mut multiplier = 1.0;
        self.apply_tags(
            ctx,
            defender_side,
            true,
            &mut TagQuery::ScreenDamage {
                attacker_id,
                category,
                multiplier: &mut multiplier,
            },
        );
        multiplier
    }

    /// Runs the conditional protections guarding `defender_id`.
    pub fn is_protected(
        &mut self,
        ctx: &mut ArenaContext<'_>,
        simulated: bool,
        attacker_id: &str,
        defender_id: &str,
        move_id: &str,
    ) -> ProtectionOutcome {
        let mut outcome = ProtectionOutcome::default();
        let Some(side) = ctx.state.side_of(defender_id) else {
            return outcome;
        };
        self.apply_tags(
            ctx,
            side,
            simulated,
            &mut TagQuery::Protection {
                attacker_id,
                defender_id,
                move_id,
                is_protected: &mut outcome.is_protected,
                ignores_bypass: &mut outcome.ignores_bypass,
            },
        );
        outcome
    }

    pub fn is_speed_reversed(&mut self, ctx: &mut ArenaContext<'_>) -> bool {
        let mut speed_reversed = false;
        self.apply_tags(
            ctx,
            ArenaTagSide::Both,
            true,
            &mut TagQuery::TurnOrder {
                speed_reversed: &mut speed_reversed,
            },
        );
        speed_reversed
    }

    /// Product of the hazard scores on the unit's side; 1.0 with no hazards.
    pub fn matchup_score_multiplier(&self, ctx: &ArenaContext<'_>, unit_id: &str) -> f64 {
        let Some(side) = ctx.state.side_of(unit_id) else {
            return 1.0;
        };
        self.tags
            .iter()
            .filter(|tag| tag.side.covers(side))
            .filter_map(|tag| tag.matchup_score_multiplier(ctx, unit_id))
            .product()
    }

    fn detach(&mut self, ctx: &mut ArenaContext<'_>, kind: ArenaTagKind, side: ArenaTagSide, quiet: bool) -> bool {
        let Some(idx) = self.position_on_side(kind, side) else {
            return false;
        };
        let mut tag = self.tags.remove(idx);
        tag.on_remove(ctx, quiet);
        true
    }

    /// Carries out removals hooks requested, including any that those
    /// removals request in turn.
    fn flush_removals(&mut self, ctx: &mut ArenaContext<'_>) {
        loop {
            let pending = ctx.take_removals();
            if pending.is_empty() {
                break;
            }
            for (kind, side) in pending {
                self.detach(ctx, kind, side, false);
            }
        }
    }
}
