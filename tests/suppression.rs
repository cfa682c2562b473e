mod common;

use arena_engine::core::events::ResolutionStep;
use arena_engine::core::state::BattleFormat;
use arena_engine::core::suppression::SuppressionState;
use arena_engine::{ArenaEffect, ArenaField, ArenaTagKind, ArenaTagSide};
use common::{make_creature, make_state, options, with_ability, Harness};

fn gas_state(field: &ArenaField) -> Option<SuppressionState> {
    match field.get_tag(ArenaTagKind::NeutralizingGas).map(|tag| &tag.effect) {
        Some(ArenaEffect::NeutralizingGas(state)) => Some(*state),
        _ => None,
    }
}

fn doubles() -> Harness {
    Harness::new(make_state(
        BattleFormat::Double,
        vec![
            with_ability(make_creature("p1a", "Alpha", &["poison"]), "neutralizing_gas"),
            with_ability(make_creature("p1b", "Bravo", &["normal"]), "intimidate"),
        ],
        vec![
            with_ability(make_creature("e1", "Beta", &["water"]), "drizzle"),
            with_ability(make_creature("e2", "Gamma", &["poison"]), "neutralizing_gas"),
        ],
    ))
}

#[test]
fn gas_suppresses_everyone_but_its_source() {
    let mut h = doubles();
    let mut field = ArenaField::new();
    {
        let mut ctx = h.ctx();
        field.add_tag(&mut ctx, ArenaTagKind::NeutralizingGas, options("p1a", "", ArenaTagSide::Player, 5), false);
    }

    let tag = field.get_tag(ArenaTagKind::NeutralizingGas).expect("gas active");
    assert_eq!(tag.side, ArenaTagSide::Both);
    assert_eq!(tag.turn_count, 0);
    assert!(!h.creature("p1a").ability_suppressed);
    assert!(h.creature("p1b").ability_suppressed);
    assert!(h.creature("e1").ability_suppressed);
    assert_eq!(h.message_keys(), vec!["arenaTag:neutralizingGasOnAdd".to_string()]);

    let state = gas_state(&field).expect("gas state");
    assert_eq!(state.source_count, 1);
    assert!(!state.should_apply_to_self());
    assert!(!state.is_being_removed());
}

#[test]
fn source_count_drives_reactivation_and_removal() {
    let mut h = doubles();
    let mut field = ArenaField::new();
    let mut ctx = h.ctx();
    field.add_tag(&mut ctx, ArenaTagKind::NeutralizingGas, options("p1a", "", ArenaTagSide::Player, 0), false);

    assert!(!field.add_tag(&mut ctx, ArenaTagKind::NeutralizingGas, options("e2", "", ArenaTagSide::Enemy, 0), false));
    let state = gas_state(&field).expect("gas state");
    assert_eq!(state.source_count, 2);
    assert!(state.should_apply_to_self());

    field.notify_source_leave(&mut ctx, "e2");
    assert_eq!(gas_state(&field).map(|state| state.source_count), Some(1));
    assert!(field.has_tag(ArenaTagKind::NeutralizingGas));

    field.notify_source_leave(&mut ctx, "p1a");
    assert!(!field.has_tag(ArenaTagKind::NeutralizingGas));
    assert!(ctx.queue.message_keys().contains(&"arenaTag:neutralizingGasOnRemove"));

    drop(ctx);
    assert!(!h.creature("p1b").ability_suppressed);
    assert!(!h.creature("e1").ability_suppressed);
    let triggers: Vec<String> = h
        .queue
        .steps()
        .filter_map(|step| match step {
            ResolutionStep::AbilityTrigger { ability, .. } => Some(ability.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(triggers, vec!["intimidate".to_string(), "drizzle".to_string()]);
}

#[test]
fn last_remaining_source_regains_its_passive() {
    let mut h = doubles();
    {
        let alpha = h.state.creature_mut("p1a").expect("p1a exists");
        alpha.passive_ability = Some("drought".to_string());
    }
    let mut field = ArenaField::new();
    {
        let mut ctx = h.ctx();
        field.add_tag(&mut ctx, ArenaTagKind::NeutralizingGas, options("p1a", "", ArenaTagSide::Player, 0), false);
        field.add_tag(&mut ctx, ArenaTagKind::NeutralizingGas, options("e2", "", ArenaTagSide::Enemy, 0), false);
    }
    h.state.creature_mut("p1a").expect("p1a exists").ability_suppressed = true;
    h.clear_events();
    {
        let mut ctx = h.ctx();
        field.notify_source_leave(&mut ctx, "e2");
    }

    assert_eq!(gas_state(&field).map(|state| state.source_count), Some(1));
    assert!(!h.creature("p1a").ability_suppressed);
    assert!(h.creature("p1b").ability_suppressed);
    let steps: Vec<_> = h.queue.steps().cloned().collect();
    assert_eq!(
        steps,
        vec![ResolutionStep::AbilityTrigger {
            unit_id: "p1a".to_string(),
            ability: "drought".to_string(),
        }]
    );
}

#[test]
fn non_sources_leaving_do_not_count() {
    let mut h = doubles();
    let mut field = ArenaField::new();
    let mut ctx = h.ctx();
    field.add_tag(&mut ctx, ArenaTagKind::NeutralizingGas, options("p1a", "", ArenaTagSide::Player, 0), false);

    field.notify_source_leave(&mut ctx, "p1b");
    assert_eq!(gas_state(&field).map(|state| state.source_count), Some(1));
}

#[test]
fn quiet_removal_still_restores_abilities() {
    let mut h = doubles();
    let mut field = ArenaField::new();
    {
        let mut ctx = h.ctx();
        field.add_tag(&mut ctx, ArenaTagKind::NeutralizingGas, options("p1a", "", ArenaTagSide::Player, 0), false);
    }
    h.clear_events();
    {
        let mut ctx = h.ctx();
        assert!(field.remove_tag_on_side(&mut ctx, ArenaTagKind::NeutralizingGas, ArenaTagSide::Player, true));
    }
    assert!(h.message_keys().is_empty());
    assert!(!h.creature("e1").ability_suppressed);
}
