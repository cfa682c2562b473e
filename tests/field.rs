mod common;

use arena_engine::core::events::ResolutionStep;
use arena_engine::{ArenaField, ArenaTagKind, ArenaTagSide, EventQueue, TagQuery};
use common::{default_state, options, Harness};

#[test]
fn kind_scoped_queries_only_reach_that_kind() {
    let mut h = Harness::new(default_state());
    let mut field = ArenaField::new();
    let mut ctx = h.ctx();
    field.add_tag(&mut ctx, ArenaTagKind::HappyHour, options("p1a", "happy_hour", ArenaTagSide::Player, 0), true);
    field.add_tag(&mut ctx, ArenaTagKind::Mist, options("p1a", "mist", ArenaTagSide::Player, 5), true);
    ctx.queue.drain_events();

    let mut reward = 1.0;
    assert!(!field.apply_tags_of_kind(
        &mut ctx,
        ArenaTagKind::Mist,
        ArenaTagSide::Player,
        false,
        &mut TagQuery::Reward { multiplier: &mut reward },
    ));
    assert_eq!(reward, 1.0);
    assert!(field.apply_tags_of_kind(
        &mut ctx,
        ArenaTagKind::HappyHour,
        ArenaTagSide::Player,
        false,
        &mut TagQuery::Reward { multiplier: &mut reward },
    ));
    assert_eq!(reward, 2.0);

    let mut cancelled = false;
    assert!(!field.apply_tags_of_kind(
        &mut ctx,
        ArenaTagKind::Mist,
        ArenaTagSide::Enemy,
        false,
        &mut TagQuery::StatDrop {
            attacker_id: Some("e1"),
            cancelled: &mut cancelled,
        },
    ));
    assert!(!cancelled);
    assert!(field.apply_tags_of_kind(
        &mut ctx,
        ArenaTagKind::Mist,
        ArenaTagSide::Player,
        false,
        &mut TagQuery::StatDrop {
            attacker_id: Some("e1"),
            cancelled: &mut cancelled,
        },
    ));
    assert!(cancelled);
    assert_eq!(ctx.queue.message_keys(), vec!["arenaTag:mistApply"]);
}

#[test]
fn clearing_the_field_runs_every_removal_hook() {
    let mut h = Harness::new(default_state());
    let mut field = ArenaField::new();
    {
        let mut ctx = h.ctx();
        field.add_tag(&mut ctx, ArenaTagKind::Reflect, options("p1a", "reflect", ArenaTagSide::Player, 5), true);
        field.add_tag(&mut ctx, ArenaTagKind::NeutralizingGas, options("p1a", "", ArenaTagSide::Player, 0), true);
    }
    assert!(h.creature("e1").ability_suppressed);
    h.clear_events();
    {
        let mut ctx = h.ctx();
        field.remove_all_tags(&mut ctx);
    }

    assert!(field.tags().is_empty());
    assert!(!h.creature("e1").ability_suppressed);
    assert_eq!(
        h.message_keys(),
        vec![
            "arenaTag:reflectOnRemovePlayer".to_string(),
            "arenaTag:neutralizingGasOnRemove".to_string(),
        ]
    );
}

fn source_present(h: &mut Harness, field: &ArenaField, kind: ArenaTagKind) -> bool {
    let ctx = h.ctx();
    field.get_tag(kind).is_some_and(|tag| tag.is_source_still_present(&ctx))
}

#[test]
fn source_presence_follows_the_field() {
    let mut h = Harness::new(default_state());
    let mut field = ArenaField::new();
    {
        let mut ctx = h.ctx();
        field.add_tag(&mut ctx, ArenaTagKind::Reflect, options("p1a", "reflect", ArenaTagSide::Player, 5), true);
        field.add_tag(&mut ctx, ArenaTagKind::LightScreen, options("p1b", "light_screen", ArenaTagSide::Player, 5), true);
    }
    assert!(source_present(&mut h, &field, ArenaTagKind::Reflect));
    assert!(!source_present(&mut h, &field, ArenaTagKind::LightScreen));

    h.state.creature_mut("p1a").expect("p1a exists").hp = 0;
    assert!(!source_present(&mut h, &field, ArenaTagKind::Reflect));

    h.state.players[0].active = vec![1];
    assert!(source_present(&mut h, &field, ArenaTagKind::LightScreen));
}

#[test]
fn steps_inserted_next_run_before_queued_ones() {
    let mut queue = EventQueue::new();
    queue.append(ResolutionStep::Heal { slot: 0, amount: 1 });
    queue.insert_next(ResolutionStep::Heal { slot: 0, amount: 2 });
    queue.insert_next(ResolutionStep::Heal { slot: 0, amount: 3 });

    let order: Vec<i32> = std::iter::from_fn(|| queue.pop_step())
        .map(|step| match step {
            ResolutionStep::Heal { amount, .. } => amount,
            other => panic!("unexpected step {other:?}"),
        })
        .collect();
    assert_eq!(order, vec![3, 2, 1]);
}
