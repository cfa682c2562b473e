mod common;

use arena_engine::core::screens::DOUBLES_SCREEN_MULTIPLIER;
use arena_engine::core::state::{BattleFormat, PlayerState};
use arena_engine::{ArenaConfig, ArenaError, ArenaField, ArenaTagKind, ArenaTagSide, MoveCategory, MoveDatabase};
use common::{default_state, make_creature, options, Harness};
use std::path::Path;

#[test]
fn default_durations_cover_the_timed_tags() {
    let config = ArenaConfig::default();

    assert_eq!(config.format, BattleFormat::Single);
    assert_eq!(config.turns_for(ArenaTagKind::Reflect), 5);
    assert_eq!(config.turns_for(ArenaTagKind::Tailwind), 4);
    assert_eq!(config.turns_for(ArenaTagKind::FairyLock), 2);
    assert_eq!(config.turns_for(ArenaTagKind::Spikes), 0);
}

#[test]
fn yaml_overrides_merge_onto_defaults() {
    let yaml = "format: double\ndefault_turns:\n  REFLECT: 8\n  LIGHT_SCREEN: 8\n";
    let config = ArenaConfig::load_from_yaml_str(yaml).expect("valid yaml");

    assert_eq!(config.format, BattleFormat::Double);
    assert_eq!(config.turns_for(ArenaTagKind::Reflect), 8);
    assert_eq!(config.turns_for(ArenaTagKind::LightScreen), 8);
    assert_eq!(config.turns_for(ArenaTagKind::Tailwind), 4);
}

#[test]
fn bad_config_sources_report_errors() {
    let err = ArenaConfig::load_from_yaml_str("default_turns:\n  NOT_A_TAG: 3\n").expect_err("unknown kind");
    assert!(matches!(err, ArenaError::Yaml(_)));

    let err = ArenaConfig::load_from_yaml_file(Path::new("does/not/exist.yaml")).expect_err("missing file");
    assert!(matches!(err, ArenaError::Io { .. }));
}

fn doubles_player(id: &str, side: ArenaTagSide, units: &[(&str, &str)]) -> PlayerState {
    PlayerState {
        id: id.to_string(),
        name: id.to_uppercase(),
        side,
        team: units.iter().map(|&(uid, name)| make_creature(uid, name, &["normal"])).collect(),
        active: Vec::new(),
    }
}

#[test]
fn configured_format_sets_the_screen_multiplier() {
    let config = ArenaConfig::load_from_yaml_str("format: double\n").expect("valid yaml");
    let state = config.create_battle_state(vec![
        doubles_player("p1", ArenaTagSide::Player, &[("p1a", "Alpha"), ("p1b", "Bravo")]),
        doubles_player("p2", ArenaTagSide::Enemy, &[("e1", "Beta"), ("e2", "Gamma")]),
    ]);
    assert_eq!(state.format, BattleFormat::Double);
    assert_eq!(state.players[1].active, vec![0, 1]);

    let mut h = Harness::new(state);
    let mut field = ArenaField::new();
    let mut ctx = h.ctx();
    field.add_tag(&mut ctx, ArenaTagKind::Reflect, options("e1", "reflect", ArenaTagSide::Enemy, 5), false);
    let multiplier = field.screen_multiplier(&mut ctx, ArenaTagSide::Enemy, "p1a", MoveCategory::Physical);
    assert_eq!(multiplier, DOUBLES_SCREEN_MULTIPLIER);
}

#[test]
fn add_with_defaults_uses_configured_duration() {
    let mut h = Harness::new(default_state());
    let mut field = ArenaField::new();
    let mut config = ArenaConfig::default();
    config.default_turns.insert(ArenaTagKind::Tailwind, 6);
    let mut ctx = h.ctx();

    field.add_tag_with_defaults(
        &mut ctx,
        &config,
        ArenaTagKind::Tailwind,
        options("p1a", "tailwind", ArenaTagSide::Player, 1),
        true,
    );
    assert_eq!(field.get_tag(ArenaTagKind::Tailwind).map(|tag| tag.turn_count), Some(6));
}

#[test]
fn kind_identifiers_parse_and_key_messages() {
    assert_eq!(ArenaTagKind::parse("LIGHT_SCREEN").expect("known"), ArenaTagKind::LightScreen);
    assert!(matches!(ArenaTagKind::parse("light"), Err(ArenaError::UnknownTagKind(id)) if id == "light"));
    assert_eq!(ArenaTagKind::NoCrit.to_string(), "NO_CRIT");
    assert_eq!(
        ArenaTagKind::LightScreen.message_key("OnAdd", ArenaTagSide::Player),
        "arenaTag:lightScreenOnAddPlayer"
    );
    assert_eq!(
        ArenaTagKind::TrickRoom.message_key("OnRemove", ArenaTagSide::Both),
        "arenaTag:trickRoomOnRemove"
    );
}

#[test]
fn bundled_move_table_loads() {
    let moves = MoveDatabase::load_default().expect("bundled moves parse");

    let quick_attack = moves.get("quick_attack").expect("quick attack");
    assert_eq!(quick_attack.priority, 1);
    assert_eq!(quick_attack.category(), MoveCategory::Physical);
    assert_eq!(moves.get("wide_guard").map(|m| m.display_name()), Some("Wide Guard"));
}

#[test]
fn move_tables_accept_maps_keyed_by_id() {
    let yaml = "tackle:\n  id: tackle\n  type: normal\n  category: physical\n  power: 40\n";
    let moves = MoveDatabase::load_from_yaml_str(yaml).expect("map form");

    assert_eq!(moves.get("tackle").and_then(|m| m.power), Some(40));
    assert_eq!(moves.get("tackle").map(|m| m.display_name()), Some("tackle"));
}
