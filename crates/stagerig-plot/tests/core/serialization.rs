use stagerig_core::fixture_catalog;
use stagerig_plot::serialization::{from_json, to_json, PlotFile};
use stagerig_plot::{ItemKind, PlotState};

fn sample_state() -> PlotState {
    let mut state = PlotState::new();
    state.title = "Club night".to_string();
    state.add_bar(300.0, 100.0);
    state.add_fixture(&fixture_catalog()[0], 310.0, 95.0);
    state.add_fixture(&fixture_catalog()[1], 700.0, 400.0);
    let gid = state.add_group("Wash");
    let uid = state.items.last().unwrap().uid.clone();
    state.assign_group(&uid, Some(&gid));
    state
}

#[test]
fn save_and_reload_preserves_the_document() {
    let state = sample_state();
    let json = to_json(&PlotFile::from_state(&state)).unwrap();
    let file = from_json(&json).unwrap();

    let mut reloaded = PlotState::new();
    file.into_state(&mut reloaded);

    assert_eq!(reloaded.title, state.title);
    assert_eq!(reloaded.items, state.items);
    assert_eq!(reloaded.groups, state.groups);
    // Selection is transient and never restored.
    assert_eq!(reloaded.selected, None);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let file = from_json("{}").unwrap();
    assert!(file.items.is_empty());
    assert_eq!(file.title, "Untitled plot");
    assert!(file.groups.is_empty());
}

#[test]
fn partial_items_survive_import() {
    let json = r#"{"items":[{"uid":"a1","kind":"bar"},{"uid":"b2","kind":"par_led","x":40}]}"#;
    let file = from_json(json).unwrap();
    assert_eq!(file.items.len(), 2);
    assert_eq!(file.items[0].kind, ItemKind::Bar);
    assert!(file.items[0].is_bar());
    assert_eq!(file.items[1].kind, ItemKind::Fixture("par_led".to_string()));
    assert_eq!(file.items[1].x, 40.0);
    assert_eq!(file.items[1].scale_x, 1.0);
    assert_eq!(file.items[1].universe, None);
}

#[test]
fn unknown_fields_are_ignored() {
    let json = r#"{"title":"T","future_field":true,"items":[{"uid":"x","zoom":9}]}"#;
    let file = from_json(json).unwrap();
    assert_eq!(file.title, "T");
    assert_eq!(file.items.len(), 1);
}

#[test]
fn malformed_json_is_rejected() {
    let err = from_json("{not json").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("parsing plan"), "unexpected error: {msg}");
}

#[test]
fn bars_serialize_without_dmx_fields() {
    let mut state = PlotState::new();
    state.add_bar(0.0, 0.0);
    let json = to_json(&PlotFile::from_state(&state)).unwrap();
    assert!(!json.contains("universe"));
    assert!(!json.contains("address"));
    assert!(!json.contains("number"));
}

#[test]
fn file_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");

    let state = sample_state();
    state.save_to_file(&path).unwrap();

    let mut reloaded = PlotState::new();
    reloaded.load_from_file(&path).unwrap();
    assert_eq!(reloaded.items, state.items);
    assert_eq!(reloaded.title, state.title);
}
