use stagerig_core::fixture_catalog;
use stagerig_plot::patch_report::{from_csv, to_csv};
use stagerig_plot::{Item, PlotState};

fn sample_items() -> Vec<Item> {
    let mut state = PlotState::new();
    let types = fixture_catalog();
    state.add_bar(300.0, 100.0);
    state.add_fixture(&types[0], 100.0, 400.5);
    state.add_fixture(&types[1], 200.49, 400.0);
    state.auto_patch();
    state.items
}

#[test]
fn sheet_starts_with_bom_and_header() {
    let csv = to_csv(&sample_items());
    assert!(csv.starts_with('\u{feff}'));
    let first_line = csv.trim_start_matches('\u{feff}').lines().next().unwrap();
    assert_eq!(
        first_line,
        "No;UID;Type;Mode;Universe;Address;Channels;Power(W);X;Y;Rot"
    );
}

#[test]
fn bars_never_appear_and_rows_follow_numbers() {
    let items = sample_items();
    let rows = from_csv(&to_csv(&items)).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].seq, "1");
    assert_eq!(rows[1].seq, "2");
    assert!(rows.iter().all(|r| r.name != "Bar"));
}

#[test]
fn positions_are_rounded_to_whole_pixels() {
    let items = sample_items();
    let rows = from_csv(&to_csv(&items)).unwrap();
    assert_eq!(rows[0].x, 100);
    assert_eq!(rows[0].y, 401);
    assert_eq!(rows[1].x, 200);
}

#[test]
fn round_trip_preserves_patch_data() {
    let items = sample_items();
    let rows = from_csv(&to_csv(&items)).unwrap();
    let fixtures: Vec<&Item> = items.iter().filter(|i| i.is_fixture()).collect();
    for (row, item) in rows.iter().zip(&fixtures) {
        assert_eq!(row.uid, item.uid);
        assert_eq!(row.universe, item.universe);
        assert_eq!(row.address, item.address);
        assert_eq!(row.channels, item.channels);
        assert_eq!(row.mode, item.mode.clone().unwrap_or_default());
    }
}

#[test]
fn marker_overrides_the_sequence_column() {
    let mut items = sample_items();
    if let Some(fixture) = items.iter_mut().find(|i| i.is_fixture()) {
        fixture.marker = Some(99);
    }
    let rows = from_csv(&to_csv(&items)).unwrap();
    assert_eq!(rows[0].seq, "99");
}

#[test]
fn parser_accepts_missing_bom() {
    let csv = to_csv(&sample_items());
    let without_bom = csv.trim_start_matches('\u{feff}');
    assert!(from_csv(without_bom).is_ok());
}

#[test]
fn parser_rejects_wrong_header_and_short_rows() {
    assert!(from_csv("Nope;Header\n").is_err());

    let bad = "No;UID;Type;Mode;Universe;Address;Channels;Power(W);X;Y;Rot\n1;only;three\n";
    let err = from_csv(bad).unwrap_err();
    assert!(err.to_string().contains("expected 11 fields"));
}
