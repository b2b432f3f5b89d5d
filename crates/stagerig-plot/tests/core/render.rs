use std::path::{Path, PathBuf};

use stagerig_core::catalog::{FixtureType, IconRef};
use stagerig_core::error::ExportError;
use stagerig_core::fixture_catalog;
use stagerig_plot::{export_image, load_icon_set, render_stage, ExportFormat, PlotState};

fn assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}

fn inline_type(id: &str) -> FixtureType {
    FixtureType {
        id: id.to_string(),
        name: id.to_string(),
        power_w: 100.0,
        icon: IconRef::Inline(
            r##"<svg width="10" height="10" xmlns="http://www.w3.org/2000/svg">
                <rect width="10" height="10" fill="#ff0000"/></svg>"##
                .to_string(),
        ),
        modes: vec!["1ch".to_string()],
        default_mode: "1ch".to_string(),
    }
}

#[test]
fn catalog_icons_all_rasterize() {
    let types: Vec<_> = fixture_catalog().iter().collect();
    let icons = load_icon_set(&types, 26, &assets_dir()).unwrap();
    for fixture_type in fixture_catalog() {
        let icon = icons.get(&fixture_type.id).expect("icon present");
        assert_eq!(icon.width(), 26);
        assert_eq!(icon.height(), 26);
    }
}

#[test]
fn one_bad_icon_fails_the_whole_set() {
    let good = inline_type("good");
    let mut bad = inline_type("bad");
    bad.icon = IconRef::Asset(PathBuf::from("does/not/exist.svg"));
    let mut worse = inline_type("worse");
    worse.icon = IconRef::Inline("<not svg".to_string());

    let err = load_icon_set(&[&good, &bad, &worse], 26, &assets_dir()).unwrap_err();
    match err {
        ExportError::IconLoad { failures } => {
            assert_eq!(failures.len(), 2);
            assert!(failures.iter().any(|f| f.starts_with("bad:")));
            assert!(failures.iter().any(|f| f.starts_with("worse:")));
        }
        other => panic!("expected IconLoad, got {other}"),
    }
}

#[test]
fn stage_renders_and_encodes_to_png_and_jpeg() {
    let mut state = PlotState::new();
    state.add_bar(200.0, 100.0);
    state.add_fixture(&fixture_catalog()[0], 210.0, 95.0);

    let types: Vec<_> = fixture_catalog().iter().collect();
    let icons = load_icon_set(&types, 26, &assets_dir()).unwrap();
    let pixmap = render_stage(&state, &icons, 400, 300).unwrap();
    assert_eq!(pixmap.width(), 400);

    let png = export_image(&pixmap, ExportFormat::Png).unwrap();
    assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);

    let jpeg = export_image(&pixmap, ExportFormat::Jpeg).unwrap();
    assert_eq!(&jpeg[..2], &[0xff, 0xd8]);
}

#[test]
fn zero_sized_canvas_is_a_raster_error() {
    let state = PlotState::new();
    let icons = load_icon_set(&[], 26, &assets_dir()).unwrap();
    let err = render_stage(&state, &icons, 0, 100).unwrap_err();
    assert!(matches!(err, ExportError::Raster { .. }));
}
