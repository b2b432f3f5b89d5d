//! Static fixture-type catalog.
//!
//! The catalog is the library a plot draws from: each entry describes one
//! fixture type (display name, power draw, icon, operating modes). Placed
//! items reference catalog entries by id; bars are a built-in kind and do
//! not live here.

use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Reference to a fixture icon.
///
/// The core never rasterizes icons itself; it only distinguishes markup
/// carried inline from markup that lives in an asset file. The rendering
/// layer resolves either variant to pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconRef {
    /// Inline SVG markup.
    Inline(String),
    /// Path to an asset file (SVG or raster), relative to the asset root.
    Asset(PathBuf),
}

/// One fixture type in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureType {
    /// Stable catalog identifier, used as an item's `kind`.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Power draw in watts.
    pub power_w: f64,
    /// Icon used on the canvas and in legends.
    pub icon: IconRef,
    /// Selectable operating modes, e.g. `"3ch"`, `"7ch"`.
    pub modes: Vec<String>,
    /// Mode preselected when the fixture is placed.
    pub default_mode: String,
}

impl FixtureType {
    fn new(
        id: &str,
        name: &str,
        power_w: f64,
        icon: IconRef,
        modes: &[&str],
        default_mode: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            power_w,
            icon,
            modes: modes.iter().map(|m| m.to_string()).collect(),
            default_mode: default_mode.to_string(),
        }
    }
}

/// Derives the DMX channel count from an operating mode string.
///
/// Modes are written `"<n>ch"`; anything unparseable counts as a single
/// channel so a fixture never occupies zero addresses.
pub fn channels_from_mode(mode: &str) -> u16 {
    let trimmed = mode.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 1;
    }
    let rest = trimmed[digits.len()..].trim_start().to_ascii_lowercase();
    if rest.starts_with("ch") {
        digits.parse().unwrap_or(1)
    } else {
        1
    }
}

fn inline(svg: &str) -> IconRef {
    IconRef::Inline(svg.to_string())
}

/// The built-in fixture catalog.
pub fn fixture_catalog() -> &'static [FixtureType] {
    static CATALOG: OnceLock<Vec<FixtureType>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        vec![
            FixtureType::new(
                "par_led",
                "PAR LED",
                180.0,
                inline(concat!(
                    r##"<svg width="26" height="26" viewBox="0 0 26 26" xmlns="http://www.w3.org/2000/svg">"##,
                    r##"<circle cx="13" cy="13" r="11" fill="#0b0b0b"/>"##,
                    r##"<circle cx="9" cy="13" r="3" fill="#22c55e"/><circle cx="17" cy="13" r="3" fill="#ef4444"/>"##,
                    r##"<circle cx="13" cy="9" r="3" fill="#eab308"/><circle cx="13" cy="17" r="3" fill="#06b6d4"/></svg>"##,
                )),
                &["3ch", "7ch"],
                "7ch",
            ),
            FixtureType::new(
                "profile_spot",
                "Profile Spot (Ellipsoidal)",
                750.0,
                inline(concat!(
                    r##"<svg width="26" height="26" viewBox="0 0 26 26" xmlns="http://www.w3.org/2000/svg">"##,
                    r##"<rect x="4" y="8" width="18" height="10" rx="5" fill="#111827"/>"##,
                    r##"<circle cx="19" cy="13" r="5" fill="#64748b"/>"##,
                    r##"<rect x="2" y="11" width="6" height="4" rx="2" fill="#374151"/></svg>"##,
                )),
                &["1ch"],
                "1ch",
            ),
            FixtureType::new(
                "fresnel",
                "Fresnel",
                650.0,
                inline(concat!(
                    r##"<svg width="26" height="26" viewBox="0 0 26 26" xmlns="http://www.w3.org/2000/svg">"##,
                    r##"<rect x="4" y="9" width="14" height="8" rx="2" fill="#334155"/>"##,
                    r##"<circle cx="12" cy="13" r="3.5" fill="#94a3b8"/>"##,
                    r##"<rect x="18" y="10" width="4" height="6" fill="#111827"/></svg>"##,
                )),
                &["1ch"],
                "1ch",
            ),
            FixtureType::new(
                "led_wash",
                "LED Wash",
                300.0,
                inline(concat!(
                    r##"<svg width="26" height="26" viewBox="0 0 26 26" xmlns="http://www.w3.org/2000/svg">"##,
                    r##"<rect x="3" y="9" width="20" height="8" rx="4" fill="#7c3aed"/>"##,
                    r##"<circle cx="8" cy="13" r="2.2" fill="#fff"/><circle cx="13" cy="13" r="2.2" fill="#fff"/>"##,
                    r##"<circle cx="18" cy="13" r="2.2" fill="#fff"/></svg>"##,
                )),
                &["4ch", "8ch"],
                "8ch",
            ),
            FixtureType::new(
                "strobe",
                "Strobe",
                1500.0,
                inline(concat!(
                    r##"<svg width="26" height="26" viewBox="0 0 26 26" xmlns="http://www.w3.org/2000/svg">"##,
                    r##"<rect x="3" y="9" width="20" height="8" rx="2" fill="#000"/>"##,
                    r##"<rect x="5" y="11" width="16" height="4" fill="#f1f5f9"/></svg>"##,
                )),
                &["1ch", "2ch"],
                "2ch",
            ),
            FixtureType::new(
                "led_bar",
                "LED Bar",
                150.0,
                IconRef::Asset(PathBuf::from("icons/led_bar.svg")),
                &["3ch", "6ch", "12ch"],
                "12ch",
            ),
            FixtureType::new(
                "par_64",
                "PAR 64",
                1000.0,
                IconRef::Asset(PathBuf::from("icons/par_64.svg")),
                &["1ch"],
                "1ch",
            ),
            FixtureType::new(
                "fog_machine",
                "Fog Machine",
                1000.0,
                inline(concat!(
                    r##"<svg width="26" height="26" viewBox="0 0 26 26" xmlns="http://www.w3.org/2000/svg">"##,
                    r##"<rect x="4" y="10" width="18" height="12" rx="2" fill="#4a5568"/>"##,
                    r##"<rect x="6" y="12" width="14" height="8" rx="2" fill="#2d3748"/>"##,
                    r##"<path d="M8 8 Q10 4 12 8 T16 8 T20 8" stroke="#a0aec0" stroke-width="2" fill="none"/></svg>"##,
                )),
                &["1ch"],
                "1ch",
            ),
        ]
    })
}

/// Looks up a fixture type by catalog id.
pub fn find_fixture_type(id: &str) -> Option<&'static FixtureType> {
    fixture_catalog().iter().find(|f| f.id == id)
}
